// Copyright (c) 2023-2024, The MuxNet Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[doc(hidden)]
#[macro_export]
macro_rules! u64 {
	($v:expr) => {{
		$v as u64
	}};
}

/// The [`crate::trace`] macro is used to set the global logging level at the current scope to the
/// [`crate::LogLevel::Trace`] level _or_ to log at the [`crate::LogLevel::Trace`] level depending
/// on which arguments are passed to the macro. If no arguments are supplied, the log level for the
/// current scope is set to trace. If arguments are supplied, the global logger will be called at
/// the trace level and the formatted output will be logged if the threshold of the global logger
/// permits it.
///
/// # Examples
///```
/// use mux_err::*;
/// use mux_log::*;
///
/// // set the global logger's logging level to 'trace'. Since it's outside of the function
/// // block, any logging that occurs for the rest of this file will use the 'trace'
/// // threshold.
/// trace!();
///
/// fn main() -> Result<(), Error> {
///     // log at the trace level. Since the threshold is trace, this will be logged.
///     trace!("this is a test")?;
///
///     // formatting can be used just like println! and format!
///     trace!("1 + 1 = {}", 2)?;
///
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! trace {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Trace;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Trace, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Standard)
        }};
}

/// Identical to [`crate::trace`] except that just the formatted log line is logged with no
/// timestamp, log level, or line number.
#[macro_export]
macro_rules! trace_plain {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Trace;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Trace, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Plain)
        }};
}

/// Identical to [`crate::trace`] except that data are logged both to stdout and a file
/// (if configured) regardless of whether or not stdout logging is enabled.
#[macro_export]
macro_rules! trace_all {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Trace;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Trace, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::All)
        }};
}

/// Set the global logging level at the current scope to [`crate::LogLevel::Debug`] _or_ log at
/// the [`crate::LogLevel::Debug`] level. See [`crate::trace`] for further details.
#[macro_export]
macro_rules! debug {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Debug;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Debug, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Standard)
        }};
}

/// Identical to [`crate::debug`] except that no metadata is logged. See [`crate::trace_plain`].
#[macro_export]
macro_rules! debug_plain {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Debug;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Debug, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Plain)
        }};
}

/// Identical to [`crate::debug`] except that stdout logging always occurs. See
/// [`crate::trace_all`].
#[macro_export]
macro_rules! debug_all {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Debug;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Debug, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::All)
        }};
}

/// Set the global logging level at the current scope to [`crate::LogLevel::Info`] _or_ log at
/// the [`crate::LogLevel::Info`] level. See [`crate::trace`] for further details.
#[macro_export]
macro_rules! info {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Info;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Info, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Standard)
        }};
}

/// Identical to [`crate::info`] except that no metadata is logged. See [`crate::trace_plain`].
#[macro_export]
macro_rules! info_plain {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Info;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Info, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Plain)
        }};
}

/// Identical to [`crate::info`] except that stdout logging always occurs. See
/// [`crate::trace_all`].
#[macro_export]
macro_rules! info_all {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Info;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Info, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::All)
        }};
}

/// Set the global logging level at the current scope to [`crate::LogLevel::Warn`] _or_ log at
/// the [`crate::LogLevel::Warn`] level. See [`crate::trace`] for further details.
#[macro_export]
macro_rules! warn {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Warn;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Warn, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Standard)
        }};
}

/// Identical to [`crate::warn`] except that no metadata is logged. See [`crate::trace_plain`].
#[macro_export]
macro_rules! warn_plain {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Warn;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Warn, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Plain)
        }};
}

/// Identical to [`crate::warn`] except that stdout logging always occurs. See
/// [`crate::trace_all`].
#[macro_export]
macro_rules! warn_all {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Warn;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Warn, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::All)
        }};
}

/// Set the global logging level at the current scope to [`crate::LogLevel::Error`] _or_ log at
/// the [`crate::LogLevel::Error`] level. See [`crate::trace`] for further details.
#[macro_export]
macro_rules! error {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Error;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Error, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Standard)
        }};
}

/// Identical to [`crate::error`] except that no metadata is logged. See [`crate::trace_plain`].
#[macro_export]
macro_rules! error_plain {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Error;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Error, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Plain)
        }};
}

/// Identical to [`crate::error`] except that stdout logging always occurs. See
/// [`crate::trace_all`].
#[macro_export]
macro_rules! error_all {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Error;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Error, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::All)
        }};
}

/// Set the global logging level at the current scope to [`crate::LogLevel::Fatal`] _or_ log at
/// the [`crate::LogLevel::Fatal`] level. See [`crate::trace`] for further details.
#[macro_export]
macro_rules! fatal {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Fatal;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Fatal, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Standard)
        }};
}

/// Identical to [`crate::fatal`] except that no metadata is logged. See [`crate::trace_plain`].
#[macro_export]
macro_rules! fatal_plain {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Fatal;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Fatal, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::Plain)
        }};
}

/// Identical to [`crate::fatal`] except that stdout logging always occurs. See
/// [`crate::trace_all`].
#[macro_export]
macro_rules! fatal_all {
        () => {
                #[doc(hidden)]
                const MUX_GLOBAL_LOG_LEVEL: mux_log::LogLevel = mux_log::LogLevel::Fatal;
        };
        ($($values:tt)*) => {{
                use mux_log::*;
                GlobalLogContainer::log(LogLevel::Fatal, &format!($($values)*)[..], MUX_GLOBAL_LOG_LEVEL, LoggingType::All)
        }};
}

/// Initialize the global logger with the specified [`mux_conf::ConfigOption`] values.
///
/// # Examples
///```
/// use mux_err::*;
/// use mux_log::*;
/// use mux_test::*;
/// use std::path::PathBuf;
///
/// info!();
///
/// fn main() -> Result<(), Error> {
///     let test_info = test_info!()?;
///     let mut path = PathBuf::from(test_info.directory());
///     path.push("test.log");
///     let path = Some(Box::new(path));
///
///     log_init!(LogFilePath(path), DisplayColors(false))?;
///
///     info!("logging initialized")?;
///
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! log_init {
        ($($config:tt)*) => {{
                use mux_conf::ConfigOption::*;
                use mux_log::GlobalLogContainer;
                let v: Vec<mux_conf::ConfigOption> = vec![$($config)*];
                GlobalLogContainer::init(v)
        }};
}

/// Set a configuration option on the global logger. All options other than
/// `LogFilePath` may be changed after initialization.
#[macro_export]
macro_rules! set_log_option {
	($option:expr) => {{
		use mux_conf::ConfigOption::*;
		use mux_log::GlobalLogContainer;
		GlobalLogContainer::set_log_option($option)
	}};
}

/// Rotate the global logger's log file. See [`crate::Log::rotate`].
#[macro_export]
macro_rules! log_rotate {
	() => {{
		use mux_log::GlobalLogContainer;
		GlobalLogContainer::rotate()
	}};
}

/// Returns [`true`] if the global logger's log file needs to be rotated. See
/// [`crate::Log::need_rotate`].
#[macro_export]
macro_rules! need_rotate {
	() => {{
		use mux_log::GlobalLogContainer;
		GlobalLogContainer::need_rotate()
	}};
}

/// Create an independent logger instance that is distinct from the global logger.
#[macro_export]
macro_rules! logger {
        ($($config:tt)*) => {{
                use mux_conf::ConfigOption::*;
                use mux_log::LogBuilder;
                let v: Vec<mux_conf::ConfigOption> = vec![$($config)*];
                LogBuilder::build_log(v)
        }};
}
