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

//! # The MuxNet Logging crate
//! Logging crate used by the other crates in this repository. The crate has a macro
//! library that allows for logging at the standard 6 levels and also
//! allows for specifying a log file and various other options. In addition to the
//! [`trace`], [`debug`], [`info`], [`warn`], [`error`] and [`fatal`] macros, this crate
//! provides an 'all' version and a 'plain' version of each macro. For example:
//! [`info_all`] and [`info_plain`]. These macros allow for logging to standard out no
//! matter how the log is configured and for logging without the timestamp, log level,
//! and line number metadata respectively.
//!
//! # Examples
//!
//!```
//! use mux_err::*;
//! use mux_log::*;
//!
//! // set log level for this file. Anything below this scope will only be
//! // logged if it is equal to or above log level 'INFO'.
//! info!();
//!
//! fn main() -> Result<(), Error> {
//!     let abc = 123;
//!     info!("v1={},v2={}", abc, "def")?; // will show up
//!     debug!("test")?; // will not show up
//!
//!     Ok(())
//! }
//!```
//!
//! The default output will look something like this:
//!
//! ```text
//! [2024-02-24 13:52:24.123]: (INFO)  [..muxnet/src/main.rs:128]: info
//! [2024-02-24 13:52:24.123]: (DEBUG) [..muxnet/src/main.rs:132]: debug
//! ```
//!
//! Logging may be configured through the [`crate::log_init`] macro which accepts
//! any of the logging [`mux_conf::ConfigOption`] values.

mod builder;
mod constants;
mod log;
mod macros;
mod types;

pub use crate::types::{GlobalLogContainer, Log, LogBuilder, LogLevel, LoggingType, MUX_GLOBAL_LOG};
