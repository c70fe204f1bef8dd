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

/// Build the specified [`crate::Error`] kind with the specified message.
/// Optionally, the message can be formatted.
///
/// # Examples
///
///```
/// use mux_err::*;
///
/// fn main() -> Result<(), Error> {
///     let err1 = err!(ErrKind::Misc, "misc error occurred");
///     let err2 = err!(ErrKind::IO, "io error: {}", 10);
///     assert_eq!(err1.kind(), ErrorKind::Misc("misc error occurred".to_string()));
///     assert_eq!(err2.kind(), ErrorKind::IO("io error: 10".to_string()));
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! err {
	($kind:expr, $msg:expr) => {{
		use $crate::{ErrKind, Error, ErrorKind};
		match $kind {
			ErrKind::IO => {
				let error: Error = ErrorKind::IO($msg.to_string()).into();
				error
			}
			ErrKind::Log => {
				let error: Error = ErrorKind::Log($msg.to_string()).into();
				error
			}
			ErrKind::Utf8 => {
				let error: Error = ErrorKind::Utf8($msg.to_string()).into();
				error
			}
			ErrKind::Configuration => {
				let error: Error = ErrorKind::Configuration($msg.to_string()).into();
				error
			}
			ErrKind::Poison => {
				let error: Error = ErrorKind::Poison($msg.to_string()).into();
				error
			}
			ErrKind::CorruptedData => {
				let error: Error = ErrorKind::CorruptedData($msg.to_string()).into();
				error
			}
			ErrKind::Timeout => {
				let error: Error = ErrorKind::Timeout($msg.to_string()).into();
				error
			}
			ErrKind::CapacityExceeded => {
				let error: Error = ErrorKind::CapacityExceeded($msg.to_string()).into();
				error
			}
			ErrKind::IllegalArgument => {
				let error: Error = ErrorKind::IllegalArgument($msg.to_string()).into();
				error
			}
			ErrKind::Misc => {
				let error: Error = ErrorKind::Misc($msg.to_string()).into();
				error
			}
			ErrKind::IllegalState => {
				let error: Error = ErrorKind::IllegalState($msg.to_string()).into();
				error
			}
			ErrKind::Test => {
				let error: Error = ErrorKind::Test($msg.to_string()).into();
				error
			}
			ErrKind::Overflow => {
				let error: Error = ErrorKind::Overflow($msg.to_string()).into();
				error
			}
			ErrKind::ThreadPanic => {
				let error: Error = ErrorKind::ThreadPanic($msg.to_string()).into();
				error
			}
			ErrKind::OperationNotSupported => {
				let error: Error = ErrorKind::OperationNotSupported($msg.to_string()).into();
				error
			}
			ErrKind::SystemTime => {
				let error: Error = ErrorKind::SystemTime($msg.to_string()).into();
				error
			}
			ErrKind::Errno => {
				let error: Error = ErrorKind::Errno($msg.to_string()).into();
				error
			}
		}
	}};
	($kind:expr, $msg:expr, $($param:tt)*) => {{
		let msg = &format!($msg, $($param)*)[..];
		$crate::err!($kind, msg)
	}};
}

/// Map the specified error into the [`crate::ErrKind`] specified with the
/// specified message.
///
/// # Examples
///
///```
/// use mux_err::*;
///
/// fn main() -> Result<(), Error> {
///     let res: Result<usize, Error> =
///         map_err!("abc".parse::<usize>(), ErrKind::Misc, "usize parse failed");
///     assert!(res.is_err());
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! map_err {
	($in_err:expr, $kind:expr) => {{
		$crate::map_err!($in_err, $kind, "")
	}};
	($in_err:expr, $kind:expr, $msg:expr) => {{
		use $crate::{ErrKind, Error, ErrorKind};
		$in_err.map_err(|e| -> Error {
			match $kind {
				ErrKind::IO => ErrorKind::IO(format!("{}: {}", $msg, e)).into(),
				ErrKind::Log => ErrorKind::Log(format!("{}: {}", $msg, e)).into(),
				ErrKind::Utf8 => ErrorKind::Utf8(format!("{}: {}", $msg, e)).into(),
				ErrKind::Configuration => {
					ErrorKind::Configuration(format!("{}: {}", $msg, e)).into()
				}
				ErrKind::Poison => ErrorKind::Poison(format!("{}: {}", $msg, e)).into(),
				ErrKind::CorruptedData => {
					ErrorKind::CorruptedData(format!("{}: {}", $msg, e)).into()
				}
				ErrKind::Timeout => ErrorKind::Timeout(format!("{}: {}", $msg, e)).into(),
				ErrKind::CapacityExceeded => {
					ErrorKind::CapacityExceeded(format!("{}: {}", $msg, e)).into()
				}
				ErrKind::IllegalArgument => {
					ErrorKind::IllegalArgument(format!("{}: {}", $msg, e)).into()
				}
				ErrKind::Misc => ErrorKind::Misc(format!("{}: {}", $msg, e)).into(),
				ErrKind::IllegalState => {
					ErrorKind::IllegalState(format!("{}: {}", $msg, e)).into()
				}
				ErrKind::Test => ErrorKind::Test(format!("{}: {}", $msg, e)).into(),
				ErrKind::Overflow => ErrorKind::Overflow(format!("{}: {}", $msg, e)).into(),
				ErrKind::ThreadPanic => {
					ErrorKind::ThreadPanic(format!("{}: {}", $msg, e)).into()
				}
				ErrKind::OperationNotSupported => {
					ErrorKind::OperationNotSupported(format!("{}: {}", $msg, e)).into()
				}
				ErrKind::SystemTime => ErrorKind::SystemTime(format!("{}: {}", $msg, e)).into(),
				ErrKind::Errno => ErrorKind::Errno(format!("{}: {}", $msg, e)).into(),
			}
		})
	}};
}

/// Convenience macro to call [`std::convert::TryInto::try_into`] and map the
/// error to a [`crate::Error`].
#[macro_export]
macro_rules! try_into {
	($v:expr) => {{
		use std::convert::TryInto;
		use $crate::ErrKind;
		$crate::map_err!($v.try_into(), ErrKind::Misc, "TryInto Error")
	}};
}

/// Break from a loop if the specified condition is true.
#[macro_export]
macro_rules! cbreak {
	($cond:expr) => {{
		if $cond {
			break;
		}
	}};
}
