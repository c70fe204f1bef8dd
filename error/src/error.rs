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

use crate::{Error, ErrorKind};
use mux_deps::failure::{Backtrace, Context, Fail};
use std::fmt::{Display, Formatter, Result};
use std::io;
use std::net::AddrParseError;
use std::num::{ParseIntError, TryFromIntError};
use std::str::Utf8Error;
use std::string::FromUtf8Error;
use std::sync::mpsc::{RecvError, SendError};
use std::sync::PoisonError;
use std::time::SystemTimeError;

impl Display for Error {
	fn fmt(&self, f: &mut Formatter) -> Result {
		let output = format!("{} \n Backtrace: {:?}", self.inner, self.backtrace());
		Display::fmt(&output, f)
	}
}

impl Error {
	/// get the kind of error that occurred.
	pub fn kind(&self) -> ErrorKind {
		self.inner.get_context().clone()
	}

	/// get the cause (if available) of this error.
	pub fn cause(&self) -> Option<&dyn Fail> {
		self.inner.cause()
	}

	/// get the backtrace (if available) of this error.
	pub fn backtrace(&self) -> Option<&Backtrace> {
		self.inner.backtrace()
	}

	/// get the inner error as a string.
	pub fn inner(&self) -> String {
		self.inner.to_string()
	}
}

impl From<ErrorKind> for Error {
	fn from(kind: ErrorKind) -> Error {
		Error {
			inner: Context::new(kind),
		}
	}
}

impl From<Context<ErrorKind>> for Error {
	fn from(inner: Context<ErrorKind>) -> Error {
		Error { inner }
	}
}

impl From<io::Error> for Error {
	fn from(e: io::Error) -> Error {
		ErrorKind::IO(format!("{}", e)).into()
	}
}

impl From<Utf8Error> for Error {
	fn from(e: Utf8Error) -> Error {
		ErrorKind::Utf8(format!("{}", e)).into()
	}
}

impl From<FromUtf8Error> for Error {
	fn from(e: FromUtf8Error) -> Error {
		ErrorKind::Utf8(format!("{}", e)).into()
	}
}

impl From<TryFromIntError> for Error {
	fn from(e: TryFromIntError) -> Error {
		ErrorKind::Misc(format!("{}", e)).into()
	}
}

impl<T> From<PoisonError<T>> for Error {
	fn from(e: PoisonError<T>) -> Error {
		ErrorKind::Poison(format!("{}", e)).into()
	}
}

impl From<RecvError> for Error {
	fn from(e: RecvError) -> Error {
		ErrorKind::IllegalState(format!("{}", e)).into()
	}
}

impl<T> From<SendError<T>> for Error {
	fn from(e: SendError<T>) -> Error {
		ErrorKind::IllegalState(format!("{}", e)).into()
	}
}

impl From<SystemTimeError> for Error {
	fn from(e: SystemTimeError) -> Error {
		ErrorKind::SystemTime(format!("{}", e)).into()
	}
}

impl From<ParseIntError> for Error {
	fn from(e: ParseIntError) -> Error {
		ErrorKind::Misc(format!("{}", e)).into()
	}
}

impl From<AddrParseError> for Error {
	fn from(e: AddrParseError) -> Error {
		ErrorKind::IllegalArgument(format!("{}", e)).into()
	}
}

#[cfg(target_os = "linux")]
impl From<mux_deps::nix::errno::Errno> for Error {
	fn from(e: mux_deps::nix::errno::Errno) -> Error {
		ErrorKind::Errno(format!("{}", e)).into()
	}
}
