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

//! # The MuxNet Error crate
//! This crate defines the [`crate::Error`] structure used by all other crates in this
//! repository along with the macros used to construct and map errors. Errors are built
//! on top of the failure crate so a context and backtrace are available for each error.
//!
//! # Examples
//!
//!```
//! use mux_err::*;
//!
//! fn return_err(fail: bool) -> Result<(), Error> {
//!     if fail {
//!         return Err(err!(ErrKind::IllegalState, "failure was requested"));
//!     }
//!     Ok(())
//! }
//!
//! fn main() -> Result<(), Error> {
//!     assert!(return_err(true).is_err());
//!     return_err(false)
//! }
//!```

mod error;
mod macros;
mod public;

pub use crate::public::{ErrKind, Error, ErrorKind};
