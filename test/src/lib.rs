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

//! # The MuxNet Test crate
//! This crate provides utilities used in tests throughout this repository. The
//! [`crate::test_info`] macro sets up a unique test directory and picks a free tcp/ip
//! port for the test. The directory is removed when the returned [`crate::TestInfo`]
//! goes out of scope.
//!
//! # Examples
//!
//!```
//! use mux_err::*;
//! use mux_test::*;
//!
//! fn test_my_fn() -> Result<(), Error> {
//!     let test_info = test_info!()?;
//!
//!     let directory = test_info.directory();
//!     let port = test_info.port();
//!
//!     // use the directory to write/read files and the port for tcp/ip connections
//!
//!     Ok(())
//! }
//!
//! fn main() -> Result<(), Error> { test_my_fn() }
//!```

mod impls;
mod macros;
#[cfg(test)]
mod test;
mod types;

pub use crate::types::{TestBuilder, TestInfo};
