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

//! # The MuxNet Configuration crate
//! This crate implements the configuration options used by the other crates in this
//! repository. Configurations are built through the [`crate::config`] macro and checked
//! for duplicate, disallowed, and missing options at build time.
//!
//! # Examples
//!
//!```
//! use mux_conf::*;
//! use mux_err::*;
//!
//! fn main() -> Result<(), Error> {
//!     let config = config!(MaxClients(100), NetTimeout(30));
//!     assert_eq!(config.get_or_usize(&ConfigOptionName::MaxClients, 512), 100);
//!     assert_eq!(config.get_or_u16(&ConfigOptionName::NetTimeout, 100), 30);
//!     Ok(())
//! }
//!```

mod config;
mod macros;
mod types;

pub use crate::types::{Config, ConfigBuilder, ConfigOption, ConfigOptionName};
