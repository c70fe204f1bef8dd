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

//! # The MuxNet Utility crate
//! This crate provides the concurrency primitives used by the other crates in this
//! repository: the [`crate::LockBox`] which wraps a [`std::sync::RwLock`] in a clonable
//! box, the [`crate::BlockingQueue`] which is a bounded multi producer multi consumer
//! queue, and the [`crate::WorkerLoop`] which runs a handler on a dedicated thread fed
//! by a [`crate::BlockingQueue`].
//!
//! # Examples
//!
//!```
//! use mux_err::*;
//! use mux_util::*;
//!
//! fn main() -> Result<(), Error> {
//!     let mut lock = lock_box!(0u64)?;
//!     let lock_clone = lock.clone();
//!
//!     {
//!         let mut guard = lock.wlock()?;
//!         *guard += 1;
//!     }
//!
//!     assert_eq!(*(lock_clone.rlock()?), 1);
//!     Ok(())
//! }
//!```

mod builder;
mod lock;
mod macros;
mod queue;
#[cfg(test)]
mod test;
mod types;
mod worker;

pub use crate::queue::BlockingQueue;
pub use crate::types::{LockBox, UtilBuilder};
pub use crate::worker::WorkerLoop;
