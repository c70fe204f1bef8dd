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

/// Build a [`crate::LockBox`] wrapping the specified value.
///
/// # Examples
///
///```
/// use mux_err::*;
/// use mux_util::*;
///
/// fn main() -> Result<(), Error> {
///     let mut lock = lock_box!(100u32)?;
///     {
///         let mut guard = lock.wlock()?;
///         *guard += 1;
///     }
///     assert_eq!(*(lock.rlock()?), 101);
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! lock_box {
	($value:expr) => {{
		use $crate::UtilBuilder;
		UtilBuilder::build_lock_box($value)
	}};
}

/// Build a [`crate::BlockingQueue`] with the specified capacity.
#[macro_export]
macro_rules! blocking_queue {
	($capacity:expr) => {{
		use $crate::UtilBuilder;
		UtilBuilder::build_blocking_queue($capacity)
	}};
}
