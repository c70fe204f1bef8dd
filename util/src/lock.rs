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

use crate::types::LockImpl;
use crate::LockBox;
use mux_deps::rand::random;
use mux_err::*;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

// clones share the lock and keep the id
impl<T> Clone for LockImpl<T> {
	fn clone(&self) -> Self {
		Self {
			t: self.t.clone(),
			id: self.id,
		}
	}
}

impl<T> Debug for LockImpl<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
		write!(f, "LockImpl<{}>", self.id)
	}
}

impl<T> LockBox<T> for LockImpl<T>
where
	T: Send + Sync,
{
	fn wlock(&mut self) -> Result<RwLockWriteGuard<'_, T>, Error> {
		self.do_wlock(false)
	}

	fn rlock(&self) -> Result<RwLockReadGuard<'_, T>, Error> {
		self.do_rlock(false)
	}

	fn rlock_ignore_poison(&self) -> Result<RwLockReadGuard<'_, T>, Error> {
		self.do_rlock(true)
	}

	fn wlock_ignore_poison(&mut self) -> Result<RwLockWriteGuard<'_, T>, Error> {
		self.do_wlock(true)
	}

	fn inner(&self) -> Arc<RwLock<T>> {
		self.t.clone()
	}

	fn id(&self) -> u128 {
		self.id
	}
}

impl<T> LockImpl<T> {
	pub(crate) fn new(t: T) -> Self {
		Self {
			t: Arc::new(RwLock::new(t)),
			id: random(),
		}
	}

	fn do_wlock(&mut self, ignore_poison: bool) -> Result<RwLockWriteGuard<'_, T>, Error> {
		let guard = if ignore_poison {
			match self.t.write() {
				Ok(guard) => guard,
				Err(e) => e.into_inner(),
			}
		} else {
			map_err!(self.t.write(), ErrKind::Poison)?
		};
		Ok(guard)
	}

	fn do_rlock(&self, ignore_poison: bool) -> Result<RwLockReadGuard<'_, T>, Error> {
		let guard = if ignore_poison {
			match self.t.read() {
				Ok(guard) => guard,
				Err(e) => e.into_inner(),
			}
		} else {
			map_err!(self.t.read(), ErrKind::Poison)?
		};
		Ok(guard)
	}
}
