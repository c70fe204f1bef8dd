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

use mux_err::*;
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Condvar, Mutex};

/// A bounded multi producer multi consumer queue. Clones share the same underlying
/// queue. [`crate::BlockingQueue::push`] blocks while the queue is full and
/// [`crate::BlockingQueue::pop`] blocks while the queue is empty. A stopped queue
/// rejects new items but allows the remaining items to be popped, after which
/// [`crate::BlockingQueue::pop`] returns [`None`].
pub struct BlockingQueue<T> {
	state: Arc<QueueState<T>>,
}

struct QueueState<T> {
	guarded: Mutex<QueueInner<T>>,
	not_empty: Condvar,
	not_full: Condvar,
	empty: Condvar,
	capacity: usize,
}

struct QueueInner<T> {
	items: VecDeque<T>,
	stopped: bool,
}

impl<T> Clone for BlockingQueue<T> {
	fn clone(&self) -> Self {
		Self {
			state: self.state.clone(),
		}
	}
}

impl<T> Debug for BlockingQueue<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
		write!(f, "BlockingQueue<capacity={}>", self.state.capacity)
	}
}

impl<T> BlockingQueue<T> {
	pub(crate) fn new(capacity: usize) -> Result<Self, Error> {
		if capacity == 0 {
			let text = "capacity must not be 0";
			return Err(err!(ErrKind::IllegalArgument, text));
		}
		Ok(Self {
			state: Arc::new(QueueState {
				guarded: Mutex::new(QueueInner {
					items: VecDeque::with_capacity(capacity),
					stopped: false,
				}),
				not_empty: Condvar::new(),
				not_full: Condvar::new(),
				empty: Condvar::new(),
				capacity,
			}),
		})
	}

	/// Push an item onto the queue blocking while the queue is full. Returns an error
	/// if the queue has been stopped.
	pub fn push(&self, t: T) -> Result<(), Error> {
		let mut inner = map_err!(self.state.guarded.lock(), ErrKind::Poison)?;
		while inner.items.len() >= self.state.capacity && !inner.stopped {
			inner = map_err!(self.state.not_full.wait(inner), ErrKind::Poison)?;
		}
		if inner.stopped {
			return Err(err!(ErrKind::IllegalState, "queue has been stopped"));
		}
		inner.items.push_back(t);
		self.state.not_empty.notify_one();
		Ok(())
	}

	/// Push an item onto the queue without blocking. Returns a
	/// [`mux_err::ErrorKind::CapacityExceeded`] error if the queue is full.
	pub fn try_push(&self, t: T) -> Result<(), Error> {
		let mut inner = map_err!(self.state.guarded.lock(), ErrKind::Poison)?;
		if inner.stopped {
			return Err(err!(ErrKind::IllegalState, "queue has been stopped"));
		}
		if inner.items.len() >= self.state.capacity {
			return Err(err!(ErrKind::CapacityExceeded, "queue is full"));
		}
		inner.items.push_back(t);
		self.state.not_empty.notify_one();
		Ok(())
	}

	/// Pop an item from the queue blocking while the queue is empty. Returns [`None`]
	/// once the queue has been stopped and all remaining items have been popped.
	pub fn pop(&self) -> Result<Option<T>, Error> {
		let mut inner = map_err!(self.state.guarded.lock(), ErrKind::Poison)?;
		loop {
			match inner.items.pop_front() {
				Some(t) => {
					self.state.not_full.notify_one();
					if inner.items.len() == 0 {
						self.state.empty.notify_all();
					}
					return Ok(Some(t));
				}
				None => {
					if inner.stopped {
						return Ok(None);
					}
					inner = map_err!(self.state.not_empty.wait(inner), ErrKind::Poison)?;
				}
			}
		}
	}

	/// Pop an item from the queue without blocking. Returns [`None`] if the queue is
	/// empty.
	pub fn try_pop(&self) -> Result<Option<T>, Error> {
		let mut inner = map_err!(self.state.guarded.lock(), ErrKind::Poison)?;
		let ret = inner.items.pop_front();
		if ret.is_some() {
			self.state.not_full.notify_one();
			if inner.items.len() == 0 {
				self.state.empty.notify_all();
			}
		}
		Ok(ret)
	}

	/// Stop the queue. Pending and future pushes fail, pops drain the remaining
	/// items and then return [`None`].
	pub fn stop(&self) -> Result<(), Error> {
		let mut inner = map_err!(self.state.guarded.lock(), ErrKind::Poison)?;
		inner.stopped = true;
		self.state.not_empty.notify_all();
		self.state.not_full.notify_all();
		self.state.empty.notify_all();
		Ok(())
	}

	/// Block until the queue is empty. Used as a drain barrier before stopping so
	/// queued items are processed rather than discarded.
	pub fn wait_empty(&self) -> Result<(), Error> {
		let mut inner = map_err!(self.state.guarded.lock(), ErrKind::Poison)?;
		while inner.items.len() != 0 {
			inner = map_err!(self.state.empty.wait(inner), ErrKind::Poison)?;
		}
		Ok(())
	}

	/// The number of items currently in the queue.
	pub fn len(&self) -> Result<usize, Error> {
		let inner = map_err!(self.state.guarded.lock(), ErrKind::Poison)?;
		Ok(inner.items.len())
	}

	/// Returns [`true`] if the queue is empty.
	pub fn is_empty(&self) -> Result<bool, Error> {
		Ok(self.len()? == 0)
	}

	/// The configured capacity of the queue.
	pub fn capacity(&self) -> usize {
		self.state.capacity
	}
}
