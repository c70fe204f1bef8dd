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
use crate::{BlockingQueue, LockBox, UtilBuilder, WorkerLoop};
use mux_err::*;

impl UtilBuilder {
	/// build a [`crate::LockBox`] wrapping the specified value.
	pub fn build_lock_box<T>(t: T) -> Result<Box<dyn LockBox<T>>, Error>
	where
		T: Send + Sync + 'static,
	{
		Ok(Box::new(LockImpl::new(t)))
	}

	/// build a [`crate::BlockingQueue`] with the specified capacity.
	pub fn build_blocking_queue<T>(capacity: usize) -> Result<BlockingQueue<T>, Error> {
		BlockingQueue::new(capacity)
	}

	/// build a [`crate::WorkerLoop`] with the specified name which pops items from
	/// the specified queue and passes them to the handler.
	pub fn build_worker_loop<T>(
		name: &str,
		queue: BlockingQueue<T>,
		handler: Box<dyn FnMut(T) -> Result<(), Error> + Send>,
	) -> Result<WorkerLoop<T>, Error>
	where
		T: Send + 'static,
	{
		WorkerLoop::new(name, queue, handler)
	}
}
