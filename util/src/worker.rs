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

use crate::BlockingQueue;
use mux_err::*;
use mux_log::*;
use std::thread::{Builder, JoinHandle};

debug!();

/// A dedicated thread which pops items from a [`crate::BlockingQueue`] and passes
/// them to a handler. The loop exits when the queue is stopped and drained.
pub struct WorkerLoop<T> {
	queue: BlockingQueue<T>,
	handle: Option<JoinHandle<()>>,
}

impl<T> WorkerLoop<T>
where
	T: Send + 'static,
{
	pub(crate) fn new(
		name: &str,
		queue: BlockingQueue<T>,
		mut handler: Box<dyn FnMut(T) -> Result<(), Error> + Send>,
	) -> Result<Self, Error> {
		let thread_queue = queue.clone();
		let handle = map_err!(
			Builder::new()
				.name(name.to_string())
				.spawn(move || loop {
					match thread_queue.pop() {
						Ok(Some(t)) => match handler(t) {
							Ok(_) => {}
							Err(e) => {
								let _ = warn!("worker handler generated error: {}", e);
							}
						},
						Ok(None) => break,
						Err(e) => {
							let _ = warn!("worker queue generated error: {}", e);
							break;
						}
					}
				}),
			ErrKind::IllegalState,
			"could not spawn worker thread"
		)?;

		Ok(Self {
			queue,
			handle: Some(handle),
		})
	}

	/// The queue feeding this worker.
	pub fn queue(&self) -> &BlockingQueue<T> {
		&self.queue
	}

	/// Stop the worker after the queue has been drained. Items pushed before this
	/// call are processed before the thread exits.
	pub fn stop(&mut self) -> Result<(), Error> {
		self.queue.wait_empty()?;
		self.queue.stop()?;
		self.join_thread()
	}

	/// Stop the worker discarding any unprocessed items.
	pub fn abort(&mut self) -> Result<(), Error> {
		self.queue.stop()?;
		while self.queue.try_pop()?.is_some() {}
		self.join_thread()
	}

	fn join_thread(&mut self) -> Result<(), Error> {
		match self.handle.take() {
			Some(handle) => match handle.join() {
				Ok(_) => Ok(()),
				Err(_) => Err(err!(ErrKind::ThreadPanic, "worker thread panicked")),
			},
			None => Ok(()),
		}
	}
}

impl<T> Drop for WorkerLoop<T> {
	fn drop(&mut self) {
		let _ = self.queue.stop();
		if let Some(handle) = self.handle.take() {
			let _ = handle.join();
		}
	}
}
