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

#[cfg(test)]
mod test {
	use crate as mux_util;
	use mux_err::*;
	use mux_test::*;
	use mux_util::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;
	use std::thread::{sleep, spawn};
	use std::time::Duration;

	#[test]
	fn test_lock_box() -> Result<(), Error> {
		let test_info = test_info!()?;
		let mut lock = lock_box!(5)?;
		let lock_clone = lock.clone();

		let (tx, rx) = test_info.sync_channel();

		spawn(move || -> Result<(), Error> {
			let mut guard = lock.wlock()?;
			*guard += 1;

			tx.send(())?;

			Ok(())
		});

		rx.recv()?;
		let guard = lock_clone.rlock()?;
		assert_eq!(*guard, 6);

		Ok(())
	}

	#[test]
	fn test_lock_box_ignore_poison() -> Result<(), Error> {
		let mut lock = lock_box!(1u32)?;
		let mut lock_clone = lock.clone();

		let _ = spawn(move || -> Result<(), Error> {
			let _guard = lock_clone.wlock()?;
			panic!("poison the lock");
		})
		.join();

		// regular lock returns the poison error
		assert!(lock.rlock().is_err());

		// ignore_poison proceeds
		assert_eq!(*(lock.rlock_ignore_poison()?), 1);
		*(lock.wlock_ignore_poison()?) = 2;
		assert_eq!(*(lock.rlock_ignore_poison()?), 2);

		Ok(())
	}

	#[test]
	fn test_blocking_queue_basic() -> Result<(), Error> {
		let queue = blocking_queue!(10)?;
		assert_eq!(queue.capacity(), 10);
		assert!(queue.is_empty()?);

		queue.push(1)?;
		queue.push(2)?;
		assert_eq!(queue.len()?, 2);

		assert_eq!(queue.pop()?, Some(1));
		assert_eq!(queue.pop()?, Some(2));
		assert_eq!(queue.try_pop()?, None);

		Ok(())
	}

	#[test]
	fn test_blocking_queue_zero_capacity() -> Result<(), Error> {
		let queue: Result<BlockingQueue<u8>, Error> = blocking_queue!(0);
		assert!(queue.is_err());
		Ok(())
	}

	#[test]
	fn test_blocking_queue_full() -> Result<(), Error> {
		let queue = blocking_queue!(2)?;
		queue.push(1)?;
		queue.push(2)?;

		// try_push does not block, it returns CapacityExceeded
		match queue.try_push(3) {
			Err(e) => match e.kind() {
				ErrorKind::CapacityExceeded(_) => {}
				_ => panic!("wrong kind"),
			},
			Ok(_) => panic!("expected error"),
		}

		// a blocked push completes once an item is popped
		let queue_clone = queue.clone();
		let handle = spawn(move || -> Result<(), Error> { queue_clone.push(3) });
		sleep(Duration::from_millis(50));
		assert_eq!(queue.pop()?, Some(1));
		handle.join().unwrap()?;
		assert_eq!(queue.pop()?, Some(2));
		assert_eq!(queue.pop()?, Some(3));

		Ok(())
	}

	#[test]
	fn test_blocking_queue_stop_drains() -> Result<(), Error> {
		let queue = blocking_queue!(10)?;
		queue.push(1)?;
		queue.push(2)?;
		queue.stop()?;

		// pushes fail after stop
		assert!(queue.push(3).is_err());
		assert!(queue.try_push(3).is_err());

		// remaining items drain, then None
		assert_eq!(queue.pop()?, Some(1));
		assert_eq!(queue.pop()?, Some(2));
		assert_eq!(queue.pop()?, None);

		Ok(())
	}

	#[test]
	fn test_blocking_queue_stop_unblocks_pop() -> Result<(), Error> {
		let queue: BlockingQueue<u8> = blocking_queue!(10)?;
		let queue_clone = queue.clone();
		let handle = spawn(move || -> Result<Option<u8>, Error> { queue_clone.pop() });
		sleep(Duration::from_millis(50));
		queue.stop()?;
		assert_eq!(handle.join().unwrap()?, None);
		Ok(())
	}

	#[test]
	fn test_worker_loop_processes_all_items() -> Result<(), Error> {
		let count = Arc::new(AtomicUsize::new(0));
		let count_clone = count.clone();
		let queue = blocking_queue!(100)?;
		let mut worker = UtilBuilder::build_worker_loop(
			"test-worker",
			queue.clone(),
			Box::new(move |v: usize| {
				count_clone.fetch_add(v, Ordering::Relaxed);
				Ok(())
			}),
		)?;

		for i in 0..100 {
			queue.push(i)?;
		}

		// stop drains the queue before the thread exits
		worker.stop()?;
		assert_eq!(count.load(Ordering::Relaxed), (0..100).sum());

		Ok(())
	}

	#[test]
	fn test_worker_loop_handler_error_continues() -> Result<(), Error> {
		let count = Arc::new(AtomicUsize::new(0));
		let count_clone = count.clone();
		let queue = blocking_queue!(10)?;
		let mut worker = UtilBuilder::build_worker_loop(
			"test-worker-err",
			queue.clone(),
			Box::new(move |v: usize| {
				if v == 1 {
					return Err(err!(ErrKind::Test, "simulated"));
				}
				count_clone.fetch_add(1, Ordering::Relaxed);
				Ok(())
			}),
		)?;

		queue.push(0)?;
		queue.push(1)?;
		queue.push(2)?;
		worker.stop()?;

		// the item that errored is skipped, the rest are processed
		assert_eq!(count.load(Ordering::Relaxed), 2);

		Ok(())
	}

	#[test]
	fn test_worker_loop_abort() -> Result<(), Error> {
		let queue = blocking_queue!(10)?;
		let mut worker = UtilBuilder::build_worker_loop(
			"test-worker-abort",
			queue.clone(),
			Box::new(move |_: usize| {
				sleep(Duration::from_millis(10));
				Ok(())
			}),
		)?;

		for i in 0..10 {
			queue.push(i)?;
		}

		// abort does not wait for the queue to drain
		worker.abort()?;
		Ok(())
	}
}
