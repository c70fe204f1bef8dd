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

use crate::types::TestInfoImpl;
use crate::{TestBuilder, TestInfo};
use mux_deps::backtrace;
use mux_deps::portpicker::is_free;
use mux_deps::rand::random;
use mux_err::Error;
use std::fs::{create_dir_all, remove_dir_all};
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::{sleep, spawn};
use std::time::Duration;

// global counter for getting a port number
static GLOBAL_NEXT_PORT: AtomicU16 = AtomicU16::new(9000);

const TIMEOUT: u64 = 60_000;

/// Pick a free port that does not collide with recently assigned ports. This is used
/// in tests throughout the various MuxNet crates.
pub(crate) fn pick_free_port() -> Result<u16, Error> {
	loop {
		let port = GLOBAL_NEXT_PORT.fetch_add(1, Ordering::SeqCst);
		let port = if port == 9000 {
			let rand: u16 = random();
			let rand = rand % 10_000;
			GLOBAL_NEXT_PORT.fetch_add(rand, Ordering::SeqCst);
			rand + 9000
		} else {
			port
		};

		if is_free(port) {
			return Ok(port);
		}
	}
}

impl TestBuilder {
	/// build a [`crate::TestInfo`] implementation. If `preserve` is [`true`] the test
	/// directory is kept when the returned value goes out of scope.
	pub fn build_test_info(preserve: bool) -> Result<Box<dyn TestInfo>, Error> {
		Ok(Box::new(TestInfoImpl::new(preserve)?))
	}
}

impl TestInfo for TestInfoImpl {
	fn directory(&self) -> &String {
		&self.directory
	}

	fn port(&self) -> u16 {
		self.port
	}
	fn sync_channel(&self) -> (SyncSender<()>, Receiver<()>) {
		self.sync_channel_impl(TIMEOUT)
	}
}

impl TestInfoImpl {
	pub(crate) fn new(preserve: bool) -> Result<Self, Error> {
		let mut directory = Default::default();
		backtrace::trace(|frame| {
			backtrace::resolve_frame(frame, |symbol| {
				// don't think symbol.name() can be none, but this is only used in
				// tests, so even if it is, it's ok.
				directory = symbol.name().unwrap().to_string();
			});
			// wait until we get to the actual test directory name.
			if !directory.starts_with("backtrace")
				&& !directory.contains("mux_test::types::TestInfoImpl")
				&& !directory.contains("mux_test::impls::")
				&& !directory.contains("mux_test::types::TestBuilder")
			{
				false
			} else {
				true
			}
		});

		let port = pick_free_port()?;
		let directory = directory.replace("::", "_").to_string();
		let directory = format!(".{}.mux", directory);
		let d = directory.clone();
		// remove the directory if it existed from a previous failed run
		let _ = remove_dir_all(d);
		let d = directory.clone();
		let _ = create_dir_all(d);

		let ret = Self {
			directory,
			port,
			preserve,
		};
		Ok(ret)
	}

	pub(crate) fn sync_channel_impl(&self, timeout: u64) -> (SyncSender<()>, Receiver<()>) {
		let (tx, rx) = sync_channel(1);
		let tx_clone = tx.clone();
		spawn(move || -> Result<(), Error> {
			sleep(Duration::from_millis(timeout));
			let _ = tx_clone.send(());
			Ok(())
		});
		(tx, rx)
	}
}

impl Drop for TestInfoImpl {
	fn drop(&mut self) {
		// if we're not preserving the directory, delete it on drop.
		if !self.preserve {
			let _ = remove_dir_all(self.directory.clone());
		}
	}
}
