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
	use crate as mux_test;
	use mux_err::*;
	use mux_test::*;
	use std::fs::File;
	use std::io::Write;
	use std::net::TcpListener;
	use std::path::PathBuf;

	#[test]
	fn test_test_info_directory() -> Result<(), Error> {
		let directory;
		{
			let test_info = test_info!()?;
			directory = test_info.directory().clone();
			assert!(PathBuf::from(&directory).exists());

			// the directory is usable
			let mut path = PathBuf::from(&directory);
			path.push("file.txt");
			let mut file = File::create(path.as_path())?;
			file.write(b"test")?;
		}
		// removed on drop
		assert!(!PathBuf::from(&directory).exists());
		Ok(())
	}

	#[test]
	fn test_free_port() -> Result<(), Error> {
		let port = free_port!()?;
		// the port can be bound
		let listener = TcpListener::bind(format!("127.0.0.1:{}", port))?;
		drop(listener);

		// successive calls do not return the same port
		let port2 = free_port!()?;
		assert_ne!(port, port2);

		Ok(())
	}

	#[test]
	fn test_sync_channel() -> Result<(), Error> {
		let test_info = test_info!()?;
		let (tx, rx) = test_info.sync_channel();
		tx.send(())?;
		rx.recv()?;
		Ok(())
	}
}
