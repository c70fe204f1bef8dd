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

use crate::constants::*;
use crate::types::{Conn, ConnState, ConnTable, SendHandle, WriteItem};
use crate::Handle;
use mux_err::Error;
use mux_util::LockBox;
use std::collections::{HashMap, VecDeque};

impl SendHandle {
	/// The socket descriptor of this connection.
	pub fn handle(&self) -> Handle {
		self.handle
	}

	/// The unique id of this connection. This value is passed to
	/// [`crate::Protocol::on_disconnected`] when the connection goes away.
	pub fn id(&self) -> u128 {
		self.id
	}

	/// The current lifecycle state of this connection.
	pub fn state(&self) -> Result<ConnState, Error> {
		Ok(*(self.state.rlock()?))
	}

	/// Enqueue `data` for writing on the connection's dedicated writer thread.
	/// Returns [`false`] without enqueueing if the connection is not in the
	/// [`crate::ConnState::PeerConnected`] or [`crate::ConnState::ReadyToWork`] state.
	pub fn send(&self, data: Vec<u8>) -> Result<bool, Error> {
		match *(self.state.rlock()?) {
			ConnState::PeerConnected | ConnState::ReadyToWork => {
				self.queue.push(WriteItem::Data(data))?;
				Ok(true)
			}
			_ => Ok(false),
		}
	}

	/// Request an orderly close: the socket is shut down after all previously
	/// enqueued data has been written.
	pub fn close(&self) -> Result<(), Error> {
		self.queue.push(WriteItem::Close)
	}
}

impl Conn {
	pub(crate) fn send_handle(&self) -> SendHandle {
		SendHandle {
			handle: self.handle,
			id: self.id,
			state: self.state.clone(),
			queue: self.out_queue.clone(),
		}
	}
}

impl ConnTable {
	pub(crate) fn new() -> Self {
		Self {
			conns: HashMap::new(),
			per_ip: HashMap::new(),
			recycle: VecDeque::new(),
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.conns.len()
	}

	pub(crate) fn ip_count(&self, ip: &str) -> usize {
		match self.per_ip.get(ip) {
			Some(count) => *count,
			None => 0,
		}
	}

	pub(crate) fn insert(&mut self, conn: Conn) {
		let count = self.ip_count(&conn.peer_ip);
		self.per_ip.insert(conn.peer_ip.clone(), count + 1);
		self.conns.insert(conn.handle, conn);
	}

	pub(crate) fn remove(&mut self, handle: Handle) -> Option<Conn> {
		let conn = self.conns.remove(&handle)?;
		let count = self.ip_count(&conn.peer_ip);
		if count <= 1 {
			self.per_ip.remove(&conn.peer_ip);
		} else {
			self.per_ip.insert(conn.peer_ip.clone(), count - 1);
		}
		Some(conn)
	}

	/// Take a pooled auth buffer if one is available. The caller clears it before
	/// reuse.
	pub(crate) fn checkout_recycled(&mut self) -> Option<Vec<u8>> {
		self.recycle.pop_front()
	}

	/// Pool a disconnected connection's auth buffer, bounded so the pool itself
	/// cannot grow without limit. The connection's state box is deliberately not
	/// pooled: send handles retained by the application keep reading it and must
	/// continue to observe [`crate::ConnState::Disconnected`].
	pub(crate) fn recycle(&mut self, auth_buf: Vec<u8>) {
		if self.recycle.len() < RECYCLE_POOL_MAX {
			self.recycle.push_back(auth_buf);
		}
	}
}
