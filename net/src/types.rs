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

use mux_err::Error;
use mux_util::{BlockingQueue, LockBox, WorkerLoop};
use std::collections::{HashMap, VecDeque};
use std::fmt::{Debug, Formatter};
use std::os::fd::RawFd;

/// The type of a socket descriptor on this platform.
pub type Handle = RawFd;

/// The lifecycle state of a connection. A connection starts in
/// [`crate::ConnState::Undefined`], moves to [`crate::ConnState::PeerConnected`] once the
/// peer socket exists, and to [`crate::ConnState::ReadyToWork`] after the authentication
/// exchange completes (immediately, if authentication is not configured). Any i/o error
/// or explicit disconnect moves the connection to [`crate::ConnState::Disconnected`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnState {
	Undefined,
	PeerConnected,
	ReadyToWork,
	Disconnected,
}

/// Whether a connection was accepted by a listener or initiated by this side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetMode {
	Server,
	Client,
}

/// The outcome of a single [`crate::FrameGrammar::parse_one`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameParseOutcome {
	/// The leading bytes do not form a valid frame header. The parser drops the
	/// offending chunk and resumes at the next chunk boundary.
	ProtocolError,
	/// A complete message was parsed.
	Success,
	/// Not enough bytes are available to read the frame header.
	ShortHeader,
	/// The header was read, but the declared payload exceeds the available bytes.
	ShortPayload,
}

/// The result of a single [`crate::FrameGrammar::parse_one`] call. `consumed` is the
/// number of bytes the message occupied within the chunk and is only meaningful on
/// [`crate::FrameParseOutcome::Success`].
pub struct ParseOne<M> {
	pub outcome: FrameParseOutcome,
	pub message: Option<M>,
	pub consumed: usize,
}

impl<M> ParseOne<M> {
	/// A [`crate::FrameParseOutcome::Success`] result consuming `consumed` bytes.
	pub fn success(message: M, consumed: usize) -> Self {
		Self {
			outcome: FrameParseOutcome::Success,
			message: Some(message),
			consumed,
		}
	}

	/// A [`crate::FrameParseOutcome::Success`] result consuming `consumed` bytes
	/// without emitting a message. Used by grammars that buffer partial messages
	/// internally (for example multi-frame merging).
	pub fn buffered(consumed: usize) -> Self {
		Self {
			outcome: FrameParseOutcome::Success,
			message: None,
			consumed,
		}
	}

	/// A result with no message for the specified outcome.
	pub fn incomplete(outcome: FrameParseOutcome) -> Self {
		Self {
			outcome,
			message: None,
			consumed: 0,
		}
	}
}

/// The wire framing contract a protocol supplies to the engine. The
/// [`crate::FrameParser`] drives this strategy over a stream of arbitrarily sized byte
/// chunks. A grammar with `header_size() == 0` declares "no framing configured" and the
/// engine delivers raw chunks via [`crate::Protocol::on_raw`] instead.
pub trait FrameGrammar {
	type Message;
	/// The fixed number of bytes required before the frame length can be determined.
	fn header_size(&self) -> usize;
	/// The number of bytes following the fixed header for the frame at the head of
	/// `chunk`. Only called after `parse_one` reported
	/// [`crate::FrameParseOutcome::ShortPayload`], so at least `header_size()` bytes
	/// are present.
	fn payload_size(&self, chunk: &[u8]) -> Result<usize, Error>;
	/// Whether the leading `header_size()` bytes form a valid frame header.
	fn is_valid(&self, header: &[u8]) -> bool;
	/// Attempt to parse one message from the head of `chunk`. Grammars that merge
	/// multi-frame messages may carry state across calls, hence `&mut self`.
	fn parse_one(&mut self, chunk: &[u8]) -> ParseOne<Self::Message>;
}

/// The capability interface a protocol implements to receive engine events. All
/// callbacks for a single connection are invoked in order; callbacks for different
/// connections may interleave. The authentication callbacks are only used when
/// `NeedAuth(true)` is configured and operate on raw bytes before framing begins.
pub trait Protocol: Send + Sync + 'static {
	type Message: Send + 'static;

	/// Build a fresh framing grammar for a new connection.
	fn grammar(&self) -> Box<dyn FrameGrammar<Message = Self::Message> + Send>;

	/// A connection reached [`crate::ConnState::ReadyToWork`].
	fn on_connected(&mut self, send_handle: &SendHandle) -> Result<(), Error>;

	/// One or more complete messages arrived on a connection.
	fn on_message(
		&mut self,
		send_handle: &SendHandle,
		messages: Vec<Self::Message>,
	) -> Result<(), Error>;

	/// Raw chunks arrived on a connection whose grammar declares no framing.
	fn on_raw(&mut self, send_handle: &SendHandle, chunks: Vec<Vec<u8>>) -> Result<(), Error> {
		let _ = (send_handle, chunks);
		Ok(())
	}

	/// A connection was disconnected. `id` is the value previously returned by
	/// [`crate::SendHandle::id`] for this connection.
	fn on_disconnected(&mut self, id: u128) -> Result<(), Error>;

	/// Client side: the bytes to write as the authentication request at the first
	/// outbound opportunity.
	fn on_auth_request(&mut self) -> Result<Vec<u8>, Error> {
		Ok(vec![])
	}

	/// Server side: interpret the accumulated inbound bytes as the authentication
	/// request. Return `None` if the request is not yet complete, or the response
	/// bytes together with the number of bytes the request occupied (any pipelined
	/// remainder is fed to the framer). An error disconnects the peer.
	fn on_auth_response(&mut self, data: &[u8]) -> Result<Option<(Vec<u8>, usize)>, Error> {
		let _ = data;
		Ok(Some((vec![], 0)))
	}

	/// Client side: verify the accumulated authentication response. Return `None` if
	/// the response is not yet complete, the number of bytes the response occupied on
	/// success (any remainder is fed to the framer), or an error to disconnect.
	fn on_auth_verify(&mut self, data: &[u8]) -> Result<Option<usize>, Error> {
		let _ = data;
		Ok(Some(0))
	}
}

/// The byte level i/o seam. The engine ships [`crate::PlainTransport`] which reads and
/// writes the socket directly; an encrypting transport can be slotted in at
/// construction via [`crate::NetBuilder::build_network_with_transport`]. Return values
/// follow the underlying system call convention: negative on error with the error in
/// errno.
pub trait Transport: Send + Sync {
	fn read(&self, handle: Handle, buf: &mut [u8]) -> isize;
	fn write(&self, handle: Handle, buf: &[u8]) -> isize;
	fn shutdown(&self, handle: Handle);
}

/// A clonable handle the application uses to write to a connection from any thread.
/// Obtained via the [`crate::Protocol::on_connected`] callback.
#[derive(Clone)]
pub struct SendHandle {
	pub(crate) handle: Handle,
	pub(crate) id: u128,
	pub(crate) state: Box<dyn LockBox<ConnState>>,
	pub(crate) queue: BlockingQueue<WriteItem>,
}

impl Debug for SendHandle {
	fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
		write!(f, "SendHandle<handle={},id={}>", self.handle, self.id)
	}
}

/// A running network engine, either a server (accepting peers on a listener) or a
/// client (maintaining one outbound connection with reconnect). Built via
/// [`crate::NetBuilder::build_network`]. The boxed engine handle can be moved to or
/// shared with other threads.
pub trait Network: Send {
	/// Start the reactor and liveness threads. Returns an error if the engine is
	/// already running or the polling facility cannot be created.
	fn start(&mut self) -> Result<(), Error>;
	/// Request a cooperative stop. Returns immediately; use
	/// [`crate::Network::wait_for_stop`] to join.
	fn stop(&mut self) -> Result<(), Error>;
	/// Block until the reactor and liveness threads have exited.
	fn wait_for_stop(&mut self) -> Result<(), Error>;
	/// Request disconnection of the specified handle. Idempotent.
	fn disconnect(&mut self, handle: Handle) -> Result<(), Error>;
	/// The number of live connections in the table.
	fn connection_count(&self) -> Result<usize, Error>;
}

/// Builder struct used to build the structures in this crate.
pub struct NetBuilder {}

// Crate local structures

/// An item on a connection's outbound queue. `Close` shuts the socket down after all
/// previously queued data has been written.
pub(crate) enum WriteItem {
	Data(Vec<u8>),
	Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AuthState {
	AwaitingRequest,
	AwaitingResponse,
	Complete,
}

pub(crate) struct Conn {
	pub(crate) handle: Handle,
	pub(crate) id: u128,
	pub(crate) peer_ip: String,
	pub(crate) mode: NetMode,
	pub(crate) state: Box<dyn LockBox<ConnState>>,
	pub(crate) auth: AuthState,
	pub(crate) auth_buf: Vec<u8>,
	pub(crate) out_queue: BlockingQueue<WriteItem>,
	pub(crate) out_worker: WorkerLoop<WriteItem>,
	pub(crate) in_queue: BlockingQueue<Vec<Vec<u8>>>,
	pub(crate) in_worker: WorkerLoop<Vec<Vec<u8>>>,
	pub(crate) last_read: u128,
}

pub(crate) struct ConnTable {
	pub(crate) conns: HashMap<Handle, Conn>,
	pub(crate) per_ip: HashMap<String, usize>,
	// pooled auth buffers only; the state box is never reused because retained
	// send handles still observe it
	pub(crate) recycle: VecDeque<Vec<u8>>,
}

#[derive(Clone, Debug)]
pub(crate) struct NetConfig {
	pub(crate) endpoints: Vec<String>,
	pub(crate) is_server: bool,
	pub(crate) need_auth: bool,
	pub(crate) max_clients: usize,
	pub(crate) max_per_ip: usize,
	pub(crate) net_timeout: u16,
	pub(crate) liveness_frequency_millis: usize,
	pub(crate) queue_capacity: usize,
	pub(crate) backlog: usize,
	pub(crate) debug: bool,
}
