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

//! # The MuxNet Net crate
//! This crate is the core of MuxNet: a non-blocking, multiplexed tcp/ip engine. A
//! [`crate::Network`] owns one reactor thread which demultiplexes socket readiness via
//! epoll and a liveness checker thread which surfaces half-open peers. Each connection
//! owns a dedicated outbound writer thread and an inbound processing thread, decoupled
//! from the reactor by bounded blocking queues. Applications implement the
//! [`crate::Protocol`] trait and supply a [`crate::FrameGrammar`] describing the wire
//! framing; the [`crate::FrameParser`] turns the stream of arbitrarily sized recv
//! chunks into complete messages regardless of where the chunk boundaries fall.
//!
//! In server mode the engine accepts peers on a listener subject to a global
//! `MaxClients` cap and a per source ip cap. In client mode it maintains one outbound
//! connection, reconnecting with backoff and rotating through a comma separated
//! endpoint list. An optional pre-framing authentication exchange (for example a
//! Websocket style handshake) gates the transition to
//! [`crate::ConnState::ReadyToWork`].
//!
//! # Examples
//!
//!```
//! use mux_err::*;
//! use mux_net::*;
//!
//! // a one byte length prefix followed by a utf8 payload
//! struct LineGrammar {}
//!
//! impl FrameGrammar for LineGrammar {
//!     type Message = String;
//!
//!     fn header_size(&self) -> usize {
//!         1
//!     }
//!
//!     fn payload_size(&self, chunk: &[u8]) -> Result<usize, Error> {
//!         Ok(chunk[0] as usize)
//!     }
//!
//!     fn is_valid(&self, _header: &[u8]) -> bool {
//!         true
//!     }
//!
//!     fn parse_one(&mut self, chunk: &[u8]) -> ParseOne<String> {
//!         if chunk.len() < 1 {
//!             return ParseOne::incomplete(FrameParseOutcome::ShortHeader);
//!         }
//!         let len = chunk[0] as usize;
//!         if chunk.len() < 1 + len {
//!             return ParseOne::incomplete(FrameParseOutcome::ShortPayload);
//!         }
//!         match String::from_utf8(chunk[1..1 + len].to_vec()) {
//!             Ok(message) => ParseOne::success(message, 1 + len),
//!             Err(_) => ParseOne::incomplete(FrameParseOutcome::ProtocolError),
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), Error> {
//!     let mut parser = FrameParser::new(Box::new(LineGrammar {}));
//!
//!     // two messages split at an arbitrary chunk boundary
//!     let chunks = vec![vec![2, b'h', b'i', 5, b't'], vec![b'h', b'e', b'r', b'e']];
//!     let messages = parser.parse(chunks)?;
//!
//!     assert_eq!(messages, vec!["hi".to_string(), "there".to_string()]);
//!     assert!(parser.remainder().is_empty());
//!     Ok(())
//! }
//!```

mod builder;
mod conn;
mod constants;
mod frame;
mod linux;
mod net;
#[cfg(test)]
mod test;
mod types;

pub use crate::frame::FrameParser;
pub use crate::linux::PlainTransport;
pub use crate::types::{
	ConnState, FrameGrammar, FrameParseOutcome, Handle, NetBuilder, NetMode, Network, ParseOne,
	Protocol, SendHandle, Transport,
};
