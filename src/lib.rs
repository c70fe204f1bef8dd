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

//! # MuxNet
//!
//! <p align="center">Core libraries for the MuxNet networking engine.</p>
//!
//! MuxNet is a non-blocking, multiplexed tcp/ip engine. A single reactor thread
//! demultiplexes socket readiness over epoll for many concurrent connections, in
//! server or client mode, while per-connection worker threads handle framing,
//! message dispatch, and outbound writes behind bounded queues. Protocol adapters
//! for Websocket and Modbus-TCP sit atop the engine and exercise its framing and
//! connection-lifecycle contracts.
//!
//! # Crates
//!
//! The repository is a workspace of small crates:
//!
//! * `mux_net` - the engine: epoll poller, non-blocking socket ops, the
//!   incremental [`mux_net::FrameParser`], the connection state machine, and the
//!   reactor with `MaxClients`/per-ip admission control, liveness checking, and
//!   client-side reconnect.
//! * `mux_ws` - Websocket adapter: frame grammar, frame serialization with
//!   optional masking, and the HTTP upgrade handshake wired into the engine's
//!   authentication callbacks.
//! * `mux_modbus` - Modbus-TCP adapter: MBAP-style frame grammar and the register
//!   read request codec.
//! * `mux_log`, `mux_err`, `mux_conf`, `mux_util`, `mux_test`, `mux_deps` -
//!   logging, error handling, configuration, locking/queueing utilities, test
//!   tooling, and the consolidated dependency crate.
//!
//! # MuxNet Net crate
//!
//! Applications implement [`mux_net::Protocol`] and supply a
//! [`mux_net::FrameGrammar`] describing the wire framing. The engine turns the
//! stream of arbitrarily sized recv chunks into complete messages regardless of
//! where the chunk boundaries fall, and delivers them on a per-connection inbound
//! thread. A cloneable [`mux_net::SendHandle`] enqueues outbound data for the
//! connection's dedicated writer thread.
//!
//! # MuxNet Modbus crate
//!
//! A short example of the framing layer on its own:
//!
//!```
//! use mux_err::*;
//! use mux_modbus::*;
//! use mux_net::FrameParser;
//!
//! fn main() -> Result<(), Error> {
//!     let mut parser = FrameParser::new(Box::new(ModbusGrammar::new()));
//!
//!     // a read input registers request, delivered in two arbitrary chunks
//!     let messages = parser.parse(vec![
//!         vec![0x00, 0x01, 0x00, 0x00, 0x00],
//!         vec![0x06, 0xFF, 0x04, 0x00, 0x01, 0x00, 0x01],
//!     ])?;
//!
//!     assert_eq!(messages.len(), 1);
//!     let request = ReadRequest::from_payload(&messages[0].payload)?;
//!     assert_eq!(request.start_address, 1);
//!     assert_eq!(request.count, 1);
//!     Ok(())
//! }
//!```
//!
//! # MuxNet Websocket crate
//!
//! The Websocket adapter plugs the upgrade handshake into the engine's
//! pre-framing authentication exchange, so a connection only reaches
//! `ReadyToWork` after `101 Switching Protocols`:
//!
//!```
//! use mux_err::*;
//! use mux_net::FrameParser;
//! use mux_ws::*;
//!
//! fn main() -> Result<(), Error> {
//!     // rfc 6455 sample key
//!     assert_eq!(
//!         handshake_accept_key("dGhlIHNhbXBsZSBub25jZQ=="),
//!         "s3pPLMBiTxaQ9kYGzzhZRbK+xOo="
//!     );
//!
//!     // a single unmasked text frame, payload "Hello"
//!     let mut parser = FrameParser::new(Box::new(WsGrammar::new()));
//!     let messages = parser.parse(vec![vec![0x81, 0x05, 0x48, 0x65, 0x6C, 0x6C, 0x6F]])?;
//!     assert_eq!(messages[0].payload, b"Hello");
//!     Ok(())
//! }
//!```
//!
//! The `muxnet` binary in this crate runs a Websocket echo server on port 8080.
