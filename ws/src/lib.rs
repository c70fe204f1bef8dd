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

//! # The MuxNet Websocket crate
//! Websocket protocol adapter for the MuxNet engine: [`crate::WsGrammar`] implements
//! [`mux_net::FrameGrammar`] over the websocket frame format, [`crate::frame_message`]
//! serializes outbound frames (optionally masked for the client role), and the
//! `handshake_*` functions implement the HTTP upgrade exchange with signatures that
//! plug into the engine's authentication callbacks.
//!
//! # Examples
//!
//!```
//! use mux_err::*;
//! use mux_net::FrameParser;
//! use mux_ws::*;
//!
//! fn main() -> Result<(), Error> {
//!     let mut parser = FrameParser::new(Box::new(WsGrammar::new()));
//!
//!     // a single unmasked text frame, payload "Hello"
//!     let messages = parser.parse(vec![vec![0x81, 0x05, 0x48, 0x65, 0x6C, 0x6C, 0x6F]])?;
//!
//!     assert_eq!(messages.len(), 1);
//!     assert_eq!(messages[0].mtype, WsMessageType::Text);
//!     assert_eq!(messages[0].payload, b"Hello");
//!     assert!(parser.remainder().is_empty());
//!     Ok(())
//! }
//!```

mod constants;
#[cfg(test)]
mod test;
mod types;
mod ws;

pub use crate::types::{WsGrammar, WsMessage, WsMessageType};
pub use crate::ws::{
	frame_message, handshake_accept_key, handshake_client_request, handshake_client_verify,
	handshake_server_response,
};
