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

/// The type of a websocket message.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WsMessageType {
	Text,
	Binary,
	Ping,
	Pong,
	Close,
}

/// A complete websocket message. Multi-frame messages arrive merged into a single
/// [`WsMessage`] with the type of the initial frame.
#[derive(Clone, Debug, PartialEq)]
pub struct WsMessage {
	pub mtype: WsMessageType,
	pub payload: Vec<u8>,
}

/// A [`mux_net::FrameGrammar`] for the websocket frame format: fin bit, reserved bits
/// (must be 0), 4 bit opcode, mask bit, 7 bit length with 16/64 bit escapes, optional
/// 4 byte masking key, payload. Frames with fin=0 are buffered inside the grammar and
/// merged when the fin=1 frame arrives.
pub struct WsGrammar {
	pub(crate) frag_type: Option<WsMessageType>,
	pub(crate) frag_payload: Vec<u8>,
}
