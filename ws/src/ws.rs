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
use crate::types::{WsGrammar, WsMessage, WsMessageType};
use mux_deps::base64;
use mux_deps::byteorder::{BigEndian, ByteOrder};
use mux_deps::rand::random;
use mux_deps::rand_core::{OsRng, RngCore};
use mux_deps::sha1::{Digest, Sha1};
use mux_err::*;
use mux_log::*;
use mux_net::{FrameGrammar, FrameParseOutcome, ParseOne};
use std::str::from_utf8;

debug!();

impl WsGrammar {
	pub fn new() -> Self {
		Self {
			frag_type: None,
			frag_payload: vec![],
		}
	}
}

impl Default for WsGrammar {
	fn default() -> Self {
		Self::new()
	}
}

impl FrameGrammar for WsGrammar {
	type Message = WsMessage;

	fn header_size(&self) -> usize {
		2
	}

	fn payload_size(&self, chunk: &[u8]) -> Result<usize, Error> {
		if chunk.len() < 2 {
			let text = "websocket header bytes not available";
			return Err(err!(ErrKind::CorruptedData, text));
		}
		let mask = (chunk[1] & MASK_BIT) != 0;
		let len7 = chunk[1] & PAYLOAD_LEN_MASK;
		let (ext, payload_len) = if len7 == 126 {
			if chunk.len() < 4 {
				let text = "websocket extended length bytes not available";
				return Err(err!(ErrKind::CorruptedData, text));
			}
			(2, BigEndian::read_u16(&chunk[2..4]) as usize)
		} else if len7 == 127 {
			if chunk.len() < 10 {
				let text = "websocket extended length bytes not available";
				return Err(err!(ErrKind::CorruptedData, text));
			}
			(8, try_into!(BigEndian::read_u64(&chunk[2..10]))?)
		} else {
			(0, len7 as usize)
		};
		Ok(ext + if mask { 4 } else { 0 } + payload_len)
	}

	fn is_valid(&self, header: &[u8]) -> bool {
		if header.len() < 2 || (header[0] & RSV_MASK) != 0 {
			return false;
		}
		matches!(
			header[0] & OP_CODE_MASK,
			OP_CONTINUATION | OP_TEXT | OP_BINARY | OP_CLOSE | OP_PING | OP_PONG
		)
	}

	fn parse_one(&mut self, chunk: &[u8]) -> ParseOne<WsMessage> {
		if chunk.len() < 2 {
			return ParseOne::incomplete(FrameParseOutcome::ShortHeader);
		}
		if !self.is_valid(&chunk[0..2]) {
			let _ = debug!(
				"dropping invalid websocket header: {:02x} {:02x}",
				chunk[0], chunk[1]
			);
			return ParseOne::incomplete(FrameParseOutcome::ProtocolError);
		}

		let fin = (chunk[0] & FIN_BIT) != 0;
		let opcode = chunk[0] & OP_CODE_MASK;
		let mask = (chunk[1] & MASK_BIT) != 0;
		let len7 = chunk[1] & PAYLOAD_LEN_MASK;

		// 126/127 escape to 16/64 bit extended lengths, see rfc 6455
		let (ext, payload_len) = if len7 == 126 {
			if chunk.len() < 4 {
				return ParseOne::incomplete(FrameParseOutcome::ShortHeader);
			}
			(2, BigEndian::read_u16(&chunk[2..4]) as usize)
		} else if len7 == 127 {
			if chunk.len() < 10 {
				return ParseOne::incomplete(FrameParseOutcome::ShortHeader);
			}
			match usize::try_from(BigEndian::read_u64(&chunk[2..10])) {
				Ok(payload_len) => (8, payload_len),
				Err(_) => return ParseOne::incomplete(FrameParseOutcome::ProtocolError),
			}
		} else {
			(0, len7 as usize)
		};

		let start_content = 2 + ext + if mask { 4 } else { 0 };
		let total = start_content + payload_len;
		if chunk.len() < total {
			return ParseOne::incomplete(FrameParseOutcome::ShortPayload);
		}

		let mut payload = chunk[start_content..total].to_vec();
		if mask {
			let mut masking_bytes = [0u8; 4];
			masking_bytes.clone_from_slice(&chunk[start_content - 4..start_content]);
			for i in 0..payload.len() {
				payload[i] ^= masking_bytes[i % 4];
			}
		}

		// control frames may not be fragmented
		if !fin {
			match opcode {
				OP_TEXT => {
					self.frag_type = Some(WsMessageType::Text);
					self.frag_payload = payload;
				}
				OP_BINARY => {
					self.frag_type = Some(WsMessageType::Binary);
					self.frag_payload = payload;
				}
				OP_CONTINUATION => {
					if self.frag_type.is_none() {
						return ParseOne::incomplete(FrameParseOutcome::ProtocolError);
					}
					self.frag_payload.extend_from_slice(&payload);
				}
				_ => return ParseOne::incomplete(FrameParseOutcome::ProtocolError),
			}
			return ParseOne::buffered(total);
		}

		let (mtype, payload) = if opcode == OP_CONTINUATION {
			match self.frag_type.take() {
				Some(mtype) => {
					let mut merged = std::mem::take(&mut self.frag_payload);
					merged.extend_from_slice(&payload);
					(mtype, merged)
				}
				None => return ParseOne::incomplete(FrameParseOutcome::ProtocolError),
			}
		} else {
			let mtype = match opcode {
				OP_TEXT => WsMessageType::Text,
				OP_BINARY => WsMessageType::Binary,
				OP_CLOSE => WsMessageType::Close,
				OP_PING => WsMessageType::Ping,
				OP_PONG => WsMessageType::Pong,
				_ => return ParseOne::incomplete(FrameParseOutcome::ProtocolError),
			};
			(mtype, payload)
		};

		ParseOne::success(WsMessage { mtype, payload }, total)
	}
}

/// Serialize `message` into a single websocket frame with the fin bit set. With
/// `mask` set (client role) a random 4 byte masking key is generated and the payload
/// is masked.
pub fn frame_message(message: &WsMessage, mask: bool) -> Result<Vec<u8>, Error> {
	let mut ret: Vec<u8> = vec![];
	ret.resize(2, 0u8);

	ret[0] = FIN_BIT
		| match message.mtype {
			WsMessageType::Text => OP_TEXT,
			WsMessageType::Binary => OP_BINARY,
			WsMessageType::Close => OP_CLOSE,
			WsMessageType::Ping => OP_PING,
			WsMessageType::Pong => OP_PONG,
		};
	ret[1] = if mask { MASK_BIT } else { 0x00 };

	let mut masking_bytes = [0u8; 4];
	let payload_len = message.payload.len();
	let start_content = if payload_len < 126 {
		ret[1] |= payload_len as u8;
		if mask {
			ret.resize(6 + payload_len, 0u8);
			BigEndian::write_u32(&mut ret[2..6], OsRng.next_u32());
			masking_bytes.clone_from_slice(&ret[2..6]);
			6
		} else {
			ret.resize(2 + payload_len, 0u8);
			2
		}
	} else if payload_len <= u16::MAX.into() {
		ret[1] |= 126;
		if mask {
			ret.resize(8 + payload_len, 0u8);
		} else {
			ret.resize(4 + payload_len, 0u8);
		}
		BigEndian::write_u16(&mut ret[2..4], try_into!(payload_len)?);
		if mask {
			BigEndian::write_u32(&mut ret[4..8], OsRng.next_u32());
			masking_bytes.clone_from_slice(&ret[4..8]);
			8
		} else {
			4
		}
	} else {
		ret[1] |= 127;
		if mask {
			ret.resize(14 + payload_len, 0u8);
		} else {
			ret.resize(10 + payload_len, 0u8);
		}
		BigEndian::write_u64(&mut ret[2..10], try_into!(payload_len)?);
		if mask {
			BigEndian::write_u32(&mut ret[10..14], OsRng.next_u32());
			masking_bytes.clone_from_slice(&ret[10..14]);
			14
		} else {
			10
		}
	};

	ret[start_content..].clone_from_slice(&message.payload);

	if mask {
		for i in 0..payload_len {
			ret[i + start_content] ^= masking_bytes[i % 4];
		}
	}

	Ok(ret)
}

/// The `Sec-WebSocket-Accept` digest for the specified `Sec-WebSocket-Key` value.
pub fn handshake_accept_key(key: &str) -> String {
	let mut sha1 = Sha1::new();
	sha1.update(format!("{}{}", key, WEBSOCKET_GUID).as_bytes());
	base64::encode(&sha1.finalize()[..])
}

fn header_block_end(data: &[u8]) -> Option<usize> {
	let len = data.len();
	for i in 3..len {
		if data[i - 3] == b'\r' && data[i - 2] == b'\n' && data[i - 1] == b'\r' && data[i] == b'\n'
		{
			return Some(i + 1);
		}
	}
	None
}

/// Interpret `request` as a websocket upgrade request and produce the
/// `101 Switching Protocols` response. Returns [`None`] while the request block is
/// incomplete, the response together with the request block length once complete
/// (bytes pipelined behind the block are left for the framer), and an error if the
/// block carries no `Sec-WebSocket-Key` header. The signature matches
/// [`mux_net::Protocol::on_auth_response`] so a server protocol can delegate
/// directly.
pub fn handshake_server_response(request: &[u8]) -> Result<Option<(Vec<u8>, usize)>, Error> {
	let end_point = match header_block_end(request) {
		Some(end_point) => end_point,
		None => return Ok(None),
	};
	let text = from_utf8(&request[0..end_point])?;

	let mut key = None;
	for line in text.split("\r\n") {
		if let Some(pos) = line.find(':') {
			if line[0..pos].trim().eq_ignore_ascii_case("sec-websocket-key") {
				key = Some(line[pos + 1..].trim());
			}
		}
	}

	match key {
		Some(key) => {
			let response = format!(
				"HTTP/1.1 101 Switching Protocols\r\n\
Upgrade: websocket\r\n\
Connection: Upgrade\r\n\
Sec-WebSocket-Accept: {}\r\n\r\n",
				handshake_accept_key(key)
			);
			Ok(Some((response.into_bytes(), end_point)))
		}
		None => {
			let text = "upgrade request has no Sec-WebSocket-Key header";
			Err(err!(ErrKind::IllegalArgument, text))
		}
	}
}

/// Generate a websocket upgrade request for the specified host and path with a random
/// `Sec-WebSocket-Key`. The signature matches
/// [`mux_net::Protocol::on_auth_request`] so a client protocol can delegate directly.
pub fn handshake_client_request(host: &str, path: &str) -> Result<Vec<u8>, Error> {
	let bytes: [u8; 16] = random();
	let key = base64::encode(bytes);
	let request = format!(
		"GET {} HTTP/1.1\r\n\
Host: {}\r\n\
Sec-WebSocket-Key: {}\r\n\
Sec-WebSocket-Version: 13\r\n\
Upgrade: websocket\r\n\
Connection: Upgrade\r\n\r\n",
		path, host, key
	);
	Ok(request.into_bytes())
}

/// Verify the server's handshake response. Returns [`None`] while the response block
/// is incomplete, the block length once a `101` status line arrives, and an error for
/// any other status. The signature matches
/// [`mux_net::Protocol::on_auth_verify`] so a client protocol can delegate directly.
pub fn handshake_client_verify(response: &[u8]) -> Result<Option<usize>, Error> {
	let end_point = match header_block_end(response) {
		Some(end_point) => end_point,
		None => return Ok(None),
	};
	let text = from_utf8(&response[0..end_point])?;
	if text.starts_with("HTTP/1.1 101") {
		Ok(Some(end_point))
	} else {
		let fmt = format!("unexpected handshake response: {}", text);
		Err(err!(ErrKind::IllegalState, fmt))
	}
}
