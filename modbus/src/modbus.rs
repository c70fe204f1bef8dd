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
use crate::types::{ModbusGrammar, ModbusMessage, ReadRequest};
use mux_deps::byteorder::{BigEndian, ByteOrder};
use mux_err::*;
use mux_log::*;
use mux_net::{FrameGrammar, FrameParseOutcome, ParseOne};

debug!();

impl ModbusGrammar {
	/// A grammar accepting the default (device, function) pairs: the broadcast
	/// device id `0xFF` with the standard register read function codes.
	pub fn new() -> Self {
		Self {
			allowed: DEFAULT_ALLOWED.to_vec(),
		}
	}

	/// A grammar accepting only the specified (device, function) pairs.
	pub fn with_allowed(allowed: Vec<(u8, u8)>) -> Self {
		Self { allowed }
	}
}

impl Default for ModbusGrammar {
	fn default() -> Self {
		Self::new()
	}
}

impl FrameGrammar for ModbusGrammar {
	type Message = ModbusMessage;

	fn header_size(&self) -> usize {
		HEADER_SIZE
	}

	fn payload_size(&self, chunk: &[u8]) -> Result<usize, Error> {
		if chunk.len() < 6 {
			let text = "modbus length bytes not available";
			return Err(err!(ErrKind::CorruptedData, text));
		}
		let length = BigEndian::read_u16(&chunk[4..6]) as usize;
		if length < 2 {
			let fmt = format!("modbus length field too small: {}", length);
			return Err(err!(ErrKind::CorruptedData, fmt));
		}
		Ok(length - 2)
	}

	fn is_valid(&self, header: &[u8]) -> bool {
		if header.len() < HEADER_SIZE {
			return false;
		}
		let version = BigEndian::read_u16(&header[2..4]);
		let length = BigEndian::read_u16(&header[4..6]);
		version == 0 && length >= 2 && self.allowed.contains(&(header[6], header[7]))
	}

	fn parse_one(&mut self, chunk: &[u8]) -> ParseOne<ModbusMessage> {
		if chunk.len() < HEADER_SIZE {
			return ParseOne::incomplete(FrameParseOutcome::ShortHeader);
		}
		if !self.is_valid(&chunk[0..HEADER_SIZE]) {
			let _ = debug!(
				"dropping invalid modbus header: {:?}",
				&chunk[0..HEADER_SIZE]
			);
			return ParseOne::incomplete(FrameParseOutcome::ProtocolError);
		}

		let length = BigEndian::read_u16(&chunk[4..6]);
		let total = HEADER_SIZE + (length as usize - 2);
		if chunk.len() < total {
			return ParseOne::incomplete(FrameParseOutcome::ShortPayload);
		}

		let message = ModbusMessage {
			seq: BigEndian::read_u16(&chunk[0..2]),
			version: BigEndian::read_u16(&chunk[2..4]),
			length,
			device: chunk[6],
			function: chunk[7],
			payload: chunk[HEADER_SIZE..total].to_vec(),
		};
		ParseOne::success(message, total)
	}
}

impl ModbusMessage {
	/// Build a request message. The length field is derived from the payload.
	pub fn request(seq: u16, device: u8, function: u8, payload: Vec<u8>) -> Result<Self, Error> {
		Ok(Self {
			seq,
			version: 0,
			length: try_into!(payload.len() + 2)?,
			device,
			function,
			payload,
		})
	}

	/// Serialize into wire bytes. The length field is recomputed from the payload so
	/// the frame is always self-consistent.
	pub fn to_vec(&self) -> Result<Vec<u8>, Error> {
		let length: u16 = try_into!(self.payload.len() + 2)?;
		let mut ret = vec![0u8; HEADER_SIZE];
		BigEndian::write_u16(&mut ret[0..2], self.seq);
		BigEndian::write_u16(&mut ret[2..4], self.version);
		BigEndian::write_u16(&mut ret[4..6], length);
		ret[6] = self.device;
		ret[7] = self.function;
		ret.extend_from_slice(&self.payload);
		Ok(ret)
	}
}

impl ReadRequest {
	/// Decode a read request from a message payload.
	pub fn from_payload(payload: &[u8]) -> Result<Self, Error> {
		if payload.len() < 4 {
			let fmt = format!("read request payload too short: {}", payload.len());
			return Err(err!(ErrKind::CorruptedData, fmt));
		}
		Ok(Self {
			start_address: BigEndian::read_u16(&payload[0..2]),
			count: BigEndian::read_u16(&payload[2..4]),
		})
	}

	pub fn to_payload(&self) -> Vec<u8> {
		let mut ret = vec![0u8; 4];
		BigEndian::write_u16(&mut ret[0..2], self.start_address);
		BigEndian::write_u16(&mut ret[2..4], self.count);
		ret
	}
}
