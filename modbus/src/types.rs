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

/// A complete Modbus-TCP message: the 8 byte header fields plus the `length - 2`
/// payload bytes that follow the function code.
#[derive(Clone, Debug, PartialEq)]
pub struct ModbusMessage {
	pub seq: u16,
	pub version: u16,
	pub length: u16,
	pub device: u8,
	pub function: u8,
	pub payload: Vec<u8>,
}

/// The payload of a register read request: 2 byte big-endian start address and 2 byte
/// big-endian register count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReadRequest {
	pub start_address: u16,
	pub count: u16,
}

/// A [`mux_net::FrameGrammar`] for the Modbus-TCP frame format: 2 byte big-endian
/// sequence, 2 byte big-endian version (must be 0), 2 byte big-endian length, 1 byte
/// device id, 1 byte function code, then `length - 2` payload bytes. A frame is only
/// valid if its (device, function) pair is in the grammar's allowed set.
pub struct ModbusGrammar {
	pub(crate) allowed: Vec<(u8, u8)>,
}
