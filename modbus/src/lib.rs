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

//! # The MuxNet Modbus crate
//! Modbus-TCP protocol adapter for the MuxNet engine: [`crate::ModbusGrammar`]
//! implements [`mux_net::FrameGrammar`] over the MBAP-style frame format and
//! [`crate::ReadRequest`] codes the register read request payload.
//!
//! # Examples
//!
//!```
//! use mux_err::*;
//! use mux_modbus::*;
//! use mux_net::FrameParser;
//!
//! fn main() -> Result<(), Error> {
//!     let mut parser = FrameParser::new(Box::new(ModbusGrammar::new()));
//!
//!     // seq=1, version=0, length=6, device=0xFF, function=0x04 (read input
//!     // registers), start address 1, count 1
//!     let bytes = vec![
//!         0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0xFF, 0x04, 0x00, 0x01, 0x00, 0x01,
//!     ];
//!     let messages = parser.parse(vec![bytes])?;
//!
//!     assert_eq!(messages.len(), 1);
//!     assert_eq!(messages[0].seq, 1);
//!     assert_eq!(messages[0].function, 0x04);
//!
//!     let request = ReadRequest::from_payload(&messages[0].payload)?;
//!     assert_eq!(request.start_address, 1);
//!     assert_eq!(request.count, 1);
//!     Ok(())
//! }
//!```

mod constants;
mod modbus;
mod types;

pub use crate::constants::{
	FUNCTION_READ_COILS, FUNCTION_READ_DISCRETE_INPUTS, FUNCTION_READ_HOLDING_REGISTERS,
	FUNCTION_READ_INPUT_REGISTERS,
};
pub use crate::types::{ModbusGrammar, ModbusMessage, ReadRequest};
