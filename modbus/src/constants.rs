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

// 2 byte seq + 2 byte version + 2 byte length + 1 byte device + 1 byte function
pub(crate) const HEADER_SIZE: usize = 8;

pub const FUNCTION_READ_COILS: u8 = 0x01;
pub const FUNCTION_READ_DISCRETE_INPUTS: u8 = 0x02;
pub const FUNCTION_READ_HOLDING_REGISTERS: u8 = 0x03;
pub const FUNCTION_READ_INPUT_REGISTERS: u8 = 0x04;

pub(crate) const DEFAULT_ALLOWED: &[(u8, u8)] = &[
	(0xFF, FUNCTION_READ_COILS),
	(0xFF, FUNCTION_READ_DISCRETE_INPUTS),
	(0xFF, FUNCTION_READ_HOLDING_REGISTERS),
	(0xFF, FUNCTION_READ_INPUT_REGISTERS),
];
