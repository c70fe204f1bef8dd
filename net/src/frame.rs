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

use crate::types::{FrameGrammar, FrameParseOutcome};
use mux_err::Error;
use mux_log::*;
use std::collections::VecDeque;

debug!();

/// Incremental message framer. Converts an ordered sequence of raw byte chunks (each
/// one recv call's worth of bytes, not aligned to message boundaries) into complete
/// messages, carrying any trailing partial frame as the remainder for the next call.
/// The remainder is the sole state carried between calls; chunking never affects the
/// emitted message sequence.
pub struct FrameParser<M> {
	grammar: Box<dyn FrameGrammar<Message = M> + Send>,
	remainder: Vec<u8>,
}

impl<M> FrameParser<M> {
	pub fn new(grammar: Box<dyn FrameGrammar<Message = M> + Send>) -> Self {
		Self {
			grammar,
			remainder: vec![],
		}
	}

	/// Whether the grammar declares no framing. Raw chunks bypass this parser.
	pub fn is_raw(&self) -> bool {
		self.grammar.header_size() == 0
	}

	/// The partial frame bytes carried over from the last [`crate::FrameParser::parse`]
	/// call.
	pub fn remainder(&self) -> &[u8] {
		&self.remainder
	}

	/// Discard any carried partial frame.
	pub fn clear(&mut self) {
		self.remainder.clear();
	}

	/// Parse the chunks in order, prepending the carried remainder to the first chunk.
	/// Messages are emitted in framing-completion order. An unparseable chunk is
	/// dropped in its entirety and parsing resumes at the next chunk boundary.
	pub fn parse(&mut self, chunks: Vec<Vec<u8>>) -> Result<Vec<M>, Error> {
		let mut messages = vec![];
		let mut list: VecDeque<Vec<u8>> = VecDeque::from(chunks);

		if !self.remainder.is_empty() {
			let mut first = std::mem::take(&mut self.remainder);
			if let Some(next) = list.pop_front() {
				first.extend_from_slice(&next);
			}
			list.push_front(first);
		}

		'chunks: while let Some(mut chunk) = list.pop_front() {
			if chunk.is_empty() {
				continue;
			}
			loop {
				let event = self.grammar.parse_one(&chunk);
				match event.outcome {
					FrameParseOutcome::Success => {
						if let Some(message) = event.message {
							messages.push(message);
						}
						if event.consumed < chunk.len() {
							// back-to-back messages within one chunk, re-run
							// on the in-chunk tail
							chunk.drain(..event.consumed);
						} else {
							continue 'chunks;
						}
					}
					FrameParseOutcome::ProtocolError => {
						debug!("dropping {} unparseable bytes", chunk.len())?;
						continue 'chunks;
					}
					FrameParseOutcome::ShortHeader => match list.pop_front() {
						Some(next) => chunk.extend_from_slice(&next),
						None => {
							self.remainder = chunk;
							break 'chunks;
						}
					},
					FrameParseOutcome::ShortPayload => {
						let needed =
							self.grammar.header_size() + self.grammar.payload_size(&chunk)?;
						while chunk.len() < needed {
							match list.pop_front() {
								Some(next) => chunk.extend_from_slice(&next),
								None => {
									self.remainder = chunk;
									break 'chunks;
								}
							}
						}
					}
				}
			}
		}

		Ok(messages)
	}
}
