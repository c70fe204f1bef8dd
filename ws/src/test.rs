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

#[cfg(test)]
mod test {
	use crate as mux_ws;
	use mux_conf::ConfigOption::*;
	use mux_err::*;
	use mux_net::*;
	use mux_test::*;
	use mux_ws::*;
	use std::io::{Read, Write};
	use std::net::TcpStream;
	use std::thread::sleep;
	use std::time::Duration;

	fn make_parser() -> FrameParser<WsMessage> {
		FrameParser::new(Box::new(WsGrammar::new()))
	}

	// fin=1, opcode=text, length=5, payload "Hello"
	const HELLO_FRAME: [u8; 7] = [0x81, 0x05, 0x48, 0x65, 0x6C, 0x6C, 0x6F];

	#[test]
	fn test_ws_text_frame() -> Result<(), Error> {
		let mut parser = make_parser();
		let messages = parser.parse(vec![HELLO_FRAME.to_vec()])?;
		assert_eq!(messages.len(), 1);
		assert_eq!(messages[0].mtype, WsMessageType::Text);
		assert_eq!(messages[0].payload, b"Hello");
		assert!(parser.remainder().is_empty());
		Ok(())
	}

	#[test]
	fn test_ws_chunking_independence() -> Result<(), Error> {
		// a stream of three frames parsed identically at every split size
		let mut stream = vec![];
		stream.extend_from_slice(&HELLO_FRAME);
		stream.extend_from_slice(&frame_message(
			&WsMessage {
				mtype: WsMessageType::Binary,
				payload: vec![1, 2, 3],
			},
			false,
		)?);
		stream.extend_from_slice(&frame_message(
			&WsMessage {
				mtype: WsMessageType::Ping,
				payload: vec![],
			},
			false,
		)?);

		for split in 1..stream.len() {
			let mut parser = make_parser();
			let mut messages = vec![];
			for chunk in stream.chunks(split) {
				messages.extend(parser.parse(vec![chunk.to_vec()])?);
			}
			assert_eq!(messages.len(), 3);
			assert_eq!(messages[0].payload, b"Hello");
			assert_eq!(messages[1].mtype, WsMessageType::Binary);
			assert_eq!(messages[1].payload, vec![1, 2, 3]);
			assert_eq!(messages[2].mtype, WsMessageType::Ping);
			assert!(parser.remainder().is_empty());
		}
		Ok(())
	}

	#[test]
	fn test_ws_masked_round_trip() -> Result<(), Error> {
		let message = WsMessage {
			mtype: WsMessageType::Text,
			payload: b"masked payload".to_vec(),
		};
		let bytes = frame_message(&message, true)?;
		// mask bit set, 4 byte key present
		assert_eq!(bytes[1] & 0x80, 0x80);
		assert_eq!(bytes.len(), 2 + 4 + message.payload.len());

		let mut parser = make_parser();
		let messages = parser.parse(vec![bytes])?;
		assert_eq!(messages, vec![message]);
		Ok(())
	}

	#[test]
	fn test_ws_extended_lengths() -> Result<(), Error> {
		// 16 bit escape
		let message = WsMessage {
			mtype: WsMessageType::Binary,
			payload: vec![7u8; 500],
		};
		let bytes = frame_message(&message, false)?;
		assert_eq!(bytes[1] & 0x7F, 126);
		let mut parser = make_parser();
		let messages = parser.parse(vec![bytes])?;
		assert_eq!(messages, vec![message]);

		// 64 bit escape
		let message = WsMessage {
			mtype: WsMessageType::Binary,
			payload: vec![9u8; 70_000],
		};
		let bytes = frame_message(&message, true)?;
		assert_eq!(bytes[1] & 0x7F, 127);
		let mut parser = make_parser();
		let messages = parser.parse(vec![bytes])?;
		assert_eq!(messages, vec![message]);
		Ok(())
	}

	#[test]
	fn test_ws_fragmentation() -> Result<(), Error> {
		// fin=0 text "Hel", fin=1 continuation "lo" merge to a single text message
		let frame1 = vec![0x01, 0x03, b'H', b'e', b'l'];
		let frame2 = vec![0x80, 0x02, b'l', b'o'];

		let mut parser = make_parser();
		let messages = parser.parse(vec![frame1])?;
		assert!(messages.is_empty());
		let messages = parser.parse(vec![frame2])?;
		assert_eq!(messages.len(), 1);
		assert_eq!(messages[0].mtype, WsMessageType::Text);
		assert_eq!(messages[0].payload, b"Hello");
		Ok(())
	}

	#[test]
	fn test_ws_protocol_errors() -> Result<(), Error> {
		// reserved bits set, chunk dropped, the next chunk still parses
		let mut parser = make_parser();
		let messages = parser.parse(vec![vec![0xF1, 0x01, 0x41], HELLO_FRAME.to_vec()])?;
		assert_eq!(messages.len(), 1);
		assert_eq!(messages[0].payload, b"Hello");

		// unsupported opcode
		let mut parser = make_parser();
		let messages = parser.parse(vec![vec![0x83, 0x01, 0x41]])?;
		assert!(messages.is_empty());

		// fragmented ping is not allowed
		let mut parser = make_parser();
		let messages = parser.parse(vec![vec![0x09, 0x01, 0x41]])?;
		assert!(messages.is_empty());

		// continuation with no fragment in progress
		let mut parser = make_parser();
		let messages = parser.parse(vec![vec![0x80, 0x01, 0x41]])?;
		assert!(messages.is_empty());
		Ok(())
	}

	#[test]
	fn test_handshake_accept_key() -> Result<(), Error> {
		// rfc 6455 section 1.3 sample
		assert_eq!(
			handshake_accept_key("dGhlIHNhbXBsZSBub25jZQ=="),
			"s3pPLMBiTxaQ9kYGzzhZRbK+xOo="
		);
		Ok(())
	}

	#[test]
	fn test_handshake_server_response() -> Result<(), Error> {
		let request = b"GET / HTTP/1.1\r\n\
Host: example\r\n\
Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
Upgrade: websocket\r\n\r\n";

		// incomplete block accumulates
		assert!(handshake_server_response(&request[0..20])?.is_none());

		let (response, consumed) = handshake_server_response(request)?.unwrap();
		let text = std::str::from_utf8(&response)?;
		assert!(text.starts_with("HTTP/1.1 101"));
		assert!(text.contains("Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo="));
		assert_eq!(consumed, request.len());

		// a frame pipelined behind the block is not consumed
		let mut pipelined = request.to_vec();
		pipelined.extend_from_slice(&HELLO_FRAME);
		let (_, consumed) = handshake_server_response(&pipelined)?.unwrap();
		assert_eq!(consumed, request.len());

		// complete block with no key is an error
		assert!(handshake_server_response(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").is_err());
		Ok(())
	}

	#[test]
	fn test_handshake_client() -> Result<(), Error> {
		let request = handshake_client_request("127.0.0.1:8080", "/chat")?;
		let text = std::str::from_utf8(&request)?;
		assert!(text.starts_with("GET /chat HTTP/1.1\r\n"));
		assert!(text.contains("Sec-WebSocket-Key: "));
		assert!(text.ends_with("\r\n\r\n"));

		let response = b"HTTP/1.1 101 Switching Protocols\r\nUpgrade: websocket\r\n\r\n";
		assert!(handshake_client_verify(&response[0..10])?.is_none());
		assert_eq!(handshake_client_verify(response)?, Some(response.len()));
		assert!(handshake_client_verify(b"HTTP/1.1 400 Bad Request\r\n\r\n").is_err());
		Ok(())
	}

	struct WsEchoServer {}

	impl Protocol for WsEchoServer {
		type Message = WsMessage;

		fn grammar(&self) -> Box<dyn FrameGrammar<Message = WsMessage> + Send> {
			Box::new(WsGrammar::new())
		}

		fn on_connected(&mut self, _send_handle: &SendHandle) -> Result<(), Error> {
			Ok(())
		}

		fn on_message(
			&mut self,
			send_handle: &SendHandle,
			messages: Vec<WsMessage>,
		) -> Result<(), Error> {
			for message in messages {
				send_handle.send(frame_message(&message, false)?)?;
			}
			Ok(())
		}

		fn on_disconnected(&mut self, _id: u128) -> Result<(), Error> {
			Ok(())
		}

		fn on_auth_response(&mut self, data: &[u8]) -> Result<Option<(Vec<u8>, usize)>, Error> {
			handshake_server_response(data)
		}
	}

	#[test]
	fn test_ws_echo_over_network() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());

		let mut network = NetBuilder::build_network(
			WsEchoServer {},
			vec![Endpoints(addr.clone()), IsServer(true), NeedAuth(true)],
		)?;
		network.start()?;

		let mut strm = {
			let mut count = 0;
			loop {
				match TcpStream::connect(&addr) {
					Ok(strm) => break strm,
					Err(_) => {
						count += 1;
						assert!(count < 500);
						sleep(Duration::from_millis(10));
					}
				}
			}
		};
		strm.set_read_timeout(Some(Duration::from_secs(30)))?;

		// http upgrade exchange
		strm.write_all(&handshake_client_request(&addr, "/")?)?;
		strm.flush()?;
		let mut buf = vec![];
		loop {
			let mut scratch = [0u8; 1024];
			let n = strm.read(&mut scratch)?;
			assert!(n > 0);
			buf.extend_from_slice(&scratch[0..n]);
			if let Some(end_point) = handshake_client_verify(&buf)? {
				buf.drain(0..end_point);
				break;
			}
		}

		// a masked text frame is echoed back unmasked
		strm.write_all(&frame_message(
			&WsMessage {
				mtype: WsMessageType::Text,
				payload: b"Hello".to_vec(),
			},
			true,
		)?)?;
		strm.flush()?;

		let mut echo = vec![0u8; 7 - buf.len()];
		strm.read_exact(&mut echo)?;
		buf.extend_from_slice(&echo);
		assert_eq!(buf, HELLO_FRAME.to_vec());

		network.stop()?;
		network.wait_for_stop()?;
		Ok(())
	}
}
