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
	use crate as mux_net;
	use mux_conf::ConfigOption::*;
	use mux_err::*;
	use mux_net::*;
	use mux_test::*;
	use std::io::{Read, Write};
	use std::net::TcpStream;
	use std::sync::atomic::{AtomicBool, Ordering};
	use std::sync::mpsc::SyncSender;
	use std::sync::Arc;
	use std::thread::{sleep, spawn};
	use std::time::Duration;

	// a 3 byte header (0xAB magic, 2 byte big-endian length) followed by a utf8
	// payload
	struct TestGrammar {}

	impl FrameGrammar for TestGrammar {
		type Message = String;

		fn header_size(&self) -> usize {
			3
		}

		fn payload_size(&self, chunk: &[u8]) -> Result<usize, Error> {
			Ok(u16::from_be_bytes([chunk[1], chunk[2]]) as usize)
		}

		fn is_valid(&self, header: &[u8]) -> bool {
			header[0] == 0xAB
		}

		fn parse_one(&mut self, chunk: &[u8]) -> ParseOne<String> {
			if chunk.len() < 3 {
				return ParseOne::incomplete(FrameParseOutcome::ShortHeader);
			}
			if !self.is_valid(&chunk[0..3]) {
				return ParseOne::incomplete(FrameParseOutcome::ProtocolError);
			}
			let len = u16::from_be_bytes([chunk[1], chunk[2]]) as usize;
			if chunk.len() < 3 + len {
				return ParseOne::incomplete(FrameParseOutcome::ShortPayload);
			}
			match String::from_utf8(chunk[3..3 + len].to_vec()) {
				Ok(message) => ParseOne::success(message, 3 + len),
				Err(_) => ParseOne::incomplete(FrameParseOutcome::ProtocolError),
			}
		}
	}

	fn frame(message: &str) -> Vec<u8> {
		let mut ret = vec![0xAB];
		ret.extend_from_slice(&(message.len() as u16).to_be_bytes());
		ret.extend_from_slice(message.as_bytes());
		ret
	}

	fn parser() -> FrameParser<String> {
		FrameParser::new(Box::new(TestGrammar {}))
	}

	#[test]
	fn test_frame_parser_round_trip() -> Result<(), Error> {
		let mut stream = vec![];
		for message in ["a", "second", "third message"] {
			stream.extend_from_slice(&frame(message));
		}

		// every chunking of the same stream yields the same messages
		for split in 1..stream.len() {
			let mut parser = parser();
			let mut messages = vec![];
			for chunk in stream.chunks(split) {
				messages.extend(parser.parse(vec![chunk.to_vec()])?);
			}
			assert_eq!(
				messages,
				vec![
					"a".to_string(),
					"second".to_string(),
					"third message".to_string()
				]
			);
			assert!(parser.remainder().is_empty());
		}
		Ok(())
	}

	#[test]
	fn test_frame_parser_multiple_per_chunk() -> Result<(), Error> {
		let mut chunk = frame("one");
		chunk.extend_from_slice(&frame("two"));
		chunk.extend_from_slice(&frame("three"));

		let mut parser = parser();
		let messages = parser.parse(vec![chunk])?;
		assert_eq!(
			messages,
			vec!["one".to_string(), "two".to_string(), "three".to_string()]
		);
		Ok(())
	}

	#[test]
	fn test_frame_parser_short_header() -> Result<(), Error> {
		let bytes = frame("hello");
		let mut parser = parser();

		// fewer bytes than the header, no message, carried as the remainder
		let messages = parser.parse(vec![bytes[0..2].to_vec()])?;
		assert!(messages.is_empty());
		assert_eq!(parser.remainder(), &bytes[0..2]);

		// fully recoverable once the rest arrives
		let messages = parser.parse(vec![bytes[2..].to_vec()])?;
		assert_eq!(messages, vec!["hello".to_string()]);
		assert!(parser.remainder().is_empty());
		Ok(())
	}

	#[test]
	fn test_frame_parser_short_payload() -> Result<(), Error> {
		let bytes = frame("a longer payload");
		let mut parser = parser();

		// header complete, payload short, accumulate across calls
		let messages = parser.parse(vec![bytes[0..5].to_vec()])?;
		assert!(messages.is_empty());
		let messages = parser.parse(vec![bytes[5..9].to_vec()])?;
		assert!(messages.is_empty());
		let messages = parser.parse(vec![bytes[9..].to_vec()])?;
		assert_eq!(messages, vec!["a longer payload".to_string()]);
		Ok(())
	}

	#[test]
	fn test_frame_parser_short_payload_multi_chunk() -> Result<(), Error> {
		let bytes = frame("a longer payload");
		let mut parser = parser();

		// the payload spans several chunks within a single call
		let chunks = vec![
			bytes[0..5].to_vec(),
			bytes[5..9].to_vec(),
			bytes[9..].to_vec(),
			frame("next"),
		];
		let messages = parser.parse(chunks)?;
		assert_eq!(
			messages,
			vec!["a longer payload".to_string(), "next".to_string()]
		);
		Ok(())
	}

	#[test]
	fn test_frame_parser_protocol_error_resync() -> Result<(), Error> {
		let mut parser = parser();

		// an invalid chunk is dropped in its entirety, the stream continues at the
		// next chunk boundary
		let messages = parser.parse(vec![vec![0xFF, 0x00, 0x01, 0x99], frame("ok")])?;
		assert_eq!(messages, vec!["ok".to_string()]);
		Ok(())
	}

	struct EchoServer {}

	impl Protocol for EchoServer {
		type Message = String;

		fn grammar(&self) -> Box<dyn FrameGrammar<Message = String> + Send> {
			Box::new(TestGrammar {})
		}

		fn on_connected(&mut self, _send_handle: &SendHandle) -> Result<(), Error> {
			Ok(())
		}

		fn on_message(
			&mut self,
			send_handle: &SendHandle,
			messages: Vec<String>,
		) -> Result<(), Error> {
			for message in messages {
				send_handle.send(frame(&message))?;
			}
			Ok(())
		}

		fn on_disconnected(&mut self, _id: u128) -> Result<(), Error> {
			Ok(())
		}
	}

	struct EchoClient {
		tx: SyncSender<String>,
		greeting: String,
	}

	impl Protocol for EchoClient {
		type Message = String;

		fn grammar(&self) -> Box<dyn FrameGrammar<Message = String> + Send> {
			Box::new(TestGrammar {})
		}

		fn on_connected(&mut self, send_handle: &SendHandle) -> Result<(), Error> {
			send_handle.send(frame(&self.greeting))?;
			Ok(())
		}

		fn on_message(
			&mut self,
			_send_handle: &SendHandle,
			messages: Vec<String>,
		) -> Result<(), Error> {
			for message in messages {
				self.tx.send(message)?;
			}
			Ok(())
		}

		fn on_disconnected(&mut self, _id: u128) -> Result<(), Error> {
			Ok(())
		}
	}

	fn connect_with_retry(addr: &str) -> Result<TcpStream, Error> {
		let mut count = 0;
		loop {
			match TcpStream::connect(addr) {
				Ok(strm) => {
					strm.set_read_timeout(Some(Duration::from_secs(30)))?;
					return Ok(strm);
				}
				Err(e) => {
					count += 1;
					if count > 500 {
						return Err(err!(ErrKind::Test, "could not connect to {}: {}", addr, e));
					}
					sleep(Duration::from_millis(10));
				}
			}
		}
	}

	fn wait_for<F>(mut cond: F) -> Result<(), Error>
	where
		F: FnMut() -> Result<bool, Error>,
	{
		for _ in 0..1_000 {
			if cond()? {
				return Ok(());
			}
			sleep(Duration::from_millis(10));
		}
		Err(err!(ErrKind::Timeout, "condition was not met within the timeout"))
	}

	fn echo_round_trip(strm: &mut TcpStream, message: &str) -> Result<(), Error> {
		let bytes = frame(message);
		// split mid-header to exercise reassembly over the wire
		strm.write_all(&bytes[0..2])?;
		strm.flush()?;
		sleep(Duration::from_millis(20));
		strm.write_all(&bytes[2..])?;
		strm.flush()?;

		let mut buf = vec![0u8; bytes.len()];
		strm.read_exact(&mut buf)?;
		assert_eq!(buf, bytes);
		Ok(())
	}

	#[test]
	fn test_server_echo() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());

		let mut network = NetBuilder::build_network(
			EchoServer {},
			vec![Endpoints(addr.clone()), IsServer(true)],
		)?;
		network.start()?;

		let mut strm = connect_with_retry(&addr)?;
		echo_round_trip(&mut strm, "hello")?;
		echo_round_trip(&mut strm, "a second message on the same connection")?;

		network.stop()?;
		network.wait_for_stop()?;
		Ok(())
	}

	#[test]
	fn test_client_server_echo() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());

		let mut server = NetBuilder::build_network(
			EchoServer {},
			vec![Endpoints(addr.clone()), IsServer(true)],
		)?;
		server.start()?;

		let (tx, rx) = std::sync::mpsc::sync_channel(10);
		let mut client = NetBuilder::build_network(
			EchoClient {
				tx,
				greeting: "ping".to_string(),
			},
			vec![Endpoints(addr.clone())],
		)?;
		client.start()?;

		let echoed = map_err!(
			rx.recv_timeout(Duration::from_secs(60)),
			ErrKind::Test,
			"no echo received"
		)?;
		assert_eq!(echoed, "ping");

		client.stop()?;
		client.wait_for_stop()?;
		server.stop()?;
		server.wait_for_stop()?;
		Ok(())
	}

	#[test]
	fn test_max_clients_cap() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());

		let mut network = NetBuilder::build_network(
			EchoServer {},
			vec![
				Endpoints(addr.clone()),
				IsServer(true),
				MaxClients(2),
				MaxPerIpConnections(10),
			],
		)?;
		network.start()?;

		let mut strm1 = connect_with_retry(&addr)?;
		echo_round_trip(&mut strm1, "one")?;
		let mut strm2 = connect_with_retry(&addr)?;
		echo_round_trip(&mut strm2, "two")?;

		// the third concurrent connection is rejected: the socket is closed without
		// a connection being created
		let mut strm3 = connect_with_retry(&addr)?;
		let mut buf = [0u8; 1];
		assert_eq!(strm3.read(&mut buf)?, 0);
		assert_eq!(network.connection_count()?, 2);

		// the first two remain usable
		echo_round_trip(&mut strm1, "still here")?;

		// after one disconnects a new connection is admitted
		drop(strm2);
		wait_for(|| Ok(network.connection_count()? < 2))?;
		let mut strm4 = connect_with_retry(&addr)?;
		echo_round_trip(&mut strm4, "admitted")?;

		network.stop()?;
		network.wait_for_stop()?;
		Ok(())
	}

	#[test]
	fn test_per_ip_cap() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());

		let mut network = NetBuilder::build_network(
			EchoServer {},
			vec![
				Endpoints(addr.clone()),
				IsServer(true),
				MaxClients(10),
				MaxPerIpConnections(1),
			],
		)?;
		network.start()?;

		let mut strm1 = connect_with_retry(&addr)?;
		echo_round_trip(&mut strm1, "one")?;

		// the global cap is not reached but the per ip limit is
		let mut strm2 = connect_with_retry(&addr)?;
		let mut buf = [0u8; 1];
		assert_eq!(strm2.read(&mut buf)?, 0);
		assert_eq!(network.connection_count()?, 1);

		network.stop()?;
		network.wait_for_stop()?;
		Ok(())
	}

	#[test]
	fn test_disconnect_cleanup() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());

		let mut network = NetBuilder::build_network(
			EchoServer {},
			vec![Endpoints(addr.clone()), IsServer(true)],
		)?;
		network.start()?;

		let mut strm = connect_with_retry(&addr)?;
		echo_round_trip(&mut strm, "hello")?;
		assert_eq!(network.connection_count()?, 1);

		drop(strm);
		wait_for(|| Ok(network.connection_count()? == 0))?;

		network.stop()?;
		network.wait_for_stop()?;
		Ok(())
	}

	struct AuthServer {}

	impl Protocol for AuthServer {
		type Message = String;

		fn grammar(&self) -> Box<dyn FrameGrammar<Message = String> + Send> {
			Box::new(TestGrammar {})
		}

		fn on_connected(&mut self, _send_handle: &SendHandle) -> Result<(), Error> {
			Ok(())
		}

		fn on_message(
			&mut self,
			send_handle: &SendHandle,
			messages: Vec<String>,
		) -> Result<(), Error> {
			for message in messages {
				send_handle.send(frame(&message))?;
			}
			Ok(())
		}

		fn on_disconnected(&mut self, _id: u128) -> Result<(), Error> {
			Ok(())
		}

		fn on_auth_response(&mut self, data: &[u8]) -> Result<Option<(Vec<u8>, usize)>, Error> {
			let end = match data.windows(4).position(|w| w == b"\r\n\r\n") {
				// the request block is not complete yet
				None => return Ok(None),
				Some(pos) => pos + 4,
			};
			if data[0..end].starts_with(b"AUTH ") {
				Ok(Some((b"OK\r\n\r\n".to_vec(), end)))
			} else {
				Err(err!(ErrKind::IllegalState, "invalid auth request"))
			}
		}
	}

	struct AuthClient {
		tx: SyncSender<String>,
	}

	impl Protocol for AuthClient {
		type Message = String;

		fn grammar(&self) -> Box<dyn FrameGrammar<Message = String> + Send> {
			Box::new(TestGrammar {})
		}

		fn on_connected(&mut self, send_handle: &SendHandle) -> Result<(), Error> {
			send_handle.send(frame("secure"))?;
			Ok(())
		}

		fn on_message(
			&mut self,
			_send_handle: &SendHandle,
			messages: Vec<String>,
		) -> Result<(), Error> {
			for message in messages {
				self.tx.send(message)?;
			}
			Ok(())
		}

		fn on_disconnected(&mut self, _id: u128) -> Result<(), Error> {
			Ok(())
		}

		fn on_auth_request(&mut self) -> Result<Vec<u8>, Error> {
			Ok(b"AUTH test\r\n\r\n".to_vec())
		}

		fn on_auth_verify(&mut self, data: &[u8]) -> Result<Option<usize>, Error> {
			if data.ends_with(b"\r\n\r\n") {
				Ok(Some(data.len()))
			} else {
				Ok(None)
			}
		}
	}

	#[test]
	fn test_auth_handshake() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());

		let mut server = NetBuilder::build_network(
			AuthServer {},
			vec![Endpoints(addr.clone()), IsServer(true), NeedAuth(true)],
		)?;
		server.start()?;

		let (tx, rx) = std::sync::mpsc::sync_channel(10);
		let mut client = NetBuilder::build_network(
			AuthClient { tx },
			vec![Endpoints(addr.clone()), NeedAuth(true)],
		)?;
		client.start()?;

		// on_connected only fires after the handshake, so an echoed message proves
		// the exchange completed on both sides
		let echoed = map_err!(
			rx.recv_timeout(Duration::from_secs(60)),
			ErrKind::Test,
			"no echo received"
		)?;
		assert_eq!(echoed, "secure");

		client.stop()?;
		client.wait_for_stop()?;
		server.stop()?;
		server.wait_for_stop()?;
		Ok(())
	}

	#[test]
	fn test_auth_pipelined_frames() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());

		let mut network = NetBuilder::build_network(
			AuthServer {},
			vec![Endpoints(addr.clone()), IsServer(true), NeedAuth(true)],
		)?;
		network.start()?;

		// the first frame rides in the same segment as the auth request and must
		// survive the handshake
		let mut strm = connect_with_retry(&addr)?;
		let mut bytes = b"AUTH test\r\n\r\n".to_vec();
		bytes.extend_from_slice(&frame("pipelined"));
		strm.write_all(&bytes)?;
		strm.flush()?;

		let expected = frame("pipelined");
		let mut buf = vec![0u8; 6 + expected.len()];
		strm.read_exact(&mut buf)?;
		assert_eq!(&buf[0..6], b"OK\r\n\r\n");
		assert_eq!(&buf[6..], &expected[..]);

		network.stop()?;
		network.wait_for_stop()?;
		Ok(())
	}

	struct StallServer {
		release: Arc<AtomicBool>,
	}

	impl Protocol for StallServer {
		type Message = String;

		fn grammar(&self) -> Box<dyn FrameGrammar<Message = String> + Send> {
			Box::new(TestGrammar {})
		}

		fn on_connected(&mut self, _send_handle: &SendHandle) -> Result<(), Error> {
			Ok(())
		}

		fn on_message(
			&mut self,
			send_handle: &SendHandle,
			messages: Vec<String>,
		) -> Result<(), Error> {
			for message in messages {
				if message == "stall" {
					// hold this inbound worker until the test releases it
					let mut count = 0;
					while !self.release.load(Ordering::SeqCst) {
						count += 1;
						if count > 3_000 {
							return Err(err!(ErrKind::Test, "stall was never released"));
						}
						sleep(Duration::from_millis(10));
					}
				} else {
					send_handle.send(frame(&message))?;
				}
			}
			Ok(())
		}

		fn on_disconnected(&mut self, _id: u128) -> Result<(), Error> {
			Ok(())
		}
	}

	#[test]
	fn test_slow_consumer_does_not_stall_engine() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());
		let release = Arc::new(AtomicBool::new(false));

		let mut network = NetBuilder::build_network(
			StallServer {
				release: release.clone(),
			},
			vec![Endpoints(addr.clone()), IsServer(true), QueueCapacity(1)],
		)?;
		network.start()?;

		// the first connection wedges its inbound worker and overflows its bounded
		// queue
		let mut strm1 = connect_with_retry(&addr)?;
		strm1.write_all(&frame("stall"))?;
		strm1.flush()?;
		sleep(Duration::from_millis(100));
		for _ in 0..4 {
			strm1.write_all(&frame("overflow"))?;
			strm1.flush()?;
			sleep(Duration::from_millis(20));
		}

		// the engine keeps admitting connections and answering the table while the
		// first consumer is stuck
		let mut strm2 = connect_with_retry(&addr)?;
		wait_for(|| Ok(network.connection_count()? == 2))?;

		release.store(true, Ordering::SeqCst);
		echo_round_trip(&mut strm2, "healthy")?;

		network.stop()?;
		network.wait_for_stop()?;
		Ok(())
	}

	struct CaptureServer {
		tx: SyncSender<SendHandle>,
	}

	impl Protocol for CaptureServer {
		type Message = String;

		fn grammar(&self) -> Box<dyn FrameGrammar<Message = String> + Send> {
			Box::new(TestGrammar {})
		}

		fn on_connected(&mut self, send_handle: &SendHandle) -> Result<(), Error> {
			self.tx.send(send_handle.clone())?;
			Ok(())
		}

		fn on_message(
			&mut self,
			send_handle: &SendHandle,
			messages: Vec<String>,
		) -> Result<(), Error> {
			for message in messages {
				send_handle.send(frame(&message))?;
			}
			Ok(())
		}

		fn on_disconnected(&mut self, _id: u128) -> Result<(), Error> {
			Ok(())
		}
	}

	#[test]
	fn test_retained_handle_survives_recycle() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());
		let (tx, rx) = std::sync::mpsc::sync_channel(10);

		let mut network = NetBuilder::build_network(
			CaptureServer { tx },
			vec![Endpoints(addr.clone()), IsServer(true)],
		)?;
		network.start()?;

		let strm1 = connect_with_retry(&addr)?;
		let handle1 = map_err!(
			rx.recv_timeout(Duration::from_secs(60)),
			ErrKind::Test,
			"no handle received"
		)?;
		assert_eq!(handle1.state()?, ConnState::ReadyToWork);

		drop(strm1);
		wait_for(|| Ok(network.connection_count()? == 0))?;

		// the next connection may reuse the recycled shell; the retained handle must
		// keep reporting the old connection as gone
		let _strm2 = connect_with_retry(&addr)?;
		let handle2 = map_err!(
			rx.recv_timeout(Duration::from_secs(60)),
			ErrKind::Test,
			"no handle received"
		)?;
		assert_eq!(handle2.state()?, ConnState::ReadyToWork);
		assert_eq!(handle1.state()?, ConnState::Disconnected);
		assert_eq!(handle1.send(frame("late"))?, false);

		network.stop()?;
		network.wait_for_stop()?;
		Ok(())
	}

	#[test]
	fn test_network_handle_moves_across_threads() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());

		let mut network = NetBuilder::build_network(
			EchoServer {},
			vec![Endpoints(addr.clone()), IsServer(true)],
		)?;
		network.start()?;

		let mut strm = connect_with_retry(&addr)?;
		echo_round_trip(&mut strm, "hello")?;

		// the boxed engine handle is Send, so shutdown can run on another thread
		let joiner = spawn(move || -> Result<(), Error> {
			network.stop()?;
			network.wait_for_stop()?;
			Ok(())
		});
		match joiner.join() {
			Ok(result) => result,
			Err(_) => Err(err!(ErrKind::ThreadPanic, "shutdown thread panicked")),
		}
	}

	struct RawGrammar {}

	impl FrameGrammar for RawGrammar {
		type Message = String;

		fn header_size(&self) -> usize {
			0
		}

		fn payload_size(&self, _chunk: &[u8]) -> Result<usize, Error> {
			Ok(0)
		}

		fn is_valid(&self, _header: &[u8]) -> bool {
			true
		}

		fn parse_one(&mut self, _chunk: &[u8]) -> ParseOne<String> {
			ParseOne::incomplete(FrameParseOutcome::ProtocolError)
		}
	}

	struct RawServer {}

	impl Protocol for RawServer {
		type Message = String;

		fn grammar(&self) -> Box<dyn FrameGrammar<Message = String> + Send> {
			Box::new(RawGrammar {})
		}

		fn on_connected(&mut self, _send_handle: &SendHandle) -> Result<(), Error> {
			Ok(())
		}

		fn on_message(
			&mut self,
			_send_handle: &SendHandle,
			_messages: Vec<String>,
		) -> Result<(), Error> {
			Ok(())
		}

		fn on_raw(&mut self, send_handle: &SendHandle, chunks: Vec<Vec<u8>>) -> Result<(), Error> {
			for chunk in chunks {
				send_handle.send(chunk)?;
			}
			Ok(())
		}

		fn on_disconnected(&mut self, _id: u128) -> Result<(), Error> {
			Ok(())
		}
	}

	#[test]
	fn test_raw_mode() -> Result<(), Error> {
		let test_info = test_info!()?;
		let addr = format!("127.0.0.1:{}", test_info.port());

		let mut network = NetBuilder::build_network(
			RawServer {},
			vec![Endpoints(addr.clone()), IsServer(true)],
		)?;
		network.start()?;

		// no framing configured, bytes are echoed as-is
		let mut strm = connect_with_retry(&addr)?;
		strm.write_all(b"raw bytes")?;
		strm.flush()?;
		let mut buf = [0u8; 9];
		strm.read_exact(&mut buf)?;
		assert_eq!(&buf, b"raw bytes");

		network.stop()?;
		network.wait_for_stop()?;
		Ok(())
	}

	#[test]
	fn test_config_errors() -> Result<(), Error> {
		// Endpoints is required
		assert!(NetBuilder::build_network(EchoServer {}, vec![IsServer(true)]).is_err());
		// an empty endpoint list is rejected
		assert!(
			NetBuilder::build_network(EchoServer {}, vec![Endpoints(" , ".to_string())]).is_err()
		);
		// log options are not valid here
		assert!(NetBuilder::build_network(
			EchoServer {},
			vec![Endpoints("127.0.0.1:8080".to_string()), AutoRotate(true)]
		)
		.is_err());
		Ok(())
	}
}
