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

use mux_conf::ConfigOption::*;
use mux_err::{err, ErrKind, Error};
use mux_log::*;
use mux_net::{FrameGrammar, NetBuilder, Protocol, SendHandle};
use mux_ws::{
	frame_message, handshake_server_response, WsGrammar, WsMessage, WsMessageType,
};
use std::mem::size_of;
#[cfg(not(test))]
use std::thread::park;

info!();

// demo server: websocket echo with the upgrade handshake as the auth exchange
struct WsEcho {}

impl Protocol for WsEcho {
	type Message = WsMessage;

	fn grammar(&self) -> Box<dyn FrameGrammar<Message = WsMessage> + Send> {
		Box::new(WsGrammar::new())
	}

	fn on_connected(&mut self, send_handle: &SendHandle) -> Result<(), Error> {
		info!("connection {} ready", send_handle.id())?;
		Ok(())
	}

	fn on_message(
		&mut self,
		send_handle: &SendHandle,
		messages: Vec<WsMessage>,
	) -> Result<(), Error> {
		for message in messages {
			match message.mtype {
				WsMessageType::Text | WsMessageType::Binary => {
					send_handle.send(frame_message(&message, false)?)?;
				}
				WsMessageType::Ping => {
					let pong = WsMessage {
						mtype: WsMessageType::Pong,
						payload: message.payload,
					};
					send_handle.send(frame_message(&pong, false)?)?;
				}
				WsMessageType::Close => send_handle.close()?,
				WsMessageType::Pong => {}
			}
		}
		Ok(())
	}

	fn on_disconnected(&mut self, id: u128) -> Result<(), Error> {
		info!("connection {} disconnected", id)?;
		Ok(())
	}

	fn on_auth_response(&mut self, data: &[u8]) -> Result<Option<(Vec<u8>, usize)>, Error> {
		handshake_server_response(data)
	}
}

fn main() -> Result<(), Error> {
	real_main(false)?;
	Ok(())
}

fn real_main(debug_startup_32: bool) -> Result<(), Error> {
	// ensure we only support 64 bit
	match size_of::<&char>() == 8 && debug_startup_32 == false {
		true => {}
		false => return Err(err!(ErrKind::IllegalState, "Only 64 bit arch supported")),
	}

	log_init!(
		DisplayBackTrace(true),
		DisplayMillis(true),
		DisplayLineNum(false),
		DisplayLogLevel(false)
	)?;

	let port = 8080;
	let mut network = NetBuilder::build_network(
		WsEcho {},
		vec![
			Endpoints(format!("127.0.0.1:{}", port)),
			IsServer(true),
			NeedAuth(true),
		],
	)?;
	network.start()?;
	info!("websocket echo listener on port {}", port)?;

	#[cfg(not(test))]
	park();

	network.stop()?;
	network.wait_for_stop()?;
	Ok(())
}

#[cfg(test)]
mod test {
	use crate::{main, real_main};
	use mux_err::Error;

	#[test]
	fn test_main() -> Result<(), Error> {
		assert!(main().is_ok());
		Ok(())
	}

	#[test]
	fn test_debug_startup_32() -> Result<(), Error> {
		assert!(real_main(true).is_err());
		Ok(())
	}
}
