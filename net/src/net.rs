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
use crate::linux::*;
use crate::types::{
	AuthState, Conn, ConnState, ConnTable, NetConfig, NetMode, Network, Protocol, SendHandle,
	Transport, WriteItem,
};
use crate::{FrameParser, Handle};
use mux_conf::{Config, ConfigBuilder, ConfigOption, ConfigOptionName};
use mux_deps::rand::random;
use mux_err::*;
use mux_log::*;
use mux_util::*;
use std::sync::Arc;
use std::thread::{sleep, Builder, JoinHandle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

info!();

impl NetConfig {
	pub(crate) fn new(configs: Vec<ConfigOption>) -> Result<Self, Error> {
		let config = ConfigBuilder::build_config(configs);
		config.check_config(
			vec![
				ConfigOptionName::Endpoints,
				ConfigOptionName::IsServer,
				ConfigOptionName::NeedAuth,
				ConfigOptionName::MaxClients,
				ConfigOptionName::MaxPerIpConnections,
				ConfigOptionName::NetTimeout,
				ConfigOptionName::LivenessFrequencyMillis,
				ConfigOptionName::QueueCapacity,
				ConfigOptionName::Backlog,
				ConfigOptionName::Debug,
			],
			vec![ConfigOptionName::Endpoints],
		)?;

		let endpoints_value = config.get_or_string(&ConfigOptionName::Endpoints, "".to_string());
		let mut endpoints = vec![];
		for endpoint in endpoints_value.split(',') {
			let endpoint = endpoint.trim();
			if !endpoint.is_empty() {
				endpoints.push(endpoint.to_string());
			}
		}
		if endpoints.is_empty() {
			let text = "Endpoints must contain at least one host:port entry";
			return Err(err!(ErrKind::Configuration, text));
		}

		Ok(Self {
			endpoints,
			is_server: config.get_or_bool(&ConfigOptionName::IsServer, false),
			need_auth: config.get_or_bool(&ConfigOptionName::NeedAuth, false),
			max_clients: config.get_or_usize(&ConfigOptionName::MaxClients, DEFAULT_MAX_CLIENTS),
			max_per_ip: config
				.get_or_usize(&ConfigOptionName::MaxPerIpConnections, DEFAULT_MAX_PER_IP),
			net_timeout: config.get_or_u16(&ConfigOptionName::NetTimeout, DEFAULT_NET_TIMEOUT),
			liveness_frequency_millis: config.get_or_usize(
				&ConfigOptionName::LivenessFrequencyMillis,
				DEFAULT_LIVENESS_FREQUENCY_MILLIS,
			),
			queue_capacity: config
				.get_or_usize(&ConfigOptionName::QueueCapacity, DEFAULT_QUEUE_CAPACITY),
			backlog: config.get_or_usize(&ConfigOptionName::Backlog, DEFAULT_BACKLOG),
			debug: config.get_or_bool(&ConfigOptionName::Debug, false),
		})
	}
}

pub(crate) fn now_millis() -> Result<u128, Error> {
	Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis())
}

pub(crate) struct NetworkImpl<P>
where
	P: Protocol,
{
	config: NetConfig,
	protocol: Box<dyn LockBox<P>>,
	transport: Arc<dyn Transport>,
	table: Box<dyn LockBox<ConnTable>>,
	pending_close: Box<dyn LockBox<Vec<Handle>>>,
	stop: Box<dyn LockBox<bool>>,
	wakeup_writer: Option<Handle>,
	reactor: Option<JoinHandle<()>>,
	liveness: Option<JoinHandle<()>>,
}

impl<P> NetworkImpl<P>
where
	P: Protocol,
{
	pub(crate) fn new(
		protocol: P,
		configs: Vec<ConfigOption>,
		transport: Arc<dyn Transport>,
	) -> Result<Self, Error> {
		let config = NetConfig::new(configs)?;
		let pending_close: Box<dyn LockBox<Vec<Handle>>> = lock_box!(vec![])?;
		Ok(Self {
			config,
			protocol: lock_box!(protocol)?,
			transport,
			table: lock_box!(ConnTable::new())?,
			pending_close,
			stop: lock_box!(false)?,
			wakeup_writer: None,
			reactor: None,
			liveness: None,
		})
	}
}

impl<P> Network for NetworkImpl<P>
where
	P: Protocol,
{
	fn start(&mut self) -> Result<(), Error> {
		if self.reactor.is_some() {
			return Err(err!(ErrKind::IllegalState, "network has already been started"));
		}
		{
			*self.stop.wlock()? = false;
		}
		let (wakeup_reader, wakeup_writer) = wakeup_pair()?;
		self.wakeup_writer = Some(wakeup_writer);

		// a poller creation failure is fatal at startup
		let poller = Poller::new()?;

		let reactor = Reactor {
			config: self.config.clone(),
			protocol: self.protocol.clone(),
			transport: self.transport.clone(),
			poller,
			table: self.table.clone(),
			pending_close: self.pending_close.clone(),
			stop: self.stop.clone(),
			wakeup_reader,
			wakeup_writer,
			self_handle: None,
			next_endpoint: 0,
		};
		let reactor_thread = map_err!(
			Builder::new()
				.name("muxnet-reactor".to_string())
				.spawn(move || {
					let mut reactor = reactor;
					match reactor.run() {
						Ok(_) => {}
						Err(e) => {
							let _ = error!("reactor exited with error: {}", e);
						}
					}
				}),
			ErrKind::IllegalState,
			"could not spawn reactor thread"
		)?;
		self.reactor = Some(reactor_thread);

		let table = self.table.clone();
		let pending_close = self.pending_close.clone();
		let stop = self.stop.clone();
		let transport = self.transport.clone();
		let period = self.config.liveness_frequency_millis;
		let liveness_thread = map_err!(
			Builder::new()
				.name("muxnet-liveness".to_string())
				.spawn(move || {
					match liveness_loop(table, pending_close, stop, transport, wakeup_writer, period)
					{
						Ok(_) => {}
						Err(e) => {
							let _ = warn!("liveness checker exited with error: {}", e);
						}
					}
				}),
			ErrKind::IllegalState,
			"could not spawn liveness thread"
		)?;
		self.liveness = Some(liveness_thread);
		Ok(())
	}

	fn stop(&mut self) -> Result<(), Error> {
		{
			*self.stop.wlock()? = true;
		}
		if let Some(writer) = self.wakeup_writer {
			wakeup_write(writer);
		}
		Ok(())
	}

	fn wait_for_stop(&mut self) -> Result<(), Error> {
		if let Some(handle) = self.reactor.take() {
			match handle.join() {
				Ok(_) => {}
				Err(_) => return Err(err!(ErrKind::ThreadPanic, "reactor thread panicked")),
			}
		}
		if let Some(handle) = self.liveness.take() {
			match handle.join() {
				Ok(_) => {}
				Err(_) => return Err(err!(ErrKind::ThreadPanic, "liveness thread panicked")),
			}
		}
		if let Some(writer) = self.wakeup_writer.take() {
			close_impl(writer)?;
		}
		Ok(())
	}

	fn disconnect(&mut self, handle: Handle) -> Result<(), Error> {
		{
			self.pending_close.wlock()?.push(handle);
		}
		if let Some(writer) = self.wakeup_writer {
			wakeup_write(writer);
		}
		Ok(())
	}

	fn connection_count(&self) -> Result<usize, Error> {
		Ok(self.table.rlock()?.len())
	}
}

impl<P> Drop for NetworkImpl<P>
where
	P: Protocol,
{
	fn drop(&mut self) {
		let _ = self.stop();
		let _ = self.wait_for_stop();
	}
}

struct Reactor<P>
where
	P: Protocol,
{
	config: NetConfig,
	protocol: Box<dyn LockBox<P>>,
	transport: Arc<dyn Transport>,
	poller: Poller,
	table: Box<dyn LockBox<ConnTable>>,
	pending_close: Box<dyn LockBox<Vec<Handle>>>,
	stop: Box<dyn LockBox<bool>>,
	wakeup_reader: Handle,
	wakeup_writer: Handle,
	self_handle: Option<Handle>,
	next_endpoint: usize,
}

enum AfterRead {
	Nothing,
	Ready(SendHandle),
	Close,
}

enum AuthOutcome {
	Pending,
	Complete {
		reply: Option<Vec<u8>>,
		leftover: Vec<u8>,
		send_handle: SendHandle,
	},
}

impl<P> Reactor<P>
where
	P: Protocol,
{
	fn run(&mut self) -> Result<(), Error> {
		self.poller.register(self.wakeup_reader)?;
		loop {
			if *(self.stop.rlock()?) {
				break;
			}
			if self.self_handle.is_none() {
				self.establish()?;
				if self.self_handle.is_none() {
					continue;
				}
			}
			let events = self.poller.wait(self.config.net_timeout)?;
			for event in events {
				self.dispatch(event)?;
			}
			self.process_pending_close()?;
		}
		self.shutdown_all()
	}

	/// Establish the self socket: a listener in server mode, the outbound connection
	/// in client mode. Endpoints are tried round-robin; a failure backs off rather
	/// than aborting the reactor.
	fn establish(&mut self) -> Result<(), Error> {
		let endpoint =
			self.config.endpoints[self.next_endpoint % self.config.endpoints.len()].clone();
		self.next_endpoint += 1;
		if self.config.is_server {
			match listen_impl(&endpoint, self.config.backlog) {
				Ok(handle) => {
					self.poller.register(handle)?;
					self.self_handle = Some(handle);
					info!("listening on {}", endpoint)?;
				}
				Err(e) => {
					warn!("listen on {} failed: {}, retrying", endpoint, e)?;
					sleep(Duration::from_millis(RETRY_BACKOFF_MILLIS));
				}
			}
		} else {
			match connect_impl(&endpoint) {
				Ok(handle) => {
					self.self_handle = Some(handle);
					info!("connected to {}", endpoint)?;
					match self.install_conn(handle, endpoint, NetMode::Client) {
						Ok(_) => {}
						Err(e) => {
							warn!("connection setup failed: {}", e)?;
							close_impl(handle)?;
							self.self_handle = None;
						}
					}
				}
				Err(e) => {
					warn!("connect to {} failed: {}, retrying", endpoint, e)?;
					sleep(Duration::from_millis(RETRY_BACKOFF_MILLIS));
				}
			}
		}
		Ok(())
	}

	fn dispatch(&mut self, event: PollEvent) -> Result<(), Error> {
		if event.handle == self.wakeup_reader {
			drain_wakeup(self.wakeup_reader);
			return Ok(());
		}
		if self.config.is_server && Some(event.handle) == self.self_handle {
			return self.accept_loop();
		}
		match event.etype {
			EventType::Read | EventType::HangUp => self.process_read(event.handle),
			EventType::Error => self.drop_conn(event.handle, false),
		}
	}

	fn accept_loop(&mut self) -> Result<(), Error> {
		let listener = match self.self_handle {
			Some(handle) => handle,
			None => return Ok(()),
		};
		loop {
			let (handle, peer_ip) = match accept_impl(listener) {
				Ok(Some((handle, peer_ip))) => (handle, peer_ip),
				Ok(None) => break,
				Err(e) => {
					warn!("accept generated error: {}", e)?;
					break;
				}
			};
			let (count, ip_count) = {
				let table = self.table.rlock()?;
				(table.len(), table.ip_count(&peer_ip))
			};
			if count >= self.config.max_clients {
				warn!(
					"rejecting connection from {}: max clients ({}) reached",
					peer_ip, self.config.max_clients
				)?;
				close_impl(handle)?;
				continue;
			}
			if ip_count >= self.config.max_per_ip {
				warn!(
					"rejecting connection from {}: per ip limit ({}) reached",
					peer_ip, self.config.max_per_ip
				)?;
				close_impl(handle)?;
				continue;
			}
			match self.install_conn(handle, peer_ip, NetMode::Server) {
				Ok(_) => {}
				Err(e) => {
					// a failed connection setup tears down this peer only
					warn!("connection setup failed: {}", e)?;
					close_impl(handle)?;
				}
			}
		}
		Ok(())
	}

	fn install_conn(
		&mut self,
		handle: Handle,
		peer_ip: String,
		mode: NetMode,
	) -> Result<(), Error> {
		set_keepalive(
			handle,
			KEEPALIVE_IDLE_SECS,
			KEEPALIVE_INTERVAL_SECS,
			KEEPALIVE_COUNT,
		)?;

		let mut auth_buf = { self.table.wlock()?.checkout_recycled() }.unwrap_or_default();
		auth_buf.clear();
		// always a fresh state box: send handles retained from a previous connection
		// keep observing Disconnected on the old one
		let mut state = lock_box!(ConnState::Undefined)?;

		let id: u128 = random();
		let out_queue = blocking_queue!(self.config.queue_capacity)?;
		let in_queue = blocking_queue!(self.config.queue_capacity)?;

		let transport = self.transport.clone();
		let mut close_requests = self.pending_close.clone();
		let wakeup_writer = self.wakeup_writer;
		let out_worker = UtilBuilder::build_worker_loop(
			"muxnet-writer",
			out_queue.clone(),
			Box::new(move |item| match item {
				WriteItem::Data(data) => match write_nonblocking(&*transport, handle, &data) {
					Ok(_) => Ok(()),
					Err(e) => {
						// a failed write tears down this connection only
						{
							close_requests.wlock()?.push(handle);
						}
						wakeup_write(wakeup_writer);
						Err(e)
					}
				},
				WriteItem::Close => {
					transport.shutdown(handle);
					Ok(())
				}
			}),
		)?;

		let grammar = { self.protocol.rlock()?.grammar() };
		let mut parser = FrameParser::new(grammar);
		let send_handle = SendHandle {
			handle,
			id,
			state: state.clone(),
			queue: out_queue.clone(),
		};
		let mut protocol = self.protocol.clone();
		let callback_handle = send_handle.clone();
		let in_worker = UtilBuilder::build_worker_loop(
			"muxnet-inbound",
			in_queue.clone(),
			Box::new(move |chunks: Vec<Vec<u8>>| {
				if parser.is_raw() {
					protocol.wlock()?.on_raw(&callback_handle, chunks)
				} else {
					let messages = parser.parse(chunks)?;
					if messages.is_empty() {
						Ok(())
					} else {
						protocol.wlock()?.on_message(&callback_handle, messages)
					}
				}
			}),
		)?;

		{
			*state.wlock()? = ConnState::PeerConnected;
		}
		let auth = if self.config.need_auth {
			match mode {
				NetMode::Server => AuthState::AwaitingRequest,
				NetMode::Client => AuthState::AwaitingResponse,
			}
		} else {
			{
				*state.wlock()? = ConnState::ReadyToWork;
			}
			AuthState::Complete
		};

		if auth == AuthState::AwaitingResponse {
			// pre-framing: the auth request bypasses the framer
			let request = { self.protocol.wlock()?.on_auth_request()? };
			if !request.is_empty() {
				write_nonblocking(&*self.transport, handle, &request)?;
			}
		}

		let conn = Conn {
			handle,
			id,
			peer_ip,
			mode,
			state,
			auth,
			auth_buf,
			out_queue,
			out_worker,
			in_queue,
			in_worker,
			last_read: now_millis()?,
		};
		self.poller.register(handle)?;
		{
			self.table.wlock()?.insert(conn);
		}
		if self.config.debug {
			debug!("installed connection {} (id = {})", handle, id)?;
		}
		if auth == AuthState::Complete {
			match self.protocol.wlock()?.on_connected(&send_handle) {
				Ok(_) => {}
				Err(e) => warn!("on_connected handler generated error: {}", e)?,
			}
		}
		Ok(())
	}

	fn process_read(&mut self, handle: Handle) -> Result<(), Error> {
		let mut after = AfterRead::Nothing;
		let mut reply = None;
		let mut deliver: Option<(BlockingQueue<Vec<Vec<u8>>>, Vec<Vec<u8>>)> = None;
		{
			let mut table = self.table.wlock()?;
			let conn = match table.conns.get_mut(&handle) {
				Some(conn) => conn,
				None => return Ok(()),
			};
			let (chunks, status) = read_nonblocking(&*self.transport, handle)?;
			conn.last_read = now_millis()?;
			if !chunks.is_empty() {
				if conn.auth == AuthState::Complete {
					deliver = Some((conn.in_queue.clone(), chunks));
				} else {
					for chunk in chunks {
						conn.auth_buf.extend_from_slice(&chunk);
					}
					match advance_auth(&mut self.protocol, conn) {
						Ok(AuthOutcome::Pending) => {}
						Ok(AuthOutcome::Complete {
							reply: auth_reply,
							leftover,
							send_handle,
						}) => {
							reply = auth_reply;
							if !leftover.is_empty() {
								deliver = Some((conn.in_queue.clone(), vec![leftover]));
							}
							after = AfterRead::Ready(send_handle);
						}
						Err(e) => {
							warn!("authentication failed for handle {}: {}", handle, e)?;
							after = AfterRead::Close;
						}
					}
				}
			}
			match status {
				ReadStatus::Open => {}
				ReadStatus::Closed | ReadStatus::Failed => after = AfterRead::Close,
			}
		}
		// the table guard is released: socket writes, queue pushes and callbacks
		// must not stall other connections
		if let Some(reply) = reply {
			match write_nonblocking(&*self.transport, handle, &reply) {
				Ok(_) => {}
				Err(e) => {
					warn!("handshake reply failed on handle {}: {}", handle, e)?;
					after = AfterRead::Close;
					deliver = None;
				}
			}
		}
		if let AfterRead::Ready(ref send_handle) = after {
			match self.protocol.wlock()?.on_connected(send_handle) {
				Ok(_) => {}
				Err(e) => warn!("on_connected handler generated error: {}", e)?,
			}
		}
		if let Some((queue, chunks)) = deliver {
			self.deliver(handle, &queue, chunks)?;
		}
		match after {
			AfterRead::Nothing | AfterRead::Ready(_) => Ok(()),
			AfterRead::Close => self.drop_conn(handle, false),
		}
	}

	/// Hand a read burst to the connection's inbound worker without blocking the
	/// reactor. A consumer whose bounded queue is full loses the burst; the framing
	/// layer resynchronizes through its protocol error policy.
	fn deliver(
		&mut self,
		handle: Handle,
		queue: &BlockingQueue<Vec<Vec<u8>>>,
		chunks: Vec<Vec<u8>>,
	) -> Result<(), Error> {
		match queue.try_push(chunks) {
			Ok(_) => Ok(()),
			Err(e) => {
				warn!("inbound queue full on handle {}, dropping burst: {}", handle, e)?;
				Ok(())
			}
		}
	}

	/// Tear down a connection. Idempotent: a handle that is no longer in the table is
	/// a no-op. With `drain` set, queued outbound data is written before the writer
	/// stops; otherwise it is discarded.
	fn drop_conn(&mut self, handle: Handle, drain: bool) -> Result<(), Error> {
		let conn = { self.table.wlock()?.remove(handle) };
		let mut conn = match conn {
			Some(conn) => conn,
			None => return Ok(()),
		};
		self.poller.unregister(handle)?;
		{
			*conn.state.wlock()? = ConnState::Disconnected;
		}
		if drain {
			conn.out_worker.stop()?;
		} else {
			conn.out_worker.abort()?;
		}
		conn.in_worker.stop()?;
		close_impl(handle)?;
		if conn.mode == NetMode::Client && Some(handle) == self.self_handle {
			// reconnect on the next tick
			self.self_handle = None;
		}
		let id = conn.id;
		{
			self.table.wlock()?.recycle(conn.auth_buf);
		}
		match self.protocol.wlock()?.on_disconnected(id) {
			Ok(_) => {}
			Err(e) => warn!("on_disconnected handler generated error: {}", e)?,
		}
		debug!("disconnected handle {} (id = {})", handle, id)?;
		Ok(())
	}

	fn process_pending_close(&mut self) -> Result<(), Error> {
		let handles = { std::mem::take(&mut *self.pending_close.wlock()?) };
		for handle in handles {
			self.drop_conn(handle, true)?;
		}
		Ok(())
	}

	fn shutdown_all(&mut self) -> Result<(), Error> {
		let handles: Vec<Handle> = { self.table.rlock()?.conns.keys().cloned().collect() };
		for handle in handles {
			self.drop_conn(handle, true)?;
		}
		if let Some(listener) = self.self_handle.take() {
			if self.config.is_server {
				self.poller.unregister(listener)?;
				close_impl(listener)?;
			}
		}
		self.poller.unregister(self.wakeup_reader)?;
		close_impl(self.wakeup_reader)?;
		info!("reactor stopped")?;
		Ok(())
	}
}

/// Advance the pre-framing authentication exchange with the accumulated raw bytes.
/// Pure state transition: the caller performs the reply write, the leftover delivery
/// and the ready callback after the table guard is released. An error means the peer
/// must be disconnected.
fn advance_auth<P>(
	protocol: &mut Box<dyn LockBox<P>>,
	conn: &mut Conn,
) -> Result<AuthOutcome, Error>
where
	P: Protocol,
{
	match conn.auth {
		AuthState::AwaitingRequest => {
			let response = { protocol.wlock()?.on_auth_response(&conn.auth_buf)? };
			match response {
				Some((reply, consumed)) => {
					// bytes pipelined behind the request re-enter the framed path
					let consumed = consumed.min(conn.auth_buf.len());
					let leftover = conn.auth_buf.split_off(consumed);
					conn.auth_buf.clear();
					conn.auth = AuthState::Complete;
					{
						*conn.state.wlock()? = ConnState::ReadyToWork;
					}
					Ok(AuthOutcome::Complete {
						reply: Some(reply),
						leftover,
						send_handle: conn.send_handle(),
					})
				}
				None => Ok(AuthOutcome::Pending),
			}
		}
		AuthState::AwaitingResponse => {
			let verified = { protocol.wlock()?.on_auth_verify(&conn.auth_buf)? };
			match verified {
				Some(consumed) => {
					let consumed = consumed.min(conn.auth_buf.len());
					let leftover = conn.auth_buf.split_off(consumed);
					conn.auth_buf.clear();
					conn.auth = AuthState::Complete;
					{
						*conn.state.wlock()? = ConnState::ReadyToWork;
					}
					Ok(AuthOutcome::Complete {
						reply: None,
						leftover,
						send_handle: conn.send_handle(),
					})
				}
				None => Ok(AuthOutcome::Pending),
			}
		}
		AuthState::Complete => Ok(AuthOutcome::Pending),
	}
}

fn liveness_loop(
	table: Box<dyn LockBox<ConnTable>>,
	pending_close: Box<dyn LockBox<Vec<Handle>>>,
	stop: Box<dyn LockBox<bool>>,
	transport: Arc<dyn Transport>,
	wakeup_writer: Handle,
	period_millis: usize,
) -> Result<(), Error> {
	let mut table = table;
	let mut pending_close = pending_close;
	let mut elapsed: usize = 0;
	loop {
		if *(stop.rlock()?) {
			break;
		}
		sleep(Duration::from_millis(LIVENESS_SLICE_MILLIS));
		elapsed += LIVENESS_SLICE_MILLIS as usize;
		if elapsed < period_millis {
			continue;
		}
		elapsed = 0;

		let mut closed = vec![];
		let mut deliveries = vec![];
		{
			let mut guard = table.wlock()?;
			let now = now_millis()?;
			for (handle, conn) in guard.conns.iter_mut() {
				if conn.auth != AuthState::Complete {
					continue;
				}
				if now.saturating_sub(conn.last_read) < period_millis as u128 {
					continue;
				}
				// nudge the idle peer with a read; a half-open socket surfaces as
				// closed here even though it never signals HangUp
				let (chunks, status) = read_nonblocking(&*transport, *handle)?;
				if !chunks.is_empty() {
					conn.last_read = now;
					deliveries.push((*handle, conn.in_queue.clone(), chunks));
				}
				match status {
					ReadStatus::Open => {}
					ReadStatus::Closed | ReadStatus::Failed => closed.push(*handle),
				}
			}
		}
		// pushes happen after the table guard is released so a full queue cannot
		// stall the checker or the reactor
		for (handle, queue, chunks) in deliveries {
			match queue.try_push(chunks) {
				Ok(_) => {}
				Err(e) => {
					warn!("inbound queue full on handle {}, dropping burst: {}", handle, e)?
				}
			}
		}
		if !closed.is_empty() {
			{
				pending_close.wlock()?.extend(closed);
			}
			wakeup_write(wakeup_writer);
		}
	}
	Ok(())
}
