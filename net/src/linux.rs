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
use crate::types::{Handle, Transport};
use mux_deps::bitvec::vec::BitVec;
use mux_deps::errno::{errno, set_errno, Errno};
use mux_deps::libc::{
	self, accept, c_int, c_void, close, fcntl, listen, pipe, read, sockaddr, sockaddr_storage,
	socket, socklen_t, write, F_SETFL, O_NONBLOCK,
};
use mux_deps::nix::sys::epoll::{Epoll, EpollCreateFlags, EpollEvent, EpollFlags};
use mux_deps::nix::sys::socket::{bind, SockaddrIn, SockaddrIn6};
use mux_deps::rand::random;
use mux_err::*;
use mux_log::*;
use std::mem::{size_of, zeroed};
use std::net::TcpStream;
use std::os::fd::{BorrowedFd, IntoRawFd};
use std::str::FromStr;
use std::thread::sleep;
use std::time::Duration;

debug!();

/// A [`crate::Transport`] that reads and writes the socket directly.
pub struct PlainTransport {}

impl Transport for PlainTransport {
	fn read(&self, handle: Handle, buf: &mut [u8]) -> isize {
		let cbuf: *mut c_void = buf as *mut _ as *mut c_void;
		unsafe { read(handle, cbuf, buf.len()) }
	}

	fn write(&self, handle: Handle, buf: &[u8]) -> isize {
		let cbuf: *const c_void = buf as *const _ as *const c_void;
		unsafe { write(handle, cbuf, buf.len()) }
	}

	fn shutdown(&self, handle: Handle) {
		unsafe {
			libc::shutdown(handle, libc::SHUT_RDWR);
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EventType {
	Read,
	Error,
	HangUp,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PollEvent {
	pub(crate) handle: Handle,
	pub(crate) etype: EventType,
}

pub(crate) enum ReadStatus {
	Open,
	Closed,
	Failed,
}

/// Readiness demultiplexer built on epoll. `filter_set` tracks which descriptors are
/// currently registered so re-registration uses modify instead of add.
pub(crate) struct Poller {
	selector: Epoll,
	epoll_events: [EpollEvent; MAX_RET_EVENTS],
	filter_set: BitVec,
}

impl Poller {
	pub(crate) fn new() -> Result<Self, Error> {
		let selector = Epoll::new(EpollCreateFlags::empty())?;
		let epoll_events: [EpollEvent; MAX_RET_EVENTS] = [EpollEvent::empty(); MAX_RET_EVENTS];
		let filter_set = BitVec::new();
		Ok(Self {
			selector,
			epoll_events,
			filter_set,
		})
	}

	pub(crate) fn register(&mut self, handle: Handle) -> Result<(), Error> {
		let fd_usize: usize = try_into!(handle)?;
		let fd_u64: u64 = try_into!(handle)?;
		if fd_usize >= self.filter_set.len() {
			self.filter_set.resize(fd_usize + 100, false);
		}

		let mut interest = EpollFlags::empty();
		interest |= EpollFlags::EPOLLIN;
		interest |= EpollFlags::EPOLLET;
		interest |= EpollFlags::EPOLLRDHUP;

		let mut event = EpollEvent::new(interest, fd_u64);
		let registered = match self.filter_set.get(fd_usize) {
			Some(b) => *b,
			None => false,
		};
		if registered {
			self.selector
				.modify(unsafe { BorrowedFd::borrow_raw(handle) }, &mut event)?;
		} else {
			self.selector
				.add(unsafe { BorrowedFd::borrow_raw(handle) }, event)?;
		}
		self.filter_set.replace(fd_usize, true);
		Ok(())
	}

	pub(crate) fn unregister(&mut self, handle: Handle) -> Result<(), Error> {
		let fd_usize: usize = try_into!(handle)?;
		if fd_usize >= self.filter_set.len() {
			self.filter_set.resize(fd_usize + 100, false);
		}
		self.filter_set.replace(fd_usize, false);
		if let Err(e) = self
			.selector
			.delete(unsafe { BorrowedFd::borrow_raw(handle) })
		{
			debug!("epoll delete for {} generated error: {}", handle, e)?;
		}
		Ok(())
	}

	pub(crate) fn wait(&mut self, timeout_millis: u16) -> Result<Vec<PollEvent>, Error> {
		let results = Epoll::wait(&self.selector, &mut self.epoll_events, timeout_millis);

		let mut ret = vec![];
		match results {
			Ok(count) => {
				for i in 0..count {
					let events = self.epoll_events[i].events();
					let handle = self.epoll_events[i].data() as Handle;
					let etype = if !(events & EpollFlags::EPOLLERR).is_empty() {
						EventType::Error
					} else if !(events & (EpollFlags::EPOLLHUP | EpollFlags::EPOLLRDHUP))
						.is_empty()
					{
						EventType::HangUp
					} else if !(events & EpollFlags::EPOLLIN).is_empty() {
						EventType::Read
					} else {
						continue;
					};
					ret.push(PollEvent { handle, etype });
				}
			}
			Err(e) => {
				warn!("epoll wait generated error: {}", e)?;
			}
		}
		Ok(ret)
	}
}

pub(crate) fn listen_impl(addr: &str, backlog: usize) -> Result<Handle, Error> {
	set_errno(Errno(0));
	let fd = match SockaddrIn::from_str(addr) {
		Ok(sock_addr) => {
			let fd = get_socket(libc::AF_INET)?;
			reuse_address(fd)?;
			bind(fd, &sock_addr)?;
			fd
		}
		Err(_) => {
			let sock_addr = SockaddrIn6::from_str(addr)?;
			let fd = get_socket(libc::AF_INET6)?;
			reuse_address(fd)?;
			bind(fd, &sock_addr)?;
			fd
		}
	};

	unsafe {
		if listen(fd, try_into!(backlog)?) != 0 {
			close(fd);
			let fmt = format!("listen on {} failed: {}", addr, errno());
			return Err(err!(ErrKind::IO, fmt));
		}
		fcntl(fd, F_SETFL, O_NONBLOCK);
	}
	debug!("listener fd = {}", fd)?;
	Ok(fd)
}

pub(crate) fn connect_impl(addr: &str) -> Result<Handle, Error> {
	let strm = TcpStream::connect(addr)?;
	strm.set_nonblocking(true)?;
	let fd = strm.into_raw_fd();
	disable_nagle(fd)?;
	Ok(fd)
}

pub(crate) fn accept_impl(fd: Handle) -> Result<Option<(Handle, String)>, Error> {
	set_errno(Errno(0));
	let mut addr: sockaddr_storage = unsafe { zeroed() };
	let mut len = size_of::<sockaddr_storage>() as socklen_t;
	let handle = unsafe {
		accept(
			fd,
			&mut addr as *mut sockaddr_storage as *mut sockaddr,
			&mut len,
		)
	};

	debug!("accept handle = {}", handle)?;

	if handle < 0 {
		if errno().0 == libc::EAGAIN || errno().0 == libc::EWOULDBLOCK {
			// would block, the accept loop is drained
			return Ok(None);
		}
		let fmt = format!("accept failed: {}", errno());
		return Err(err!(ErrKind::IO, fmt));
	}

	unsafe {
		fcntl(handle, F_SETFL, O_NONBLOCK);
	}
	disable_nagle(handle)?;

	Ok(Some((handle, peer_ip(&addr))))
}

fn peer_ip(addr: &sockaddr_storage) -> String {
	match addr.ss_family as c_int {
		libc::AF_INET => {
			let sin = unsafe { &*(addr as *const sockaddr_storage as *const libc::sockaddr_in) };
			let octets = sin.sin_addr.s_addr.to_ne_bytes();
			format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
		}
		libc::AF_INET6 => {
			let sin6 = unsafe { &*(addr as *const sockaddr_storage as *const libc::sockaddr_in6) };
			let bytes = sin6.sin6_addr.s6_addr;
			let mut groups = vec![];
			for i in 0..8 {
				let group = ((bytes[i * 2] as u16) << 8) | bytes[i * 2 + 1] as u16;
				groups.push(format!("{:x}", group));
			}
			groups.join(":")
		}
		_ => "unknown".to_string(),
	}
}

/// Loop recv into a scratch block until the socket reports would-block. Each
/// successful recv becomes one owned chunk. A zero length read means the peer closed.
pub(crate) fn read_nonblocking(
	transport: &dyn Transport,
	handle: Handle,
) -> Result<(Vec<Vec<u8>>, ReadStatus), Error> {
	let mut chunks = vec![];
	loop {
		let mut buf = vec![0u8; RECV_BUFFER_SIZE];
		set_errno(Errno(0));
		let rlen = transport.read(handle, &mut buf[..]);
		if rlen > 0 {
			buf.truncate(try_into!(rlen)?);
			chunks.push(buf);
		} else if rlen == 0 {
			return Ok((chunks, ReadStatus::Closed));
		} else {
			let e = errno().0;
			if e == libc::EINTR {
				sleep(Duration::from_millis(EINTR_SLEEP_MILLIS));
			} else if e == libc::EAGAIN || e == libc::EWOULDBLOCK {
				break;
			} else {
				debug!("read on handle {} generated error: {}", handle, errno())?;
				return Ok((chunks, ReadStatus::Failed));
			}
		}
	}
	Ok((chunks, ReadStatus::Open))
}

/// Write all of `data`, sleeping briefly on would-block. This runs on the dedicated
/// per connection writer thread, never the reactor thread.
pub(crate) fn write_nonblocking(
	transport: &dyn Transport,
	handle: Handle,
	data: &[u8],
) -> Result<usize, Error> {
	let mut offset = 0;
	while offset < data.len() {
		set_errno(Errno(0));
		let wlen = transport.write(handle, &data[offset..]);
		if wlen >= 0 {
			let wlen: usize = try_into!(wlen)?;
			offset += wlen;
			continue;
		}
		let e = errno().0;
		if e == libc::EINTR {
			continue;
		} else if e == libc::EAGAIN || e == libc::EWOULDBLOCK {
			let jitter: u64 = random::<u64>() % EAGAIN_SLEEP_SPREAD_MILLIS;
			sleep(Duration::from_millis(1 + jitter));
			continue;
		}
		let fmt = format!("write failed on handle {}: {}", handle, errno());
		return Err(err!(ErrKind::IO, fmt));
	}
	Ok(data.len())
}

/// Create the non-blocking pipe pair used to wake the reactor out of a poll wait.
pub(crate) fn wakeup_pair() -> Result<(Handle, Handle), Error> {
	set_errno(Errno(0));
	let mut retfds = [0i32; 2];
	let fds: *mut c_int = &mut retfds as *mut _ as *mut c_int;
	unsafe { pipe(fds) };
	unsafe { fcntl(retfds[0], F_SETFL, O_NONBLOCK) };
	unsafe { fcntl(retfds[1], F_SETFL, O_NONBLOCK) };
	Ok((retfds[0], retfds[1]))
}

pub(crate) fn wakeup_write(handle: Handle) {
	let buf = [0u8; 1];
	let cbuf: *const c_void = &buf as *const _ as *const c_void;
	unsafe {
		write(handle, cbuf, 1);
	}
}

pub(crate) fn drain_wakeup(handle: Handle) {
	let mut buf = [0u8; 128];
	loop {
		let cbuf: *mut c_void = &mut buf as *mut _ as *mut c_void;
		let rlen = unsafe { read(handle, cbuf, 128) };
		if rlen <= 0 {
			break;
		}
	}
}

pub(crate) fn close_impl(handle: Handle) -> Result<(), Error> {
	debug!("closing {}", handle)?;
	set_errno(Errno(0));
	unsafe {
		close(handle);
	}
	Ok(())
}

fn get_socket(family: c_int) -> Result<Handle, Error> {
	let fd = unsafe { socket(family, libc::SOCK_STREAM, 0) };
	if fd < 0 {
		let fmt = format!("socket creation failed: {}", errno());
		return Err(err!(ErrKind::IO, fmt));
	}
	Ok(fd)
}

fn setsockopt_i32(handle: Handle, level: c_int, name: c_int, value: c_int) -> Result<(), Error> {
	let res = unsafe {
		libc::setsockopt(
			handle,
			level,
			name,
			&value as *const _ as *const c_void,
			size_of::<c_int>() as socklen_t,
		)
	};
	if res != 0 {
		let fmt = format!("setsockopt({}) failed: {}", name, errno());
		return Err(err!(ErrKind::IO, fmt));
	}
	Ok(())
}

pub(crate) fn reuse_address(handle: Handle) -> Result<(), Error> {
	setsockopt_i32(handle, libc::SOL_SOCKET, libc::SO_REUSEADDR, 1)
}

pub(crate) fn disable_nagle(handle: Handle) -> Result<(), Error> {
	setsockopt_i32(handle, libc::IPPROTO_TCP, libc::TCP_NODELAY, 1)
}

pub(crate) fn set_keepalive(
	handle: Handle,
	idle_secs: i32,
	interval_secs: i32,
	count: i32,
) -> Result<(), Error> {
	setsockopt_i32(handle, libc::SOL_SOCKET, libc::SO_KEEPALIVE, 1)?;
	setsockopt_i32(handle, libc::IPPROTO_TCP, libc::TCP_KEEPIDLE, idle_secs)?;
	setsockopt_i32(handle, libc::IPPROTO_TCP, libc::TCP_KEEPINTVL, interval_secs)?;
	setsockopt_i32(handle, libc::IPPROTO_TCP, libc::TCP_KEEPCNT, count)
}
