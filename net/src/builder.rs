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

use crate::net::NetworkImpl;
use crate::types::{NetBuilder, Network, Protocol, Transport};
use crate::PlainTransport;
use mux_conf::ConfigOption;
use mux_err::Error;
use std::sync::Arc;

impl NetBuilder {
	/// Build a [`crate::Network`] for the specified protocol and configuration. The
	/// configuration must include `Endpoints` (a comma separated `host:port` list)
	/// and may include `IsServer`, `NeedAuth`, `MaxClients`, `MaxPerIpConnections`,
	/// `NetTimeout`, `LivenessFrequencyMillis`, `QueueCapacity`, `Backlog`, and
	/// `Debug`.
	pub fn build_network<P>(
		protocol: P,
		configs: Vec<ConfigOption>,
	) -> Result<Box<dyn Network>, Error>
	where
		P: Protocol,
	{
		Self::build_network_with_transport(protocol, configs, Arc::new(PlainTransport {}))
	}

	/// Same as [`crate::NetBuilder::build_network`] with a caller supplied
	/// [`crate::Transport`] slotted in for the byte level i/o.
	pub fn build_network_with_transport<P>(
		protocol: P,
		configs: Vec<ConfigOption>,
		transport: Arc<dyn Transport>,
	) -> Result<Box<dyn Network>, Error>
	where
		P: Protocol,
	{
		Ok(Box::new(NetworkImpl::new(protocol, configs, transport)?))
	}
}
