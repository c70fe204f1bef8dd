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

use crate::types::ConfigImpl;
use crate::{Config, ConfigBuilder, ConfigOption, ConfigOption::*, ConfigOptionName as CN};
use mux_err::*;
use std::collections::{HashMap, HashSet};

// macro to simplify the process of checking the parameters
macro_rules! cc {
	($self:expr, $set:expr, $specified:expr, $option_name:expr) => {{
		let config_option_name = $option_name;
		let i = $option_name as usize;
		$self.check_set(&$set, &config_option_name)?;
		$self.check_index(i, $specified, format!("{:?}", config_option_name))?;
	}};
}

impl ConfigBuilder {
	/// build a [`crate::Config`] from the specified [`crate::ConfigOption`] vec.
	pub fn build_config(configs: Vec<ConfigOption>) -> Box<dyn Config> {
		Box::new(ConfigImpl::new(configs))
	}
}

// Config implementation just return values from the Impl structure.
impl Config for ConfigImpl {
	fn get(&self, name: &CN) -> Option<ConfigOption> {
		self.hash.get(name).cloned()
	}

	fn get_or_bool(&self, name: &CN, default: bool) -> bool {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::DisplayColors(v) => *v,
				ConfigOption::AutoRotate(v) => *v,
				ConfigOption::DeleteRotation(v) => *v,
				ConfigOption::DisplayLogLevel(v) => *v,
				ConfigOption::DisplayLineNum(v) => *v,
				ConfigOption::DisplayBackTrace(v) => *v,
				ConfigOption::DisplayMillis(v) => *v,
				ConfigOption::DisplayStdout(v) => *v,
				ConfigOption::DisplayTimestamp(v) => *v,
				ConfigOption::IsServer(v) => *v,
				ConfigOption::NeedAuth(v) => *v,
				ConfigOption::Debug(v) => *v,
				_ => default,
			},
			None => default,
		}
	}

	fn get_or_usize(&self, name: &CN, default: usize) -> usize {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::LineNumDataMaxLen(v) => *v,
				ConfigOption::MaxClients(v) => *v,
				ConfigOption::MaxPerIpConnections(v) => *v,
				ConfigOption::LivenessFrequencyMillis(v) => *v,
				ConfigOption::QueueCapacity(v) => *v,
				ConfigOption::Backlog(v) => *v,
				_ => default,
			},
			None => default,
		}
	}

	fn get_or_u16(&self, name: &CN, default: u16) -> u16 {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::NetTimeout(v) => *v,
				_ => default,
			},
			None => default,
		}
	}

	fn get_or_u64(&self, name: &CN, default: u64) -> u64 {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::MaxSizeBytes(v) => *v,
				_ => default,
			},
			None => default,
		}
	}

	fn get_or_u128(&self, name: &CN, default: u128) -> u128 {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::MaxAgeMillis(v) => *v,
				_ => default,
			},
			None => default,
		}
	}

	fn get_or_string(&self, name: &CN, default: String) -> String {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::FileHeader(v) => v.to_string(),
				ConfigOption::Endpoints(v) => v.to_string(),
				_ => default,
			},
			None => default,
		}
	}

	fn check_config(&self, allowed: Vec<CN>, required: Vec<CN>) -> Result<(), Error> {
		self.check_config_impl(allowed, required)
	}
}

impl ConfigImpl {
	// create a new config based on the specified input.
	pub fn new(configs: Vec<ConfigOption>) -> Self {
		// create a hashmap to insert configs for the ability to look them up later.
		let mut hash = HashMap::new();
		for config in &configs {
			let _ = match config {
				MaxSizeBytes(_) => hash.insert(CN::MaxSizeBytes, config.clone()),
				MaxAgeMillis(_) => hash.insert(CN::MaxAgeMillis, config.clone()),
				DisplayColors(_) => hash.insert(CN::DisplayColors, config.clone()),
				DisplayStdout(_) => hash.insert(CN::DisplayStdout, config.clone()),
				DisplayTimestamp(_) => hash.insert(CN::DisplayTimestamp, config.clone()),
				DisplayLogLevel(_) => hash.insert(CN::DisplayLogLevel, config.clone()),
				DisplayLineNum(_) => hash.insert(CN::DisplayLineNum, config.clone()),
				DisplayMillis(_) => hash.insert(CN::DisplayMillis, config.clone()),
				LogFilePath(_) => hash.insert(CN::LogFilePath, config.clone()),
				AutoRotate(_) => hash.insert(CN::AutoRotate, config.clone()),
				DisplayBackTrace(_) => hash.insert(CN::DisplayBackTrace, config.clone()),
				LineNumDataMaxLen(_) => hash.insert(CN::LineNumDataMaxLen, config.clone()),
				DeleteRotation(_) => hash.insert(CN::DeleteRotation, config.clone()),
				FileHeader(_) => hash.insert(CN::FileHeader, config.clone()),
				Endpoints(_) => hash.insert(CN::Endpoints, config.clone()),
				IsServer(_) => hash.insert(CN::IsServer, config.clone()),
				NeedAuth(_) => hash.insert(CN::NeedAuth, config.clone()),
				MaxClients(_) => hash.insert(CN::MaxClients, config.clone()),
				MaxPerIpConnections(_) => hash.insert(CN::MaxPerIpConnections, config.clone()),
				NetTimeout(_) => hash.insert(CN::NetTimeout, config.clone()),
				LivenessFrequencyMillis(_) => {
					hash.insert(CN::LivenessFrequencyMillis, config.clone())
				}
				QueueCapacity(_) => hash.insert(CN::QueueCapacity, config.clone()),
				Backlog(_) => hash.insert(CN::Backlog, config.clone()),
				Debug(_) => hash.insert(CN::Debug, config.clone()),
			};
		}
		Self { configs, hash }
	}

	// check the config: 1.) for duplicates, 2.) for allowed input 3.) for the required input.
	pub fn check_config_impl(&self, allowed: Vec<CN>, required: Vec<CN>) -> Result<(), Error> {
		let mut t = HashSet::new();
		let mut s = vec![];
		for a in &allowed {
			t.insert(a);
		}

		// the cc macro handles #1 and #2 above
		for v in &self.configs {
			match v {
				MaxSizeBytes(_) => cc!(self, t, &mut s, CN::MaxSizeBytes),
				MaxAgeMillis(_) => cc!(self, t, &mut s, CN::MaxAgeMillis),
				DisplayColors(_) => cc!(self, t, &mut s, CN::DisplayColors),
				DisplayStdout(_) => cc!(self, t, &mut s, CN::DisplayStdout),
				DisplayTimestamp(_) => cc!(self, t, &mut s, CN::DisplayTimestamp),
				DisplayLogLevel(_) => cc!(self, t, &mut s, CN::DisplayLogLevel),
				DisplayLineNum(_) => cc!(self, t, &mut s, CN::DisplayLineNum),
				DisplayMillis(_) => cc!(self, t, &mut s, CN::DisplayMillis),
				LogFilePath(_) => cc!(self, t, &mut s, CN::LogFilePath),
				AutoRotate(_) => cc!(self, t, &mut s, CN::AutoRotate),
				DisplayBackTrace(_) => cc!(self, t, &mut s, CN::DisplayBackTrace),
				LineNumDataMaxLen(_) => cc!(self, t, &mut s, CN::LineNumDataMaxLen),
				DeleteRotation(_) => cc!(self, t, &mut s, CN::DeleteRotation),
				FileHeader(_) => cc!(self, t, &mut s, CN::FileHeader),
				Endpoints(_) => cc!(self, t, &mut s, CN::Endpoints),
				IsServer(_) => cc!(self, t, &mut s, CN::IsServer),
				NeedAuth(_) => cc!(self, t, &mut s, CN::NeedAuth),
				MaxClients(_) => cc!(self, t, &mut s, CN::MaxClients),
				MaxPerIpConnections(_) => cc!(self, t, &mut s, CN::MaxPerIpConnections),
				NetTimeout(_) => cc!(self, t, &mut s, CN::NetTimeout),
				LivenessFrequencyMillis(_) => {
					cc!(self, t, &mut s, CN::LivenessFrequencyMillis)
				}
				QueueCapacity(_) => cc!(self, t, &mut s, CN::QueueCapacity),
				Backlog(_) => cc!(self, t, &mut s, CN::Backlog),
				Debug(_) => cc!(self, t, &mut s, CN::Debug),
			}
		}

		// #3 is covered here (required)
		let s_len = s.len();
		for v in required {
			let v_as_usize = v.clone() as usize;
			if v_as_usize >= s_len || !s[v_as_usize] {
				return Err(err!(
					ErrKind::Configuration,
					"{:?} was required and not specified",
					v
				));
			}
		}

		Ok(())
	}

	// convenience fn to check if the set contains this option and returns appropriate error
	fn check_set(&self, set: &HashSet<&CN>, option: &CN) -> Result<(), Error> {
		if set.contains(option) {
			Ok(())
		} else {
			Err(err!(ErrKind::Configuration, "{:?} is not allowed", option))
		}
	}

	// this checks for duplicates
	fn check_index(&self, i: usize, specified: &mut Vec<bool>, name: String) -> Result<(), Error> {
		if specified.len() <= i {
			specified.resize(i + 1, false);
		}

		if specified[i] {
			Err(err!(
				ErrKind::Configuration,
				"{} was specified more than once",
				name
			))
		} else {
			specified[i] = true;
			Ok(())
		}
	}
}
