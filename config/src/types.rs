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

use mux_err::Error;
use std::collections::HashMap;
use std::path::PathBuf;

/// The config trait allows for easy construction of configurations. Configurations can be
/// retrieved with the [`crate::Config::get`] function and configurations can be checked with the
/// [`crate::Config::check_config`] function.
pub trait Config {
	/// get the [`crate::ConfigOption`] associated with this name, if specified.
	fn get(&self, name: &ConfigOptionName) -> Option<ConfigOption>;
	/// get the [`bool`] value associated with this name or the default if not specified.
	fn get_or_bool(&self, name: &ConfigOptionName, default: bool) -> bool;
	/// get the [`usize`] value associated with this name or the default if not specified.
	fn get_or_usize(&self, name: &ConfigOptionName, default: usize) -> usize;
	/// get the [`u16`] value associated with this name or the default if not specified.
	fn get_or_u16(&self, name: &ConfigOptionName, default: u16) -> u16;
	/// get the [`u64`] value associated with this name or the default if not specified.
	fn get_or_u64(&self, name: &ConfigOptionName, default: u64) -> u64;
	/// get the [`u128`] value associated with this name or the default if not specified.
	fn get_or_u128(&self, name: &ConfigOptionName, default: u128) -> u128;
	/// get the [`String`] value associated with this name or the default if not specified.
	fn get_or_string(&self, name: &ConfigOptionName, default: String) -> String;
	/// check this configuration for duplicates, disallowed options, and missing
	/// required options.
	fn check_config(
		&self,
		allowed: Vec<ConfigOptionName>,
		required: Vec<ConfigOptionName>,
	) -> Result<(), Error>;
}

/// Names of configuration options used throughout MuxNet via macro. This corresponds to the
/// values in [`crate::ConfigOption`].
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum ConfigOptionName {
	MaxSizeBytes,
	MaxAgeMillis,
	DisplayColors,
	DisplayStdout,
	DisplayTimestamp,
	DisplayLogLevel,
	DisplayLineNum,
	DisplayMillis,
	LogFilePath,
	AutoRotate,
	DisplayBackTrace,
	LineNumDataMaxLen,
	DeleteRotation,
	FileHeader,
	Endpoints,
	IsServer,
	NeedAuth,
	MaxClients,
	MaxPerIpConnections,
	NetTimeout,
	LivenessFrequencyMillis,
	QueueCapacity,
	Backlog,
	Debug,
}

/// Configuration options used throughout MuxNet via macro.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum ConfigOption {
	MaxSizeBytes(u64),
	MaxAgeMillis(u128),
	DisplayColors(bool),
	DisplayStdout(bool),
	DisplayTimestamp(bool),
	DisplayLogLevel(bool),
	DisplayLineNum(bool),
	DisplayMillis(bool),
	LogFilePath(Option<Box<PathBuf>>),
	AutoRotate(bool),
	DisplayBackTrace(bool),
	LineNumDataMaxLen(usize),
	DeleteRotation(bool),
	FileHeader(String),
	Endpoints(String),
	IsServer(bool),
	NeedAuth(bool),
	MaxClients(usize),
	MaxPerIpConnections(usize),
	NetTimeout(u16),
	LivenessFrequencyMillis(usize),
	QueueCapacity(usize),
	Backlog(usize),
	Debug(bool),
}

/// A builder struct which can be used to build configs. This is typically done using the
/// [`crate::config!`] macro which calls this builder.
pub struct ConfigBuilder {}

// Crate local structures

#[derive(Clone, Debug)]
pub(crate) struct ConfigImpl {
	pub(crate) configs: Vec<ConfigOption>,
	pub(crate) hash: HashMap<ConfigOptionName, ConfigOption>,
}
