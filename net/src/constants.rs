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

// scratch block size for each recv call
pub(crate) const RECV_BUFFER_SIZE: usize = 40_960;

// maximum events returned by a single poll wait
pub(crate) const MAX_RET_EVENTS: usize = 100;

pub(crate) const EINTR_SLEEP_MILLIS: u64 = 3;
pub(crate) const EAGAIN_SLEEP_SPREAD_MILLIS: u64 = 6;
pub(crate) const RETRY_BACKOFF_MILLIS: u64 = 1_000;
pub(crate) const LIVENESS_SLICE_MILLIS: u64 = 100;

pub(crate) const RECYCLE_POOL_MAX: usize = 100;

pub(crate) const KEEPALIVE_IDLE_SECS: i32 = 60;
pub(crate) const KEEPALIVE_INTERVAL_SECS: i32 = 10;
pub(crate) const KEEPALIVE_COUNT: i32 = 5;

pub(crate) const DEFAULT_BACKLOG: usize = 200;
pub(crate) const DEFAULT_MAX_CLIENTS: usize = 512;
pub(crate) const DEFAULT_MAX_PER_IP: usize = 5;
pub(crate) const DEFAULT_NET_TIMEOUT: u16 = 100;
pub(crate) const DEFAULT_LIVENESS_FREQUENCY_MILLIS: usize = 3_000;
pub(crate) const DEFAULT_QUEUE_CAPACITY: usize = 1_024;
