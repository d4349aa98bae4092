// Copyright 2025 eraflo
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

//! Logger bootstrap for binaries.

use env_logger::{Builder, Env};

/// Installs `env_logger` as the global logger.
///
/// The filter defaults to `info` and `RUST_LOG` overrides it. The GPU backend's
/// internal chatter is capped at `warn`. Calling this more than once is harmless:
/// only the first call installs a logger.
pub fn init() {
    let result = Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Warn)
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialized.");
    }
}
