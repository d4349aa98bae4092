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

//! # Anvil Core
//!
//! Foundational crate containing the shared types, clocks, events and interface
//! contracts of the Anvil 2D runtime. Concrete backends live in `anvil-infra`;
//! policies (asset lifetime, frame pacing) live in `anvil-assets` and `anvil-render`.

#![warn(missing_docs)]

pub mod asset;
pub mod audio;
pub mod config;
pub mod error;
pub mod event;
pub mod math;
pub mod renderer;
pub mod time;

pub use config::EngineConfig;
pub use error::{CodedError, Diagnostic, ErrorCode};
pub use time::{Clock, ManualClock, SystemClock};
