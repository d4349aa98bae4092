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

//! A [`GraphicsDevice`](anvil_core::renderer::GraphicsDevice) on top of `wgpu`.

mod context;
mod conversions;
mod device;
mod pipeline;

pub use self::device::WgpuDevice;

/// Source of the built-in program. Exposes `vs_main` and `fs_main`; user programs
/// must keep its vertex layout and bind group 0 (texture, sampler).
pub const DEFAULT_SHADER: &str = include_str!("shaders/default.wgsl");
