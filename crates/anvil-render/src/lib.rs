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

//! # Anvil Render
//!
//! Frame bracketing and pacing ([`FrameController`]) and the immediate-mode 2D
//! drawing surface ([`Renderer2D`]) built on the
//! [`GraphicsDevice`](anvil_core::renderer::GraphicsDevice) contract.

pub mod frame;
pub mod recording;
pub mod renderer;

pub use frame::{FrameController, FramePhase};
pub use recording::RecordingDevice;
pub use renderer::Renderer2D;
