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

//! The contract between the 2D renderer and a graphics backend.
//!
//! The renderer builds a [`DrawList`] of pre-transformed, batched triangles each
//! frame and hands it to a [`GraphicsDevice`] to present. GPU resources are referred
//! to by opaque handles owned by the device.

mod device;
mod error;
mod types;

pub use device::GraphicsDevice;
pub use error::RenderError;
pub use types::*;
