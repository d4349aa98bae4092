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

//! # Anvil Infra
//!
//! Concrete implementations of the collaborator contracts declared in `anvil-core`:
//! a `winit` window with input translation, a `wgpu` [`GraphicsDevice`], a `cpal`
//! [`AudioOutput`], a `symphonia` [`AudioDecoder`], an `ab_glyph` [`FontBaker`] and
//! `image`-based sprite I/O.
//!
//! [`GraphicsDevice`]: anvil_core::renderer::GraphicsDevice
//! [`AudioOutput`]: anvil_core::audio::AudioOutput
//! [`AudioDecoder`]: anvil_core::asset::AudioDecoder
//! [`FontBaker`]: anvil_core::asset::FontBaker

pub mod audio;
pub mod font;
pub mod graphics;
pub mod image_io;
pub mod loader;
pub mod platform;

pub use audio::{CpalAudioOutput, SymphoniaDecoder};
pub use font::AbGlyphBaker;
pub use graphics::wgpu::WgpuDevice;
pub use image_io::{load_sprite, save_sprite};
pub use loader::{file_loader, FileLoader};
pub use platform::{translate_winit_input, PlatformError, WindowBuilder};
