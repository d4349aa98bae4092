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

//! # Anvil SDK
//!
//! The public-facing API of the Anvil runtime. It wires the concrete backends of
//! `anvil-infra` into the policies of `anvil-assets` and `anvil-render`:
//!
//! - [`Game`]: the window, its pumped event loop, the input bus and key state.
//! - [`Game::create_renderer`] and [`create_asset_store`]: the renderer and asset
//!   store built from their configuration sections.
//! - [`logging::init`] and [`fatal::exit`] for binaries.

pub mod fatal;
pub mod game;
pub mod logging;

pub use anvil_infra::PlatformError;
pub use game::Game;

use anvil_assets::{AssetStore, AssetStoreConfig};
use anvil_core::asset::{AssetError, AssetLoader, Audio, Font, FontSource};
use anvil_core::audio::AudioError;
use anvil_core::config::{AssetConfig, RendererConfig};
use anvil_core::renderer::RenderError;
use anvil_core::SystemClock;
use anvil_infra::{file_loader, CpalAudioOutput, WgpuDevice};
use anvil_render::Renderer2D;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The renderer used by games: a [`Renderer2D`] on the `wgpu` device.
pub type GameRenderer = Renderer2D<WgpuDevice>;

impl Game {
    /// Creates the GPU device for this window and a renderer configured by `config`.
    ///
    /// # Errors
    /// Returns [`RenderError::InitializationFailed`] if no adapter, device or
    /// surface can be obtained.
    pub fn create_renderer(&self, config: &RendererConfig) -> Result<GameRenderer, RenderError> {
        let device = WgpuDevice::new(self.window().clone(), config.vsync, self.samples())?;
        Ok(Renderer2D::from_config(device, config))
    }
}

/// Creates an asset store reading fonts and audio from the filesystem, with lazy
/// loading as `config` describes.
pub fn create_asset_store(config: &AssetConfig) -> AssetStore {
    AssetStore::from_config(
        &AssetStoreConfig::from(config),
        Arc::new(file_loader()),
        Arc::new(SystemClock::new()),
    )
}

/// Opens the default audio device and attaches it to `store`, so every audio
/// clip added from now on can be played.
///
/// # Errors
/// Returns the [`AudioError`] of the device if it cannot be opened.
pub fn attach_default_audio(store: &AssetStore) -> Result<Arc<CpalAudioOutput>, AudioError> {
    let output = Arc::new(CpalAudioOutput::open()?);
    store.attach_audio_output(output.clone());
    Ok(output)
}

/// Bakes the font at `path` at `size` pixels. The font remembers its source, so a
/// lazy-loading store can evict it and bake it again.
pub fn load_font(path: impl Into<PathBuf>, size: u32) -> Result<Font, AssetError> {
    file_loader().load_font(&FontSource {
        path: path.into(),
        size,
    })
}

/// Decodes the audio file at `path`. The clip remembers its source.
pub fn load_audio(path: impl AsRef<Path>) -> Result<Audio, AssetError> {
    file_loader().load_audio(path.as_ref())
}

/// The types most games need.
pub mod prelude {
    pub use crate::fatal::OrExit;
    pub use crate::{
        attach_default_audio, create_asset_store, load_audio, load_font, Game, GameRenderer,
    };
    pub use anvil_assets::AssetStore;
    pub use anvil_core::asset::{
        AssetHandle, AssetId, Audio, Font, FontSource, Shader, ShaderKind, Sprite, Texture,
    };
    pub use anvil_core::config::{EngineConfig, WindowConfig};
    pub use anvil_core::event::{Action, InputEvent, Key, KeyEvent, MouseButton};
    pub use anvil_core::math::{Rgba, Vec2f, Vec2u};
    pub use anvil_core::CodedError;
    pub use anvil_infra::{load_sprite, save_sprite};
}
