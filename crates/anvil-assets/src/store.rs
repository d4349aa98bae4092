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

use crate::config::{AssetStoreConfig, MIN_SWEEP_INTERVAL};
use crate::ledger::RecoveryLedger;
use crate::pool::Pool;
use crate::sweeper::Sweeper;
use anvil_core::asset::{
    Asset, AssetError, AssetHandle, AssetId, AssetKind, AssetLoader, Audio, Font, FontSource,
    Shader, Texture,
};
use anvil_core::audio::AudioOutput;
use anvil_core::time::{Clock, SystemClock};
use parking_lot::Mutex;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Ids removed by one eviction sweep, per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvictionReport {
    /// Evicted fonts. Each one is recoverable.
    pub fonts: Vec<AssetId<Font>>,
    /// Evicted textures. These are gone for good.
    pub textures: Vec<AssetId<Texture>>,
    /// Evicted audio clips. Each one is recoverable.
    pub audio: Vec<AssetId<Audio>>,
}

impl EvictionReport {
    /// Whether nothing was evicted.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty() && self.textures.is_empty() && self.audio.is_empty()
    }

    /// Total number of evicted assets.
    pub fn total(&self) -> usize {
        self.fonts.len() + self.textures.len() + self.audio.len()
    }
}

struct StoreState {
    shaders: Pool<Shader>,
    fonts: Pool<Font>,
    textures: Pool<Texture>,
    audio: Pool<Audio>,
    lost_fonts: RecoveryLedger<Font, FontSource>,
    lost_audio: RecoveryLedger<Audio, PathBuf>,
    audio_output: Option<Arc<dyn AudioOutput>>,
}

impl StoreState {
    fn new() -> Self {
        Self {
            shaders: Pool::new(),
            fonts: Pool::new(),
            textures: Pool::new(),
            audio: Pool::new(),
            lost_fonts: RecoveryLedger::new(),
            lost_audio: RecoveryLedger::new(),
            audio_output: None,
        }
    }
}

/// State shared between the store and its sweeper thread.
struct Shared {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
    loader: Arc<dyn AssetLoader>,
    lazy_timeout: Option<Duration>,
}

/// Returns the live asset, or rebuilds it from its recovery record under the same id.
///
/// A failed rebuild puts the record back so that a later access can try again.
fn reconstruct_with_id<T: Asset, S>(
    pool: &mut Pool<T>,
    ledger: &mut RecoveryLedger<T, S>,
    id: AssetId<T>,
    now: Duration,
    rebuild: impl FnOnce(&S) -> Result<T, AssetError>,
) -> Result<Option<AssetHandle<T>>, AssetError> {
    if let Some(handle) = pool.touch(id, now) {
        return Ok(Some(handle));
    }
    let Some(source) = ledger.take(id) else {
        return Ok(None);
    };
    match rebuild(&source) {
        Ok(asset) => {
            log::debug!("Reconstructed {id} from its recovery record.");
            Ok(Some(pool.reinsert(id, asset, now)))
        }
        Err(e) => {
            ledger.record(id, source);
            Err(e)
        }
    }
}

impl Shared {
    fn sweep(&self) -> EvictionReport {
        let Some(timeout) = self.lazy_timeout else {
            return EvictionReport::default();
        };

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let now = self.clock.now();

        // Removal sets first, against a single `now`.
        let report = EvictionReport {
            fonts: state.fonts.idle(now, timeout, |f| f.source().is_some()),
            textures: state.textures.idle(now, timeout, |_| true),
            audio: state.audio.idle(now, timeout, |a| a.source().is_some()),
        };

        for &id in &report.fonts {
            if let Some(handle) = state.fonts.remove(id) {
                if let Some(source) = handle.source() {
                    state.lost_fonts.record(id, source.clone());
                }
                log::debug!("Evicted {id}.");
            }
        }
        for &id in &report.textures {
            if state.textures.remove(id).is_some() {
                log::debug!("Evicted {id} (not recoverable).");
            }
        }
        for &id in &report.audio {
            if let Some(handle) = state.audio.remove(id) {
                if let Some(path) = handle.source() {
                    state.lost_audio.record(id, path.to_path_buf());
                }
                log::debug!("Evicted {id}.");
            }
        }

        if !report.is_empty() {
            log::info!(
                "Eviction sweep released {} asset(s): {} font(s), {} texture(s), {} audio clip(s).",
                report.total(),
                report.fonts.len(),
                report.textures.len(),
                report.audio.len()
            );
        }
        report
    }
}

/// Owns every asset of the runtime and their identities.
///
/// Each kind has its own id space starting at 0. With lazy loading enabled, a
/// background thread evicts fonts, textures and audio clips that were not fetched
/// for longer than the timeout. Evicted fonts and audio clips are rebuilt from disk
/// on their next `get` and keep their id; evicted textures are gone. Shaders, and
/// fonts or clips with no on-disk source, are never evicted.
///
/// Every method takes the single store-wide lock for its whole critical section, so
/// the store can be shared between threads (e.g. behind an `Arc`).
pub struct AssetStore {
    shared: Arc<Shared>,
    sweeper: Mutex<Option<Sweeper>>,
}

impl AssetStore {
    /// Creates a store with lazy loading disabled.
    pub fn new(loader: Arc<dyn AssetLoader>) -> Self {
        Self::from_config(
            &AssetStoreConfig::eager(),
            loader,
            Arc::new(SystemClock::new()),
        )
    }

    /// Creates a store that evicts assets idle for longer than `timeout`.
    pub fn with_lazy_loading(loader: Arc<dyn AssetLoader>, timeout: Duration) -> Self {
        Self::from_config(
            &AssetStoreConfig::lazy(timeout),
            loader,
            Arc::new(SystemClock::new()),
        )
    }

    /// Creates a store from an explicit configuration and time source.
    ///
    /// The sweeper thread is started only when lazy loading is enabled.
    pub fn from_config(
        config: &AssetStoreConfig,
        loader: Arc<dyn AssetLoader>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(StoreState::new()),
            clock,
            loader,
            lazy_timeout: config.lazy_timeout,
        });

        let sweeper = config.lazy_timeout.map(|timeout| {
            let interval = config.sweep_interval.max(MIN_SWEEP_INTERVAL);
            log::info!(
                "Asset store created with lazy loading (timeout: {timeout:?}, sweep every {interval:?})."
            );
            let worker = Arc::clone(&shared);
            Sweeper::spawn(interval, move || {
                worker.sweep();
            })
        });
        if sweeper.is_none() {
            log::info!("Asset store created without lazy loading.");
        }

        Self {
            shared,
            sweeper: Mutex::new(sweeper),
        }
    }

    /// The eviction timeout, if lazy loading is enabled.
    pub fn lazy_timeout(&self) -> Option<Duration> {
        self.shared.lazy_timeout
    }

    // --- Shaders ---

    /// Stores a shader and returns its id.
    pub fn add_shader(&self, shader: Shader) -> AssetId<Shader> {
        let mut state = self.shared.state.lock();
        let id = state.shaders.insert(shader, self.shared.clock.now()).id();
        log::debug!("Added {id}.");
        id
    }

    /// Fetches a shader.
    pub fn get_shader(&self, id: AssetId<Shader>) -> Option<AssetHandle<Shader>> {
        let mut state = self.shared.state.lock();
        state.shaders.touch(id, self.shared.clock.now())
    }

    // --- Fonts ---

    /// Stores a font and returns its id.
    pub fn add_font(&self, font: Font) -> AssetId<Font> {
        let mut state = self.shared.state.lock();
        let id = state.fonts.insert(font, self.shared.clock.now()).id();
        log::debug!("Added {id}.");
        id
    }

    /// Fetches a font, baking it again from its source if it was evicted.
    ///
    /// # Errors
    /// The loader's error if the font had to be rebuilt and that failed. The
    /// recovery record is kept, so a later call retries.
    pub fn get_font(&self, id: AssetId<Font>) -> Result<Option<AssetHandle<Font>>, AssetError> {
        let mut guard = self.shared.state.lock();
        let state = &mut *guard;
        let now = self.shared.clock.now();
        let loader = &self.shared.loader;
        reconstruct_with_id(&mut state.fonts, &mut state.lost_fonts, id, now, |source| {
            loader.load_font(source)
        })
    }

    /// Whether `id` is not live but can be rebuilt on the next [`get_font`](Self::get_font).
    pub fn is_recoverable_font(&self, id: AssetId<Font>) -> bool {
        let state = self.shared.state.lock();
        !state.fonts.contains(id) && state.lost_fonts.contains(id)
    }

    // --- Textures ---

    /// Stores a texture and returns its id.
    pub fn add_texture(&self, texture: Texture) -> AssetId<Texture> {
        let mut state = self.shared.state.lock();
        let id = state.textures.insert(texture, self.shared.clock.now()).id();
        log::debug!("Added {id}.");
        id
    }

    /// Fetches a texture. An evicted texture is never rebuilt.
    pub fn get_texture(&self, id: AssetId<Texture>) -> Option<AssetHandle<Texture>> {
        let mut state = self.shared.state.lock();
        state.textures.touch(id, self.shared.clock.now())
    }

    // --- Audio ---

    /// Stores an audio clip and returns its id. The clip is bound to the attached
    /// audio output, if there is one.
    pub fn add_audio(&self, audio: Audio) -> AssetId<Audio> {
        let mut state = self.shared.state.lock();
        if let Some(output) = &state.audio_output {
            audio.attach_output(Arc::clone(output));
        }
        let id = state.audio.insert(audio, self.shared.clock.now()).id();
        log::debug!("Added {id}.");
        id
    }

    /// Fetches an audio clip, decoding it again from its source if it was evicted.
    ///
    /// # Errors
    /// The loader's error if the clip had to be rebuilt and that failed. The
    /// recovery record is kept, so a later call retries.
    pub fn get_audio(&self, id: AssetId<Audio>) -> Result<Option<AssetHandle<Audio>>, AssetError> {
        let mut guard = self.shared.state.lock();
        let state = &mut *guard;
        let now = self.shared.clock.now();
        let loader = &self.shared.loader;
        let output = state.audio_output.clone();
        reconstruct_with_id(&mut state.audio, &mut state.lost_audio, id, now, |path| {
            let audio = loader.load_audio(path)?;
            if let Some(output) = output {
                audio.attach_output(output);
            }
            Ok(audio)
        })
    }

    /// Whether `id` is not live but can be rebuilt on the next [`get_audio`](Self::get_audio).
    pub fn is_recoverable_audio(&self, id: AssetId<Audio>) -> bool {
        let state = self.shared.state.lock();
        !state.audio.contains(id) && state.lost_audio.contains(id)
    }

    /// Sets the output that audio clips play through: every clip added or rebuilt
    /// from now on, and every live clip that has none yet.
    pub fn attach_audio_output(&self, output: Arc<dyn AudioOutput>) {
        let mut state = self.shared.state.lock();
        state.audio.for_each(|clip| {
            clip.attach_output(Arc::clone(&output));
        });
        state.audio_output = Some(output);
        log::info!("Audio output attached to the asset store.");
    }

    // --- Lifetime ---

    /// Runs one eviction pass immediately. Does nothing when lazy loading is off.
    pub fn sweep(&self) -> EvictionReport {
        self.shared.sweep()
    }

    /// Number of live assets of `kind`.
    pub fn live_count(&self, kind: AssetKind) -> usize {
        let state = self.shared.state.lock();
        match kind {
            AssetKind::Shader => state.shaders.len(),
            AssetKind::Font => state.fonts.len(),
            AssetKind::Texture => state.textures.len(),
            AssetKind::Audio => state.audio.len(),
        }
    }

    /// Stops and joins the sweeper thread, then releases every asset and recovery
    /// record. Idempotent; also run on drop.
    pub fn shutdown(&self) {
        if let Some(mut sweeper) = self.sweeper.lock().take() {
            sweeper.stop();
        }

        let mut state = self.shared.state.lock();
        let released =
            state.shaders.len() + state.fonts.len() + state.textures.len() + state.audio.len();
        state.shaders.clear();
        state.fonts.clear();
        state.textures.clear();
        state.audio.clear();
        state.lost_fonts.clear();
        state.lost_audio.clear();
        if released > 0 {
            log::info!("Asset store shut down, released {released} asset(s).");
        }
    }
}

impl Drop for AssetStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for AssetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("AssetStore")
            .field("lazy_timeout", &self.shared.lazy_timeout)
            .field("shaders", &state.shaders.len())
            .field("fonts", &state.fonts.len())
            .field("textures", &state.textures.len())
            .field("audio", &state.audio.len())
            .field("recoverable_fonts", &state.lost_fonts.len())
            .field("recoverable_audio", &state.lost_audio.len())
            .finish()
    }
}
