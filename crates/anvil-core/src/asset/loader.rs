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

//! Contracts for turning on-disk sources into asset payloads.

use super::{AssetError, Audio, Font, FontSource, GlyphAtlas};
use crate::audio::PcmBuffer;
use std::path::Path;

/// Rasterizes a font file into a [`GlyphAtlas`].
pub trait FontBaker: Send + Sync {
    /// Bakes the printable ASCII range of the font in `bytes` at `size` pixels.
    fn bake(&self, bytes: &[u8], size: u32) -> Result<GlyphAtlas, AssetError>;
}

/// Decodes an encoded audio file into PCM.
pub trait AudioDecoder: Send + Sync {
    /// Decodes `bytes`. `extension` is a format hint (e.g. `"ogg"`).
    fn decode(&self, bytes: Vec<u8>, extension: Option<&str>) -> Result<PcmBuffer, AssetError>;
}

/// Builds recoverable assets from their on-disk sources.
///
/// The asset store calls this to rebuild an evicted font or audio clip, possibly
/// while holding its lock, so implementations must not call back into the store.
pub trait AssetLoader: Send + Sync {
    /// Loads and bakes a font. The result remembers `source`.
    fn load_font(&self, source: &FontSource) -> Result<Font, AssetError>;

    /// Loads and decodes an audio clip. The result remembers `path`.
    fn load_audio(&self, path: &Path) -> Result<Audio, AssetError>;
}

/// An [`AssetLoader`] reading from the filesystem and delegating to a baker and a decoder.
#[derive(Debug, Clone, Default)]
pub struct SourceLoader<B, D> {
    baker: B,
    decoder: D,
}

impl<B: FontBaker, D: AudioDecoder> SourceLoader<B, D> {
    /// Creates a loader from its two codecs.
    pub fn new(baker: B, decoder: D) -> Self {
        Self { baker, decoder }
    }
}

fn read(path: &Path) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl<B: FontBaker, D: AudioDecoder> AssetLoader for SourceLoader<B, D> {
    fn load_font(&self, source: &FontSource) -> Result<Font, AssetError> {
        log::debug!(
            "Baking font '{}' at {}px",
            source.path.display(),
            source.size
        );
        let bytes = read(&source.path)?;
        let atlas = self
            .baker
            .bake(&bytes, source.size)
            .map_err(|e| e.while_loading(&source.path))?;
        Ok(Font::from_source(source.clone(), atlas))
    }

    fn load_audio(&self, path: &Path) -> Result<Audio, AssetError> {
        log::debug!("Decoding audio '{}'", path.display());
        let bytes = read(path)?;
        let extension = path.extension().and_then(|e| e.to_str());
        let pcm = self
            .decoder
            .decode(bytes, extension)
            .map_err(|e| e.while_loading(path))?;
        Ok(Audio::from_source(path, pcm))
    }
}
