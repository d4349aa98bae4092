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

//! Asset payload types and the contracts used to (re)build them from disk.
//!
//! This module knows what a shader, font, texture or audio clip *is*, and how a
//! recoverable asset remembers where it came from. It does not know how assets are
//! stored, indexed or evicted; that policy lives in `anvil-assets`.
//!
//! The key components are:
//! - [`AssetId`] and [`AssetHandle`]: typed identity plus shared ownership.
//! - The payloads: [`Shader`], [`Font`], [`Texture`], [`Audio`], and the CPU-side [`Sprite`].
//! - The loader contracts: [`FontBaker`], [`AudioDecoder`], [`AssetLoader`].

mod audio;
mod error;
mod font;
mod handle;
mod id;
mod loader;
mod shader;
mod sprite;
mod texture;

pub use audio::*;
pub use error::AssetError;
pub use font::*;
pub use handle::*;
pub use id::*;
pub use loader::*;
pub use shader::*;
pub use sprite::*;
pub use texture::*;

use std::fmt;

/// The four kinds of asset the store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Shader source.
    Shader,
    /// Baked font atlas.
    Font,
    /// GPU texture.
    Texture,
    /// Decoded audio clip.
    Audio,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AssetKind::Shader => "shader",
            AssetKind::Font => "font",
            AssetKind::Texture => "texture",
            AssetKind::Audio => "audio",
        };
        f.write_str(label)
    }
}

/// A marker trait for types that can be managed by the asset store.
///
/// The supertraits let handles be shared with the background eviction thread.
pub trait Asset: Send + Sync + 'static {
    /// Which per-kind identity space the asset belongs to.
    const KIND: AssetKind;
}
