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

//! Baked bitmap fonts.

use super::{Asset, AssetKind};
use crate::math::Vec2f;
use std::path::PathBuf;

/// Width and height of a glyph atlas in texels.
pub const ATLAS_SIZE: u32 = 512;
/// First character baked into an atlas (space).
pub const FIRST_GLYPH: u8 = 32;
/// Number of consecutive characters baked into an atlas.
pub const GLYPH_COUNT: usize = 96;

/// Where a font was loaded from, sufficient to bake it again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSource {
    /// Path to the TrueType/OpenType file.
    pub path: PathBuf,
    /// Pixel height the atlas was baked at.
    pub size: u32,
}

/// Placement of one glyph in the atlas and its metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BakedGlyph {
    /// Left texel column of the glyph's box in the atlas.
    pub x0: u16,
    /// Top texel row.
    pub y0: u16,
    /// Right texel column (exclusive).
    pub x1: u16,
    /// Bottom texel row (exclusive).
    pub y1: u16,
    /// Horizontal offset from the pen position to the box's left edge.
    pub xoff: f32,
    /// Vertical offset from the baseline to the box's top edge (negative above).
    pub yoff: f32,
    /// How far the pen moves after this glyph.
    pub xadvance: f32,
}

/// A screen-space quad and the atlas region to map onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Top-left corner in pixels.
    pub min: Vec2f,
    /// Bottom-right corner in pixels.
    pub max: Vec2f,
    /// Top-left texture coordinate.
    pub uv_min: Vec2f,
    /// Bottom-right texture coordinate.
    pub uv_max: Vec2f,
}

/// A single-channel coverage bitmap holding the printable ASCII range.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphAtlas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    glyphs: Vec<BakedGlyph>,
}

impl GlyphAtlas {
    /// Assembles an atlas from a baked bitmap and its glyph table.
    ///
    /// ## Arguments
    /// * `width`, `height` - Bitmap dimensions in texels.
    /// * `pixels` - `width * height` coverage bytes, row-major.
    /// * `glyphs` - One entry per character from [`FIRST_GLYPH`], at most [`GLYPH_COUNT`].
    pub fn new(width: u32, height: u32, pixels: Vec<u8>, glyphs: Vec<BakedGlyph>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        debug_assert!(glyphs.len() <= GLYPH_COUNT);
        Self {
            width,
            height,
            pixels,
            glyphs,
        }
    }

    /// Bitmap width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Bitmap height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Metrics of `ch`, if it was baked.
    pub fn glyph(&self, ch: char) -> Option<&BakedGlyph> {
        let code = u32::from(ch);
        let first = u32::from(FIRST_GLYPH);
        if code < first {
            return None;
        }
        self.glyphs.get((code - first) as usize)
    }

    /// Computes the quad for `ch` drawn at the pen position `cursor` (baseline),
    /// then advances the pen.
    ///
    /// Quad corners are snapped to whole pixels. Characters that were not baked
    /// yield `None` and leave the pen where it was.
    pub fn quad(&self, ch: char, cursor: &mut Vec2f) -> Option<GlyphQuad> {
        let glyph = *self.glyph(ch)?;
        let inv_w = 1.0 / self.width as f32;
        let inv_h = 1.0 / self.height as f32;

        let x = (cursor.x + glyph.xoff + 0.5).floor();
        let y = (cursor.y + glyph.yoff + 0.5).floor();
        let quad = GlyphQuad {
            min: Vec2f::new(x, y),
            max: Vec2f::new(
                x + f32::from(glyph.x1 - glyph.x0),
                y + f32::from(glyph.y1 - glyph.y0),
            ),
            uv_min: Vec2f::new(f32::from(glyph.x0) * inv_w, f32::from(glyph.y0) * inv_h),
            uv_max: Vec2f::new(f32::from(glyph.x1) * inv_w, f32::from(glyph.y1) * inv_h),
        };
        cursor.x += glyph.xadvance;
        Some(quad)
    }

    /// Total advance of `text`, skipping characters that were not baked.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars()
            .filter_map(|ch| self.glyph(ch))
            .map(|g| g.xadvance)
            .sum()
    }
}

/// A font baked into a [`GlyphAtlas`].
///
/// Fonts that know their [`FontSource`] can be evicted by a lazy-loading store and
/// baked again on the next access.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    source: Option<FontSource>,
    atlas: GlyphAtlas,
}

impl Font {
    /// A font with no on-disk origin. It is never evicted.
    pub fn new(atlas: GlyphAtlas) -> Self {
        Self {
            source: None,
            atlas,
        }
    }

    /// A font that remembers where it was baked from.
    pub fn from_source(source: FontSource, atlas: GlyphAtlas) -> Self {
        Self {
            source: Some(source),
            atlas,
        }
    }

    /// The on-disk origin, if any.
    pub fn source(&self) -> Option<&FontSource> {
        self.source.as_ref()
    }

    /// The baked atlas.
    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }
}

impl Asset for Font {
    const KIND: AssetKind = AssetKind::Font;
}
