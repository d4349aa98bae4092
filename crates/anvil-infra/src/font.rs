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

//! Glyph atlas baking with `ab_glyph`.

use ab_glyph::{point, Font as _, FontRef, PxScale, ScaleFont as _};
use anvil_core::asset::{
    AssetError, BakedGlyph, FontBaker, GlyphAtlas, ATLAS_SIZE, FIRST_GLYPH, GLYPH_COUNT,
};

/// Gap left around every glyph so bilinear sampling never bleeds into a neighbour.
const PADDING: u32 = 1;

/// A [`FontBaker`] rasterizing TrueType/OpenType outlines with `ab_glyph`.
///
/// Glyphs are packed left to right in rows into a single
/// [`ATLAS_SIZE`]x[`ATLAS_SIZE`] coverage bitmap.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbGlyphBaker;

impl AbGlyphBaker {
    pub fn new() -> Self {
        Self
    }
}

/// Row packer cursor.
struct Shelf {
    x: u32,
    y: u32,
    row_height: u32,
}

impl Shelf {
    fn new() -> Self {
        Self {
            x: PADDING,
            y: PADDING,
            row_height: 0,
        }
    }

    /// Reserves a `width` x `height` box and returns its top-left corner.
    fn place(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        if self.x + width + PADDING > ATLAS_SIZE {
            self.x = PADDING;
            self.y += self.row_height + PADDING;
            self.row_height = 0;
        }
        if self.x + width + PADDING > ATLAS_SIZE || self.y + height + PADDING > ATLAS_SIZE {
            return None;
        }
        let corner = (self.x, self.y);
        self.x += width + PADDING;
        self.row_height = self.row_height.max(height);
        Some(corner)
    }
}

impl FontBaker for AbGlyphBaker {
    fn bake(&self, bytes: &[u8], size: u32) -> Result<GlyphAtlas, AssetError> {
        if size == 0 {
            return Err(AssetError::InvalidFont("pixel size must be positive".into()));
        }
        let font =
            FontRef::try_from_slice(bytes).map_err(|e| AssetError::InvalidFont(e.to_string()))?;
        let scale = PxScale::from(size as f32);
        let scaled = font.as_scaled(scale);

        let atlas_full = || AssetError::AtlasFull {
            size,
            width: ATLAS_SIZE,
            height: ATLAS_SIZE,
        };

        let mut pixels = vec![0u8; (ATLAS_SIZE * ATLAS_SIZE) as usize];
        let mut glyphs = Vec::with_capacity(GLYPH_COUNT);
        let mut shelf = Shelf::new();

        for code in FIRST_GLYPH..FIRST_GLYPH + GLYPH_COUNT as u8 {
            let id = font.glyph_id(char::from(code));
            let xadvance = scaled.h_advance(id);

            // The glyph is positioned with its baseline origin at (0, 0), so the
            // pixel bounds are the offsets from the pen position.
            let glyph = id.with_scale_and_position(scale, point(0.0, 0.0));
            let Some(outlined) = font.outline_glyph(glyph) else {
                // Blank glyph (space): advance only.
                glyphs.push(BakedGlyph {
                    xadvance,
                    ..BakedGlyph::default()
                });
                continue;
            };

            let bounds = outlined.px_bounds();
            let width = bounds.width().max(0.0) as u32;
            let height = bounds.height().max(0.0) as u32;
            let (x0, y0) = shelf.place(width, height).ok_or_else(atlas_full)?;

            outlined.draw(|gx, gy, coverage| {
                if gx < width && gy < height {
                    let index = ((y0 + gy) * ATLAS_SIZE + x0 + gx) as usize;
                    pixels[index] = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                }
            });

            glyphs.push(BakedGlyph {
                x0: x0 as u16,
                y0: y0 as u16,
                x1: (x0 + width) as u16,
                y1: (y0 + height) as u16,
                xoff: bounds.min.x,
                yoff: bounds.min.y,
                xadvance,
            });
        }

        log::debug!(
            "Baked {} glyph(s) at {size}px using {} of {ATLAS_SIZE} atlas rows.",
            glyphs.len(),
            shelf.y + shelf.row_height
        );
        Ok(GlyphAtlas::new(ATLAS_SIZE, ATLAS_SIZE, pixels, glyphs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    #[test]
    fn rejects_bytes_that_are_not_a_font() {
        let result = AbGlyphBaker::new().bake(b"definitely not a font", 16);
        assert!(matches!(result, Err(AssetError::InvalidFont(_))));
    }

    #[test]
    fn rejects_a_zero_size() {
        let result = AbGlyphBaker::new().bake(&[], 0);
        assert!(matches!(result, Err(AssetError::InvalidFont(_))));
    }

    #[test]
    fn shelf_wraps_rows_and_reports_overflow() {
        let mut shelf = Shelf::new();

        assert_eq!(shelf.place(300, 10), Some((1, 1)));
        // 1 + 300 + 1 + 250 + 1 > 512: next row, below the tallest box so far.
        assert_eq!(shelf.place(250, 20), Some((1, 12)));
        assert_eq!(shelf.place(100, 480), Some((252, 12)));
        assert_eq!(shelf.place(300, 30), None);
        assert_eq!(shelf.place(ATLAS_SIZE, 1), None);
    }

    #[test]
    fn bakes_the_printable_ascii_range() {
        // Only run where the font is installed.
        let Ok(bytes) = std::fs::read(SYSTEM_FONT) else {
            return;
        };

        let atlas = AbGlyphBaker::new().bake(&bytes, 24).unwrap();

        assert_eq!(atlas.width(), ATLAS_SIZE);
        let space = atlas.glyph(' ').unwrap();
        assert_eq!(space.x1 - space.x0, 0);
        assert!(space.xadvance > 0.0);
        let a = atlas.glyph('A').unwrap();
        assert!(a.x1 > a.x0 && a.y1 > a.y0);
        assert!(a.yoff < 0.0, "glyph box starts above the baseline");
        assert!(atlas.pixels().iter().any(|&p| p > 0));
        assert!(atlas.glyph('~').is_some());
    }

    #[test]
    fn huge_sizes_overflow_the_atlas() {
        let Ok(bytes) = std::fs::read(SYSTEM_FONT) else {
            return;
        };

        let result = AbGlyphBaker::new().bake(&bytes, 400);

        assert!(matches!(result, Err(AssetError::AtlasFull { size: 400, .. })));
    }
}
