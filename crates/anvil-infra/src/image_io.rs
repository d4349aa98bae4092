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

//! Reading and writing [`Sprite`]s as image files.

use anvil_core::asset::{AssetError, Sprite};
use image::{ColorType, DynamicImage, ImageFormat};
use std::path::Path;

/// Decodes the image at `path` into a sprite.
///
/// 8-bit grey, grey-alpha, RGB and RGBA images keep their channel count; any
/// other layout (16-bit, float) is converted to 8-bit RGBA.
///
/// # Errors
/// [`AssetError::Io`] if the file cannot be read, [`AssetError::Image`] if its
/// contents are not a supported image.
pub fn load_sprite(path: impl AsRef<Path>) -> Result<Sprite, AssetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| AssetError::Image(e.to_string()).while_loading(path))?;

    let (width, height) = (img.width(), img.height());
    let (channels, data) = match img {
        DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
        other => (4, other.to_rgba8().into_raw()),
    };
    log::debug!(
        "Loaded sprite '{}' ({width}x{height}, {channels} channel(s)).",
        path.display()
    );
    Sprite::from_pixels(width, height, channels, data)
}

/// Encodes `sprite` as a PNG file at `path`, replacing any existing file.
///
/// # Errors
/// [`AssetError::Image`] if encoding or writing fails.
pub fn save_sprite(sprite: &Sprite, path: impl AsRef<Path>) -> Result<(), AssetError> {
    let path = path.as_ref();
    let color = match sprite.channels() {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        _ => ColorType::Rgba8,
    };
    image::save_buffer_with_format(
        path,
        sprite.pixels(),
        sprite.width(),
        sprite.height(),
        color,
        ImageFormat::Png,
    )
    .map_err(|e| AssetError::Image(format!("cannot write '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_sprites_load_back_with_their_channels() {
        // --- 1. ARRANGE ---
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.png");
        let pixels = vec![
            255, 0, 0, 0, 255, 0, //
            0, 0, 255, 255, 255, 255,
        ];
        let sprite = Sprite::from_pixels(2, 2, 3, pixels).unwrap();

        // --- 2. ACT ---
        save_sprite(&sprite, &path).unwrap();
        let loaded = load_sprite(&path).unwrap();

        // --- 3. ASSERT ---
        assert_eq!(loaded, sprite);
    }

    #[test]
    fn missing_files_are_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_sprite(dir.path().join("nope.png"));
        assert!(matches!(result, Err(AssetError::Io { .. })));
    }

    #[test]
    fn undecodable_files_are_image_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.png");
        std::fs::write(&path, b"not a png").unwrap();

        let err = load_sprite(&path).unwrap_err();

        match err {
            AssetError::Load { source, .. } => assert!(matches!(*source, AssetError::Image(_))),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
