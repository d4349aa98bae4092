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

//! CPU-side images that can be edited before being turned into textures.

use super::AssetError;
use crate::math::Vec2u;

/// An 8-bit image held in memory, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Sprite {
    /// Wraps tightly packed pixel rows.
    ///
    /// # Errors
    /// [`AssetError::InvalidPixels`] if `channels` is not 1 to 4 or the buffer
    /// length does not match the dimensions.
    pub fn from_pixels(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
    ) -> Result<Self, AssetError> {
        if !(1..=4).contains(&channels) {
            return Err(AssetError::InvalidPixels(format!(
                "{channels} channels per pixel"
            )));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(AssetError::InvalidPixels(format!(
                "{width}x{height}x{channels} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel.
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// The raw pixel rows.
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// The bytes of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = self.offset(x, y);
        Some(&self.data[start..start + self.channels as usize])
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// Rescales to `width` x `height` with nearest-neighbour sampling.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        let channels = self.channels as usize;
        let mut data = Vec::with_capacity(width as usize * height as usize * channels);
        if self.width > 0 && self.height > 0 {
            for y in 0..height {
                let src_y = (y as u64 * self.height as u64 / height as u64) as u32;
                for x in 0..width {
                    let src_x = (x as u64 * self.width as u64 / width as u64) as u32;
                    let start = self.offset(src_x, src_y);
                    data.extend_from_slice(&self.data[start..start + channels]);
                }
            }
        } else {
            data.resize(width as usize * height as usize * channels, 0);
        }
        self.width = width;
        self.height = height;
        self.data = data;
    }

    /// Keeps only the `size` region whose top-left corner is `origin`.
    ///
    /// # Errors
    /// [`AssetError::CropOutOfBounds`] if the region is not inside the image; the
    /// sprite is left untouched.
    pub fn crop(&mut self, origin: Vec2u, size: Vec2u) -> Result<(), AssetError> {
        let fits = origin.x.checked_add(size.x).is_some_and(|r| r <= self.width)
            && origin.y.checked_add(size.y).is_some_and(|b| b <= self.height);
        if !fits {
            return Err(AssetError::CropOutOfBounds {
                x: origin.x,
                y: origin.y,
                width: size.x,
                height: size.y,
                image_width: self.width,
                image_height: self.height,
            });
        }
        let row_bytes = size.x as usize * self.channels as usize;
        let mut data = Vec::with_capacity(row_bytes * size.y as usize);
        for y in origin.y..origin.y + size.y {
            let start = self.offset(origin.x, y);
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        self.width = size.x;
        self.height = size.y;
        self.data = data;
        Ok(())
    }

    /// Mirrors the image left to right.
    pub fn flip_horizontal(&mut self) {
        let channels = self.channels as usize;
        let row_bytes = self.width as usize * channels;
        if row_bytes == 0 {
            return;
        }
        for row in self.data.chunks_exact_mut(row_bytes) {
            let (mut left, mut right) = (0, self.width as usize - 1);
            while left < right {
                for c in 0..channels {
                    row.swap(left * channels + c, right * channels + c);
                }
                left += 1;
                right -= 1;
            }
        }
    }

    /// Mirrors the image top to bottom.
    pub fn flip_vertical(&mut self) {
        let row_bytes = self.width as usize * self.channels as usize;
        let rows = self.height as usize;
        for top in 0..rows / 2 {
            let bottom = rows - 1 - top;
            let (upper, lower) = self.data.split_at_mut(bottom * row_bytes);
            upper[top * row_bytes..(top + 1) * row_bytes].swap_with_slice(&mut lower[..row_bytes]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x2 single-channel sprite:
    /// 1 2 3
    /// 4 5 6
    fn grid() -> Sprite {
        Sprite::from_pixels(3, 2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn from_pixels_validates_layout() {
        assert!(Sprite::from_pixels(2, 2, 4, vec![0; 16]).is_ok());
        assert!(matches!(
            Sprite::from_pixels(2, 2, 4, vec![0; 15]),
            Err(AssetError::InvalidPixels(_))
        ));
        assert!(matches!(
            Sprite::from_pixels(1, 1, 5, vec![0; 5]),
            Err(AssetError::InvalidPixels(_))
        ));
    }

    #[test]
    fn flips() {
        let mut sprite = grid();
        sprite.flip_horizontal();
        assert_eq!(sprite.pixels(), &[3, 2, 1, 6, 5, 4]);

        let mut sprite = grid();
        sprite.flip_vertical();
        assert_eq!(sprite.pixels(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn horizontal_flip_keeps_channels_together() {
        let mut sprite = Sprite::from_pixels(2, 1, 3, vec![1, 2, 3, 7, 8, 9]).unwrap();
        sprite.flip_horizontal();
        assert_eq!(sprite.pixels(), &[7, 8, 9, 1, 2, 3]);
    }

    #[test]
    fn crop_inside_bounds() {
        let mut sprite = grid();
        sprite.crop(Vec2u::new(1, 0), Vec2u::new(2, 2)).unwrap();
        assert_eq!((sprite.width(), sprite.height()), (2, 2));
        assert_eq!(sprite.pixels(), &[2, 3, 5, 6]);
    }

    #[test]
    fn crop_outside_bounds_leaves_sprite_untouched() {
        let mut sprite = grid();
        let err = sprite.crop(Vec2u::new(2, 1), Vec2u::new(2, 1)).unwrap_err();
        assert!(matches!(err, AssetError::CropOutOfBounds { .. }));
        assert_eq!(sprite, grid());
    }

    #[test]
    fn nearest_neighbour_resize() {
        let mut sprite = grid();
        sprite.resize(6, 4);
        assert_eq!((sprite.width(), sprite.height()), (6, 4));
        assert_eq!(sprite.pixel(0, 0), Some(&[1][..]));
        assert_eq!(sprite.pixel(5, 0), Some(&[3][..]));
        assert_eq!(sprite.pixel(2, 3), Some(&[5][..]));

        sprite.resize(3, 2);
        assert_eq!(sprite, grid());
    }
}
