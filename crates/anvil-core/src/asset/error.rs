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

use crate::error::{CodedError, ErrorCode};
use std::path::PathBuf;

/// Errors raised while loading, baking, decoding or editing asset data.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// A source file could not be read.
    #[error("failed to read '{}'", path.display())]
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The bytes are not a usable font.
    #[error("invalid font data: {0}")]
    InvalidFont(String),
    /// The glyphs do not fit the atlas at the requested size.
    #[error("glyphs at {size}px do not fit a {width}x{height} atlas")]
    AtlasFull {
        /// Requested pixel height.
        size: u32,
        /// Atlas width.
        width: u32,
        /// Atlas height.
        height: u32,
    },
    /// Audio decoding failed.
    #[error("audio decoding failed: {0}")]
    Decode(String),
    /// Image encoding or decoding failed.
    #[error("image error: {0}")]
    Image(String),
    /// Pixel data does not match the declared layout.
    #[error("invalid pixel data: {0}")]
    InvalidPixels(String),
    /// A crop rectangle reaches outside the image.
    #[error("crop {width}x{height} at ({x}, {y}) exceeds the {image_width}x{image_height} image")]
    CropOutOfBounds {
        /// Left edge of the crop.
        x: u32,
        /// Top edge of the crop.
        y: u32,
        /// Crop width.
        width: u32,
        /// Crop height.
        height: u32,
        /// Image width.
        image_width: u32,
        /// Image height.
        image_height: u32,
    },
    /// Loading `path` failed.
    #[error("failed to load '{}'", path.display())]
    Load {
        /// The file being loaded.
        path: PathBuf,
        /// Why.
        #[source]
        source: Box<AssetError>,
    },
}

impl AssetError {
    /// Attaches the path being loaded.
    pub fn while_loading(self, path: impl Into<PathBuf>) -> Self {
        AssetError::Load {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

impl CodedError for AssetError {
    fn code(&self) -> ErrorCode {
        let number = match self {
            AssetError::Io { .. } => 1,
            AssetError::InvalidFont(_) => 2,
            AssetError::AtlasFull { .. } => 3,
            AssetError::Decode(_) => 4,
            AssetError::Image(_) => 5,
            AssetError::InvalidPixels(_) => 6,
            AssetError::CropOutOfBounds { .. } => 7,
            AssetError::Load { source, .. } => return source.code(),
        };
        ErrorCode::new("ASSET", number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_context_keeps_the_inner_code() {
        let err = AssetError::InvalidFont("bad magic".into()).while_loading("fonts/x.ttf");
        assert_eq!(err.code(), ErrorCode::new("ASSET", 2));
        assert_eq!(err.to_string(), "failed to load 'fonts/x.ttf'");
        assert_eq!(
            std::error::Error::source(&err).map(|e| e.to_string()),
            Some("invalid font data: bad magic".to_string())
        );
    }
}
