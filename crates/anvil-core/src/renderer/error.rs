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

//! Errors of the rendering subsystem.

use super::TextureHandle;
use crate::asset::ShaderKind;
use crate::error::{CodedError, ErrorCode};
use std::fmt;

const NAMESPACE: &str = "GRAPHICS";

/// An error raised by the renderer or its graphics device.
#[derive(Debug)]
pub enum RenderError {
    /// The device, adapter or surface could not be created.
    InitializationFailed(String),
    /// A shader program failed to compile or link.
    ShaderCompilation {
        /// The stage the source was written for.
        kind: ShaderKind,
        /// Compiler output.
        details: String,
    },
    /// Pixel data has a channel count the device cannot take.
    UnsupportedPixelFormat {
        /// The offending channel count.
        channels: u8,
    },
    /// Pixel data does not match its declared dimensions.
    InvalidTextureData {
        /// Expected byte length.
        expected: usize,
        /// Actual byte length.
        actual: usize,
    },
    /// A draw referenced a texture the device does not know.
    UnknownTexture(TextureHandle),
    /// The presentation surface could not provide a frame.
    SurfaceUnavailable(String),
    /// The device reported an error while executing the frame.
    Device(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InitializationFailed(msg) => {
                write!(f, "Graphics initialization failed: {msg}")
            }
            RenderError::ShaderCompilation { kind, details } => {
                write!(f, "Failed to compile {kind:?} shader: {details}")
            }
            RenderError::UnsupportedPixelFormat { channels } => {
                write!(f, "Unsupported pixel format: {channels} channel(s)")
            }
            RenderError::InvalidTextureData { expected, actual } => {
                write!(
                    f,
                    "Texture data size mismatch: expected {expected} bytes, got {actual}"
                )
            }
            RenderError::UnknownTexture(handle) => write!(f, "Unknown texture {handle:?}"),
            RenderError::SurfaceUnavailable(msg) => write!(f, "Surface unavailable: {msg}"),
            RenderError::Device(msg) => write!(f, "Graphics device error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl CodedError for RenderError {
    fn code(&self) -> ErrorCode {
        let number = match self {
            RenderError::InitializationFailed(_) => 1,
            RenderError::ShaderCompilation { .. } => 2,
            RenderError::UnsupportedPixelFormat { .. } => 3,
            RenderError::InvalidTextureData { .. } => 4,
            RenderError::UnknownTexture(_) => 5,
            RenderError::SurfaceUnavailable(_) => 6,
            RenderError::Device(_) => 7,
        };
        ErrorCode::new(NAMESPACE, number)
    }
}
