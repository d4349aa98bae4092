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

use super::{Asset, AssetKind};
use crate::renderer::TextureHandle;
use crossbeam_channel::Sender;

/// Queues a GPU texture for release when dropped.
///
/// Textures may be dropped on any thread (including the asset store's eviction
/// thread), but only the render thread may touch the device, so the handle is sent
/// back to the renderer instead of being freed in place.
#[derive(Debug)]
pub struct ReleaseToken {
    handle: TextureHandle,
    sender: Sender<TextureHandle>,
}

impl ReleaseToken {
    /// Creates a token that sends `handle` on `sender` when dropped.
    pub fn new(handle: TextureHandle, sender: Sender<TextureHandle>) -> Self {
        Self { handle, sender }
    }
}

impl Drop for ReleaseToken {
    fn drop(&mut self) {
        // A closed channel means the renderer is gone along with its device.
        let _ = self.sender.send(self.handle);
    }
}

/// A texture resident on the graphics device.
///
/// Textures have no on-disk origin the store could rebuild them from, so a
/// lazy-loading store never counts them as recoverable.
#[derive(Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    gpu: TextureHandle,
    _release: Option<ReleaseToken>,
}

impl Texture {
    /// Wraps a device handle that the caller frees itself.
    pub fn new(width: u32, height: u32, gpu: TextureHandle) -> Self {
        Self {
            width,
            height,
            gpu,
            _release: None,
        }
    }

    /// Wraps a device handle that is released through `token` when dropped.
    pub fn with_release(width: u32, height: u32, gpu: TextureHandle, token: ReleaseToken) -> Self {
        Self {
            width,
            height,
            gpu,
            _release: Some(token),
        }
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The device handle.
    pub fn gpu_handle(&self) -> TextureHandle {
        self.gpu
    }
}

impl Asset for Texture {
    const KIND: AssetKind = AssetKind::Texture;
}
