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

//! A headless [`GraphicsDevice`] that records what it is asked to do.
//!
//! Used by tests and by tools that need to run a render loop without a window.

use anvil_core::asset::ShaderKind;
use anvil_core::renderer::{
    DrawList, GraphicsDevice, PixelFormat, ProgramHandle, RenderError, TextureHandle,
};
use std::collections::HashMap;

/// A texture the device was asked to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTexture {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

/// An in-memory device. Every presented [`DrawList`] is kept for inspection.
#[derive(Debug)]
pub struct RecordingDevice {
    size: (u32, u32),
    next_handle: u64,
    vsync: bool,
    wireframe: bool,
    programs: Vec<(ShaderKind, String)>,
    textures: HashMap<TextureHandle, RecordedTexture>,
    released: Vec<TextureHandle>,
    frames: Vec<DrawList>,
    fail_next_present: Option<String>,
}

impl RecordingDevice {
    /// Creates a device with a `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            next_handle: 1,
            vsync: true,
            wireframe: true,
            programs: Vec::new(),
            textures: HashMap::new(),
            released: Vec::new(),
            frames: Vec::new(),
            fail_next_present: None,
        }
    }

    /// Simulates a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Sets whether line rasterization is reported as available.
    pub fn with_wireframe_support(mut self, supported: bool) -> Self {
        self.wireframe = supported;
        self
    }

    /// Makes the next `present` fail with [`RenderError::Device`].
    pub fn fail_next_present(&mut self, message: impl Into<String>) {
        self.fail_next_present = Some(message.into());
    }

    /// Sources compiled so far, in order.
    pub fn programs(&self) -> &[(ShaderKind, String)] {
        &self.programs
    }

    /// Textures currently alive on the device.
    pub fn texture(&self, handle: TextureHandle) -> Option<&RecordedTexture> {
        self.textures.get(&handle)
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Handles released so far, in order.
    pub fn released(&self) -> &[TextureHandle] {
        &self.released
    }

    /// Every frame presented so far.
    pub fn frames(&self) -> &[DrawList] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&DrawList> {
        self.frames.last()
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    fn next_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl GraphicsDevice for RecordingDevice {
    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn compile_program(
        &mut self,
        source: &str,
        kind: ShaderKind,
    ) -> Result<ProgramHandle, RenderError> {
        let entry_point = match kind {
            ShaderKind::Vertex => "vs_main",
            ShaderKind::Fragment => "fs_main",
        };
        if !source.contains(entry_point) {
            return Err(RenderError::ShaderCompilation {
                kind,
                details: format!("missing entry point `{entry_point}`"),
            });
        }
        self.programs.push((kind, source.to_owned()));
        Ok(ProgramHandle(self.next_handle()))
    }

    fn upload_texture(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[u8],
    ) -> Result<TextureHandle, RenderError> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(RenderError::InvalidTextureData {
                expected,
                actual: pixels.len(),
            });
        }
        let handle = TextureHandle(self.next_handle());
        self.textures.insert(
            handle,
            RecordedTexture {
                width,
                height,
                format,
                pixels: pixels.to_vec(),
            },
        );
        Ok(handle)
    }

    fn release_texture(&mut self, handle: TextureHandle) {
        if self.textures.remove(&handle).is_some() {
            self.released.push(handle);
        }
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.vsync = enabled;
    }

    fn supports_wireframe(&self) -> bool {
        self.wireframe
    }

    fn present(&mut self, frame: &DrawList) -> Result<(), RenderError> {
        if let Some(message) = self.fail_next_present.take() {
            return Err(RenderError::Device(message));
        }
        for batch in &frame.batches {
            if let Some(texture) = batch.state.texture {
                if !self.textures.contains_key(&texture) {
                    return Err(RenderError::UnknownTexture(texture));
                }
            }
        }
        self.frames.push(frame.clone());
        Ok(())
    }
}
