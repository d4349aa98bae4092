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

use super::{DrawList, PixelFormat, ProgramHandle, RenderError, TextureHandle};
use crate::asset::ShaderKind;

/// A graphics backend able to present batched 2D triangle lists.
///
/// All methods are called from the render (foreground) thread.
pub trait GraphicsDevice {
    /// The current drawable size in pixels.
    fn surface_size(&self) -> (u32, u32);

    /// Compiles `source` for the given stage and links it with the built-in
    /// counterpart stage.
    ///
    /// # Errors
    /// [`RenderError::ShaderCompilation`] if the backend rejects the program.
    fn compile_program(
        &mut self,
        source: &str,
        kind: ShaderKind,
    ) -> Result<ProgramHandle, RenderError>;

    /// Creates a texture from tightly packed rows of `format` texels.
    fn upload_texture(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[u8],
    ) -> Result<TextureHandle, RenderError>;

    /// Frees a texture. Unknown handles are ignored.
    fn release_texture(&mut self, handle: TextureHandle);

    /// Switches between display-synchronized and immediate presentation.
    fn set_vsync(&mut self, enabled: bool);

    /// Whether line rasterization is available for wireframe batches.
    fn supports_wireframe(&self) -> bool {
        false
    }

    /// Draws `frame` and presents it.
    ///
    /// # Errors
    /// Any error the device reports while recording, submitting or presenting.
    fn present(&mut self, frame: &DrawList) -> Result<(), RenderError>;
}
