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

//! Device resources derived from assets: compiled programs and font atlases.

use anvil_core::asset::{AssetHandle, AssetId, Font, Shader};
use anvil_core::renderer::{GraphicsDevice, PixelFormat, ProgramHandle, RenderError, TextureHandle};
use std::collections::HashMap;
use std::sync::Weak;

struct CachedProgram {
    shader: Weak<Shader>,
    program: ProgramHandle,
}

/// Compiled programs keyed by shader id and bound to one shader instance.
///
/// Ids are only unique within one asset store, so a shader with a known id but a
/// different instance is compiled again.
#[derive(Default)]
pub(crate) struct ProgramCache {
    programs: HashMap<AssetId<Shader>, CachedProgram>,
}

impl ProgramCache {
    pub fn get_or_compile<D: GraphicsDevice>(
        &mut self,
        shader: &AssetHandle<Shader>,
        device: &mut D,
    ) -> Result<ProgramHandle, RenderError> {
        let instance = shader.downgrade();
        if let Some(cached) = self.programs.get(&shader.id()) {
            if Weak::ptr_eq(&cached.shader, &instance) {
                return Ok(cached.program);
            }
        }
        let program = device.compile_program(shader.source(), shader.kind())?;
        log::debug!("Compiled {} into {program:?}.", shader.id());
        self.programs.insert(
            shader.id(),
            CachedProgram {
                shader: instance,
                program,
            },
        );
        Ok(program)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }
}

struct CachedAtlas {
    font: Weak<Font>,
    texture: TextureHandle,
}

/// Atlas textures keyed by font id and bound to one font instance.
///
/// A font rebuilt by the asset store keeps its id but is a new instance, so its
/// atlas is uploaded again. The stale texture may still be referenced by the
/// current frame, so it is only retired here and released by the next frame.
#[derive(Default)]
pub(crate) struct AtlasCache {
    atlases: HashMap<AssetId<Font>, CachedAtlas>,
    retired: Vec<TextureHandle>,
}

impl AtlasCache {
    pub fn get_or_upload<D: GraphicsDevice>(
        &mut self,
        font: &AssetHandle<Font>,
        device: &mut D,
    ) -> Result<TextureHandle, RenderError> {
        let instance = font.downgrade();
        if let Some(cached) = self.atlases.get(&font.id()) {
            if Weak::ptr_eq(&cached.font, &instance) {
                return Ok(cached.texture);
            }
        }

        let atlas = font.atlas();
        let texture = device.upload_texture(
            atlas.width(),
            atlas.height(),
            PixelFormat::Alpha8,
            atlas.pixels(),
        )?;
        if let Some(stale) = self.atlases.insert(
            font.id(),
            CachedAtlas {
                font: instance,
                texture,
            },
        ) {
            self.retired.push(stale.texture);
            log::debug!("Replaced the atlas of {} after it was rebuilt.", font.id());
        } else {
            log::debug!("Uploaded the atlas of {} as {texture:?}.", font.id());
        }
        Ok(texture)
    }

    /// Releases atlases retired since the last call, then retires the atlases of
    /// fonts whose last handle is gone so the next call releases them.
    pub fn release_retired<D: GraphicsDevice>(&mut self, device: &mut D) {
        for texture in self.retired.drain(..) {
            device.release_texture(texture);
        }
        let retired = &mut self.retired;
        self.atlases.retain(|id, cached| {
            if cached.font.strong_count() > 0 {
                return true;
            }
            log::debug!("Retiring the atlas of {id}, its font was dropped.");
            retired.push(cached.texture);
            false
        });
    }

    /// Releases every atlas texture.
    pub fn release_all<D: GraphicsDevice>(&mut self, device: &mut D) {
        self.release_retired(device);
        for (_, cached) in self.atlases.drain() {
            device.release_texture(cached.texture);
        }
    }

    pub fn len(&self) -> usize {
        self.atlases.len()
    }
}

impl std::fmt::Debug for ProgramCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramCache")
            .field("programs", &self.programs.len())
            .finish()
    }
}

impl std::fmt::Debug for AtlasCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlasCache")
            .field("atlases", &self.atlases.len())
            .finish()
    }
}
