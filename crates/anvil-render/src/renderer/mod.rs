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

//! The immediate-mode 2D render surface.

mod cache;
mod geometry;

use self::cache::{AtlasCache, ProgramCache};
use self::geometry::{box_corners, circle_fan, uv_rect, Viewport, FULL_UV};
use crate::frame::FrameController;
use anvil_core::asset::{AssetHandle, Font, ReleaseToken, Shader, Sprite, Texture};
use anvil_core::config::RendererConfig;
use anvil_core::math::{Rgba, Vec2f};
use anvil_core::renderer::{
    BatchState, DrawList, GraphicsDevice, PixelFormat, RenderError, TextureHandle, Vertex,
};
use anvil_core::time::{Clock, SystemClock};
use crossbeam_channel::{Receiver, Sender};

/// Default target when a renderer is created with vsync on.
const DEFAULT_FPS: u32 = 60;

/// Draws 2D primitives into a [`GraphicsDevice`], one frame at a time.
///
/// Every draw call between [`begin_frame`](Self::begin_frame) and
/// [`end_frame`](Self::end_frame) is appended to the frame's [`DrawList`], which
/// `end_frame` hands to the device for presentation before pacing the frame.
/// Positions are in pixels from the top-left corner of the surface; rotations are
/// in degrees, clockwise.
pub struct Renderer2D<D: GraphicsDevice, C: Clock = SystemClock> {
    device: D,
    frame: FrameController<C>,
    draw_list: DrawList,
    viewport: Viewport,
    state: BatchState,
    programs: ProgramCache,
    atlases: AtlasCache,
    release_tx: Sender<TextureHandle>,
    release_rx: Receiver<TextureHandle>,
    wireframe_warned: bool,
}

impl<D: GraphicsDevice> Renderer2D<D, SystemClock> {
    /// A renderer whose pacing is left to the display (vsync on).
    pub fn with_vsync(device: D) -> Self {
        let config = RendererConfig {
            vsync: true,
            target_fps: DEFAULT_FPS,
            ..Default::default()
        };
        Self::with_clock(device, SystemClock::new(), &config)
    }

    /// A renderer capped at `fps` frames per second (vsync off).
    pub fn with_fps(device: D, fps: u32) -> Self {
        let config = RendererConfig {
            vsync: false,
            target_fps: fps,
            ..Default::default()
        };
        Self::with_clock(device, SystemClock::new(), &config)
    }

    /// A renderer configured from the engine configuration.
    pub fn from_config(device: D, config: &RendererConfig) -> Self {
        Self::with_clock(device, SystemClock::new(), config)
    }
}

impl<D: GraphicsDevice, C: Clock> Renderer2D<D, C> {
    /// A renderer whose frame timing comes from `clock`.
    pub fn with_clock(mut device: D, clock: C, config: &RendererConfig) -> Self {
        device.set_vsync(config.vsync);
        let viewport = Viewport::new(device.surface_size());
        let (release_tx, release_rx) = crossbeam_channel::unbounded();
        log::info!(
            "Renderer created (vsync: {}, target fps: {}).",
            config.vsync,
            config.target_fps
        );
        Self {
            device,
            frame: FrameController::new(clock, config),
            draw_list: DrawList::new(),
            viewport,
            state: BatchState::default(),
            programs: ProgramCache::default(),
            atlases: AtlasCache::default(),
            release_tx,
            release_rx,
            wireframe_warned: false,
        }
    }

    // --- Frame bracket ---

    /// Opens a frame: frees textures dropped since the last frame, samples the
    /// surface size and starts an empty draw list.
    ///
    /// # Panics
    /// If a frame is already open.
    pub fn begin_frame(&mut self) {
        self.frame.begin_frame();
        self.release_dropped_textures();
        self.viewport = Viewport::new(self.device.surface_size());
        self.draw_list.clear();
    }

    /// Presents the frame and paces it.
    ///
    /// # Errors
    /// The device's error if presenting failed. The frame is then closed without
    /// pacing.
    ///
    /// # Panics
    /// If no frame is open.
    pub fn end_frame(&mut self) -> Result<(), RenderError> {
        assert!(
            self.frame.in_frame(),
            "end_frame called without a matching begin_frame"
        );
        log::trace!(
            "Presenting {} triangle(s) in {} batch(es).",
            self.draw_list.triangle_count(),
            self.draw_list.batches.len()
        );
        if let Err(e) = self.device.present(&self.draw_list) {
            self.frame.abort_frame();
            log::error!("Presenting frame {} failed: {e}", self.frame.frame_counter());
            return Err(e);
        }
        self.frame.end_frame();
        Ok(())
    }

    fn release_dropped_textures(&mut self) {
        self.atlases.release_retired(&mut self.device);
        for handle in self.release_rx.try_iter() {
            self.device.release_texture(handle);
            log::trace!("Released {handle:?}.");
        }
    }

    // --- Drawing ---

    /// Clears the frame to `color`, discarding everything drawn before in this frame.
    pub fn clear(&mut self, color: Rgba) {
        self.draw_list.clear();
        self.draw_list.clear_color = Some(color);
    }

    /// Draws a filled rectangle with its top-left corner at `position`, rotated
    /// around its centre.
    pub fn draw_rect(&mut self, position: Vec2f, size: Vec2f, color: Rgba, rotation: f32) {
        let max = position + size;
        let centre = position + size * 0.5;
        let corners = box_corners(position, max, centre, rotation);
        let quad = self.viewport.quad(corners, FULL_UV, color.to_f32_array());
        self.push(None, &quad);
    }

    /// Draws a filled circle as a fan of `segments` triangles (at least 3).
    pub fn draw_circle(&mut self, center: Vec2f, radius: f32, color: Rgba, segments: u32) {
        let color = color.to_f32_array();
        let vertices: Vec<Vertex> = circle_fan(center, radius, segments.max(3))
            .into_iter()
            .flatten()
            .map(|p| self.viewport.vertex(p, Vec2f::ZERO, color))
            .collect();
        self.push(None, &vertices);
    }

    /// Fills the single pixel whose top-left corner is `position`.
    pub fn draw_pixel(&mut self, position: Vec2f, color: Rgba) {
        self.draw_rect(position, Vec2f::new(1.0, 1.0), color, 0.0);
    }

    /// Draws `text` with its baseline starting at `position`, rotated around that
    /// point. Characters the font did not bake are skipped.
    ///
    /// # Errors
    /// If the font's atlas had to be uploaded and the device refused it.
    pub fn draw_text(
        &mut self,
        text: &str,
        font: &AssetHandle<Font>,
        position: Vec2f,
        color: Rgba,
        rotation: f32,
    ) -> Result<(), RenderError> {
        let atlas_texture = self.atlases.get_or_upload(font, &mut self.device)?;
        let color = color.to_f32_array();
        let atlas = font.atlas();

        let mut cursor = position;
        let mut vertices = Vec::with_capacity(text.len() * 6);
        for ch in text.chars() {
            let Some(glyph) = atlas.quad(ch, &mut cursor) else {
                continue;
            };
            let corners = box_corners(glyph.min, glyph.max, position, rotation);
            vertices.extend(self.viewport.quad(
                corners,
                uv_rect(glyph.uv_min, glyph.uv_max),
                color,
            ));
        }
        self.push(Some(atlas_texture), &vertices);
        Ok(())
    }

    /// Draws `texture` stretched over the rectangle at `position` of `size`.
    pub fn draw_texture(&mut self, texture: &Texture, position: Vec2f, size: Vec2f) {
        let corners = box_corners(position, position + size, position, 0.0);
        let quad = self
            .viewport
            .quad(corners, FULL_UV, Rgba::WHITE.to_f32_array());
        self.push(Some(texture.gpu_handle()), &quad);
    }

    fn push(&mut self, texture: Option<TextureHandle>, vertices: &[Vertex]) {
        let state = BatchState {
            texture,
            ..self.state
        };
        self.draw_list.push_triangles(state, vertices);
        self.frame.add_primitives((vertices.len() / 3) as u64);
    }

    // --- Pipeline state ---

    /// Switches subsequent draws to outlines. Ignored, with a warning, on devices
    /// without line rasterization.
    pub fn wireframe(&mut self, enabled: bool) {
        if enabled && !self.device.supports_wireframe() {
            if !self.wireframe_warned {
                log::warn!("Wireframe requested but the graphics device does not support it.");
                self.wireframe_warned = true;
            }
            return;
        }
        self.state.wireframe = enabled;
    }

    /// Draws subsequent primitives with `shader`, compiling it on first use.
    ///
    /// # Errors
    /// [`RenderError::ShaderCompilation`] if the device rejects it.
    pub fn use_shader(&mut self, shader: &AssetHandle<Shader>) -> Result<(), RenderError> {
        let program = self.programs.get_or_compile(shader, &mut self.device)?;
        self.state.program = Some(program);
        Ok(())
    }

    /// Returns to the built-in program.
    pub fn use_default_shader(&mut self) {
        self.state.program = None;
    }

    // --- Resources ---

    /// Uploads `sprite` and wraps it in a [`Texture`] whose device memory is
    /// released at the first frame after its last handle drops.
    ///
    /// # Errors
    /// [`RenderError::UnsupportedPixelFormat`] unless the sprite is RGB or RGBA.
    pub fn create_texture(&mut self, sprite: &Sprite) -> Result<Texture, RenderError> {
        let format = match PixelFormat::from_channels(sprite.channels()) {
            Some(format @ (PixelFormat::Rgba8 | PixelFormat::Rgb8)) => format,
            _ => {
                return Err(RenderError::UnsupportedPixelFormat {
                    channels: sprite.channels(),
                })
            }
        };
        let handle =
            self.device
                .upload_texture(sprite.width(), sprite.height(), format, sprite.pixels())?;
        log::debug!(
            "Created texture {handle:?} ({}x{}, {format:?}).",
            sprite.width(),
            sprite.height()
        );
        Ok(Texture::with_release(
            sprite.width(),
            sprite.height(),
            handle,
            ReleaseToken::new(handle, self.release_tx.clone()),
        ))
    }

    // --- Settings and statistics ---

    /// Turns display synchronization on or off from the next frame on.
    pub fn set_vsync(&mut self, enabled: bool) {
        self.frame.set_vsync(enabled);
        self.device.set_vsync(enabled);
        log::info!("Vsync {}.", if enabled { "enabled" } else { "disabled" });
    }

    pub fn vsync(&self) -> bool {
        self.frame.vsync()
    }

    /// Sets the pacing target used while vsync is off. Zero means uncapped.
    pub fn set_fps(&mut self, fps: u32) {
        self.frame.set_target_fps(fps);
    }

    pub fn fps(&self) -> u32 {
        self.frame.target_fps()
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame.frame_counter()
    }

    /// Seconds between the starts of the last two frames.
    pub fn delta_time(&self) -> f64 {
        self.frame.delta_time()
    }

    /// Triangles submitted since the renderer was created.
    pub fn primitive_count(&self) -> u64 {
        self.frame.primitive_count()
    }

    pub fn frame(&self) -> &FrameController<C> {
        &self.frame
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}

impl<D: GraphicsDevice, C: Clock> Drop for Renderer2D<D, C> {
    fn drop(&mut self) {
        self.release_dropped_textures();
        self.atlases.release_all(&mut self.device);
    }
}

impl<D: GraphicsDevice, C: Clock> std::fmt::Debug for Renderer2D<D, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer2D")
            .field("phase", &self.frame.phase())
            .field("vsync", &self.frame.vsync())
            .field("target_fps", &self.frame.target_fps())
            .field("frame_counter", &self.frame.frame_counter())
            .field("programs", &self.programs.len())
            .field("atlases", &self.atlases.len())
            .finish()
    }
}
