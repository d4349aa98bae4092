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

use crate::math::Rgba;
use bytemuck::{Pod, Zeroable};

/// An opaque handle to a texture living on the graphics device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u64);

/// An opaque handle to a compiled shader program living on the graphics device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramHandle(pub u64);

/// Layout of texel data handed to [`GraphicsDevice::upload_texture`](super::GraphicsDevice::upload_texture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Four 8-bit channels.
    Rgba8,
    /// Three 8-bit channels.
    Rgb8,
    /// One 8-bit coverage channel, sampled as white with that alpha.
    Alpha8,
}

impl PixelFormat {
    /// Bytes per texel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Alpha8 => 1,
        }
    }

    /// The format matching a channel count, if the device can take it directly.
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            4 => Some(PixelFormat::Rgba8),
            3 => Some(PixelFormat::Rgb8),
            1 => Some(PixelFormat::Alpha8),
            _ => None,
        }
    }
}

/// A vertex already in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Clip-space position, `-1.0..=1.0` on both axes, y up.
    pub position: [f32; 2],
    /// Texture coordinates, `0.0..=1.0`, origin top-left.
    pub uv: [f32; 2],
    /// Linear RGBA multiplier.
    pub color: [f32; 4],
}

/// Pipeline state shared by every triangle of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BatchState {
    /// Texture to sample, or `None` for flat color.
    pub texture: Option<TextureHandle>,
    /// User program, or `None` for the built-in one.
    pub program: Option<ProgramHandle>,
    /// Rasterize as lines instead of filled triangles.
    pub wireframe: bool,
}

/// A run of consecutive triangles sharing one [`BatchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawBatch {
    /// State to draw with.
    pub state: BatchState,
    /// Index of the batch's first vertex in [`DrawList::vertices`].
    pub first_vertex: u32,
    /// Number of vertices (a multiple of three).
    pub vertex_count: u32,
}

/// Everything drawn during one frame, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    /// Color the frame was cleared to, if `clear` was called.
    pub clear_color: Option<Rgba>,
    /// Triangle-list vertices.
    pub vertices: Vec<Vertex>,
    /// Batches over `vertices`.
    pub batches: Vec<DrawBatch>,
}

impl DrawList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends triangles, extending the last batch when the state matches.
    pub fn push_triangles(&mut self, state: BatchState, vertices: &[Vertex]) {
        debug_assert_eq!(vertices.len() % 3, 0, "triangle list expected");
        if vertices.is_empty() {
            return;
        }
        let first_vertex = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        match self.batches.last_mut() {
            Some(last) if last.state == state => last.vertex_count += vertices.len() as u32,
            _ => self.batches.push(DrawBatch {
                state,
                first_vertex,
                vertex_count: vertices.len() as u32,
            }),
        }
    }

    /// Number of triangles in the list.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Empties the list, keeping its allocations.
    pub fn clear(&mut self) {
        self.clear_color = None;
        self.vertices.clear();
        self.batches.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [Vertex; 3] {
        [Vertex::zeroed(); 3]
    }

    #[test]
    fn matching_state_extends_last_batch() {
        let mut list = DrawList::new();
        let state = BatchState::default();

        list.push_triangles(state, &tri());
        list.push_triangles(state, &tri());

        assert_eq!(list.batches.len(), 1);
        assert_eq!(list.batches[0].vertex_count, 6);
        assert_eq!(list.triangle_count(), 2);
    }

    #[test]
    fn state_change_starts_new_batch() {
        let mut list = DrawList::new();
        let textured = BatchState {
            texture: Some(TextureHandle(3)),
            ..Default::default()
        };

        list.push_triangles(BatchState::default(), &tri());
        list.push_triangles(textured, &tri());
        list.push_triangles(BatchState::default(), &tri());

        assert_eq!(list.batches.len(), 3);
        assert_eq!(list.batches[1].first_vertex, 3);
        assert_eq!(list.batches[2].first_vertex, 6);
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = DrawList::new();
        list.clear_color = Some(Rgba::BLUE);
        list.push_triangles(BatchState::default(), &tri());
        list.clear();
        assert_eq!(list, DrawList::new());
    }
}
