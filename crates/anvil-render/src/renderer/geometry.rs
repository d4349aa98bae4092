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

//! Screen-space shapes and their conversion to device vertices.

use anvil_core::math::{rotate_around, Vec2f};
use anvil_core::renderer::Vertex;
use std::f32::consts::TAU;

/// The pixel-to-NDC mapping of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// A zero-sized surface (minimized window) maps as if it were 1x1.
    pub fn new((width, height): (u32, u32)) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    /// Pixels (origin top-left, y down) to normalized device coordinates (y up).
    pub fn to_ndc(&self, p: Vec2f) -> [f32; 2] {
        [p.x / self.width * 2.0 - 1.0, 1.0 - p.y / self.height * 2.0]
    }

    pub fn vertex(&self, p: Vec2f, uv: Vec2f, color: [f32; 4]) -> Vertex {
        Vertex {
            position: self.to_ndc(p),
            uv: [uv.x, uv.y],
            color,
        }
    }

    /// Two triangles over `corners` given clockwise from the top-left.
    pub fn quad(&self, corners: [Vec2f; 4], uvs: [Vec2f; 4], color: [f32; 4]) -> [Vertex; 6] {
        let v = |i: usize| self.vertex(corners[i], uvs[i], color);
        [v(0), v(1), v(2), v(0), v(2), v(3)]
    }
}

/// Texture coordinates covering a whole texture.
pub(crate) const FULL_UV: [Vec2f; 4] = [
    Vec2f::new(0.0, 0.0),
    Vec2f::new(1.0, 0.0),
    Vec2f::new(1.0, 1.0),
    Vec2f::new(0.0, 1.0),
];

/// UVs for the atlas region `min..max`.
pub(crate) fn uv_rect(min: Vec2f, max: Vec2f) -> [Vec2f; 4] {
    [
        min,
        Vec2f::new(max.x, min.y),
        max,
        Vec2f::new(min.x, max.y),
    ]
}

/// Corners of the axis-aligned box `min..max`, rotated by `degrees` around `pivot`.
pub(crate) fn box_corners(min: Vec2f, max: Vec2f, pivot: Vec2f, degrees: f32) -> [Vec2f; 4] {
    [
        min,
        Vec2f::new(max.x, min.y),
        max,
        Vec2f::new(min.x, max.y),
    ]
    .map(|p| rotate_around(p, pivot, degrees))
}

/// Triangles of a filled circle as a fan around `center`.
pub(crate) fn circle_fan(center: Vec2f, radius: f32, segments: u32) -> Vec<[Vec2f; 3]> {
    let step = TAU / segments as f32;
    let rim = |i: u32| {
        let (sin, cos) = (step * i as f32).sin_cos();
        Vec2f::new(center.x + radius * cos, center.y + radius * sin)
    };
    (0..segments)
        .map(|i| [center, rim(i), rim(i + 1)])
        .collect()
}
