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

//! Conversions between runtime types and their `wgpu` counterparts.

use anvil_core::math::Rgba;
use anvil_core::renderer::PixelFormat;

/// Expands texels of `format` to RGBA8, the only layout the device stores.
///
/// Coverage (`Alpha8`) texels become white with that alpha, so glyphs take the
/// vertex colour.
pub(super) fn expand_to_rgba8(format: PixelFormat, pixels: &[u8]) -> Vec<u8> {
    match format {
        PixelFormat::Rgba8 => pixels.to_vec(),
        PixelFormat::Rgb8 => pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        PixelFormat::Alpha8 => pixels.iter().flat_map(|&a| [255, 255, 255, a]).collect(),
    }
}

pub(super) fn clear_color(color: Rgba) -> wgpu::Color {
    let [r, g, b, a] = color.to_f32_array();
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: f64::from(a),
    }
}

pub(super) fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

/// The MSAA sample count for a requested window sample count.
pub(super) fn sample_count(requested: u32) -> u32 {
    if requested > 1 {
        4
    } else {
        1
    }
}
