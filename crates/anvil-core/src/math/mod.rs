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

//! Small 2D math primitives used across the runtime.
//!
//! Screen-space coordinates are in pixels with the origin at the top-left corner
//! and the y axis pointing down. Angles exposed by the drawing API are in degrees.

pub mod color;
pub mod vector;

pub use self::color::Rgba;
pub use self::vector::{Vec2, Vec2d, Vec2f, Vec2i, Vec2u};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

/// Rotates `point` around `pivot` by `degrees`, clockwise on screen (y down).
#[inline]
pub fn rotate_around(point: Vec2f, pivot: Vec2f, degrees: f32) -> Vec2f {
    if degrees == 0.0 {
        return point;
    }
    let (sin, cos) = (degrees * DEG_TO_RAD).sin_cos();
    let d = point - pivot;
    Vec2f::new(d.x * cos - d.y * sin + pivot.x, d.x * sin + d.y * cos + pivot.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec2f, b: Vec2f) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn zero_rotation_is_identity() {
        let p = Vec2f::new(3.0, 4.0);
        assert_eq!(rotate_around(p, Vec2f::new(1.0, 1.0), 0.0), p);
    }

    #[test]
    fn quarter_turn_is_clockwise_on_screen() {
        // With y pointing down, +90 degrees takes +x to +y.
        let rotated = rotate_around(Vec2f::new(2.0, 0.0), Vec2f::ZERO, 90.0);
        assert!(approx_eq(rotated, Vec2f::new(0.0, 2.0)), "got {rotated:?}");
    }

    #[test]
    fn rotation_keeps_distance_to_pivot() {
        let pivot = Vec2f::new(10.0, 10.0);
        let p = Vec2f::new(15.0, 10.0);
        let rotated = rotate_around(p, pivot, 37.0);
        assert!(((rotated - pivot).length() - 5.0).abs() < 1e-4);
    }
}
