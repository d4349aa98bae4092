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

use anvil_core::asset::{
    AssetHandle, AssetId, BakedGlyph, Font, GlyphAtlas, Shader, ShaderKind, Sprite, GLYPH_COUNT,
};
use anvil_core::config::RendererConfig;
use anvil_core::math::{Rgba, Vec2f};
use anvil_core::renderer::{PixelFormat, RenderError};
use anvil_core::time::ManualClock;
use anvil_render::{FramePhase, RecordingDevice, Renderer2D};
use anyhow::Result;
use std::time::Duration;

// --- Test Setup ---
type TestRenderer = Renderer2D<RecordingDevice, ManualClock>;

fn renderer_with(device: RecordingDevice, config: &RendererConfig) -> (TestRenderer, ManualClock) {
    let clock = ManualClock::new();
    (Renderer2D::with_clock(device, clock.clone(), config), clock)
}

fn renderer() -> (TestRenderer, ManualClock) {
    renderer_with(RecordingDevice::new(200, 100), &RendererConfig::default())
}

/// A tiny font where every character is an empty box except `A` and `B`.
fn font(id: u32) -> AssetHandle<Font> {
    let mut glyphs = vec![
        BakedGlyph {
            xadvance: 4.0,
            ..Default::default()
        };
        GLYPH_COUNT
    ];
    for (ch, x0) in [('A', 0u16), ('B', 8)] {
        glyphs[ch as usize - 32] = BakedGlyph {
            x0,
            y0: 0,
            x1: x0 + 8,
            y1: 10,
            xoff: 0.0,
            yoff: -10.0,
            xadvance: 9.0,
        };
    }
    let atlas = GlyphAtlas::new(16, 16, vec![255; 256], glyphs);
    AssetHandle::new(AssetId::new(id), Font::new(atlas))
}

fn vertex_shader() -> AssetHandle<Shader> {
    AssetHandle::new(
        AssetId::new(0),
        Shader::new("@vertex fn vs_main() {}", ShaderKind::Vertex),
    )
}
// ---

#[test]
fn primitives_are_counted_per_triangle() -> Result<()> {
    // --- 1. ARRANGE ---
    let (mut renderer, _clock) = renderer();
    let sprite = Sprite::from_pixels(1, 1, 4, vec![1, 2, 3, 4])?;
    let texture = renderer.create_texture(&sprite)?;
    let font = font(0);

    // --- 2. ACT ---
    renderer.begin_frame();
    renderer.draw_rect(Vec2f::new(1.0, 1.0), Vec2f::new(5.0, 5.0), Rgba::RED, 0.0);
    renderer.draw_pixel(Vec2f::new(3.0, 3.0), Rgba::WHITE);
    renderer.draw_circle(Vec2f::new(50.0, 50.0), 10.0, Rgba::GREEN, 12);
    renderer.draw_texture(&texture, Vec2f::ZERO, Vec2f::new(16.0, 16.0));
    renderer.draw_text("AB", &font, Vec2f::new(10.0, 40.0), Rgba::BLUE, 0.0)?;
    renderer.end_frame()?;

    // --- 3. ASSERT ---
    assert_eq!(renderer.primitive_count(), 2 + 2 + 12 + 2 + 4);
    let frame = renderer.device().last_frame().expect("one frame presented");
    assert_eq!(frame.triangle_count(), 22);
    Ok(())
}

#[test]
fn geometry_is_in_normalized_device_coordinates() -> Result<()> {
    let (mut renderer, _clock) = renderer();

    renderer.begin_frame();
    renderer.draw_rect(Vec2f::ZERO, Vec2f::new(100.0, 50.0), Rgba::WHITE, 0.0);
    renderer.end_frame()?;

    let frame = renderer.device().last_frame().expect("presented");
    let positions: Vec<[f32; 2]> = frame.vertices.iter().map(|v| v.position).collect();
    assert_eq!(positions[0], [-1.0, 1.0]);
    assert_eq!(positions[1], [0.0, 1.0]);
    assert_eq!(positions[2], [0.0, 0.0]);
    assert_eq!(frame.vertices[0].color, [1.0, 1.0, 1.0, 1.0]);
    Ok(())
}

#[test]
fn surface_size_is_sampled_at_begin_frame() -> Result<()> {
    let (mut renderer, _clock) = renderer();
    renderer.device_mut().resize(400, 400);

    renderer.begin_frame();
    renderer.draw_pixel(Vec2f::new(200.0, 200.0), Rgba::WHITE);
    renderer.end_frame()?;

    let frame = renderer.device().last_frame().expect("presented");
    assert_eq!(frame.vertices[0].position, [0.0, 0.0]);
    Ok(())
}

#[test]
fn clear_discards_earlier_draws() -> Result<()> {
    let (mut renderer, _clock) = renderer();

    renderer.begin_frame();
    renderer.draw_pixel(Vec2f::ZERO, Rgba::WHITE);
    renderer.clear(Rgba::BLACK);
    renderer.draw_pixel(Vec2f::ZERO, Rgba::RED);
    renderer.end_frame()?;

    let frame = renderer.device().last_frame().expect("presented");
    assert_eq!(frame.clear_color, Some(Rgba::BLACK));
    assert_eq!(frame.triangle_count(), 2);
    Ok(())
}

#[test]
fn failed_present_aborts_the_frame() -> Result<()> {
    // --- 1. ARRANGE ---
    let config = RendererConfig {
        vsync: false,
        target_fps: 10,
        ..Default::default()
    };
    let (mut renderer, clock) = renderer_with(RecordingDevice::new(10, 10), &config);
    renderer.device_mut().fail_next_present("device lost");

    // --- 2. ACT ---
    renderer.begin_frame();
    let result = renderer.end_frame();

    // --- 3. ASSERT ---
    assert!(matches!(result, Err(RenderError::Device(ref m)) if m == "device lost"));
    assert_eq!(renderer.frame().phase(), FramePhase::Idle);
    assert_eq!(renderer.frame_counter(), 0);
    assert!(clock.sleeps().is_empty());

    renderer.begin_frame();
    renderer.end_frame()?;
    assert_eq!(renderer.frame_counter(), 1);
    assert_eq!(clock.sleeps(), vec![Duration::from_millis(100)]);
    Ok(())
}

#[test]
fn shaders_compile_once_per_id() -> Result<()> {
    let (mut renderer, _clock) = renderer();
    let shader = vertex_shader();

    renderer.begin_frame();
    renderer.use_shader(&shader)?;
    renderer.draw_pixel(Vec2f::ZERO, Rgba::WHITE);
    renderer.use_shader(&shader)?;
    renderer.use_default_shader();
    renderer.draw_pixel(Vec2f::ZERO, Rgba::WHITE);
    renderer.end_frame()?;

    assert_eq!(renderer.device().programs().len(), 1);
    let frame = renderer.device().last_frame().expect("presented");
    assert_eq!(frame.batches.len(), 2);
    assert!(frame.batches[0].state.program.is_some());
    assert!(frame.batches[1].state.program.is_none());
    Ok(())
}

#[test]
fn shaders_sharing_an_id_compile_per_instance() -> Result<()> {
    // --- 1. ARRANGE ---
    let (mut renderer, _clock) = renderer();
    // Two stores may both hand out id 0.
    let first = vertex_shader();
    let second = AssetHandle::new(
        AssetId::new(0),
        Shader::new("@vertex fn vs_main() { return; }", ShaderKind::Vertex),
    );

    // --- 2. ACT ---
    renderer.begin_frame();
    renderer.use_shader(&first)?;
    renderer.draw_pixel(Vec2f::ZERO, Rgba::WHITE);
    renderer.use_shader(&second)?;
    renderer.draw_pixel(Vec2f::ZERO, Rgba::WHITE);
    renderer.end_frame()?;

    // --- 3. ASSERT ---
    let programs = renderer.device().programs();
    assert_eq!(programs.len(), 2);
    assert_eq!(programs[1].1, "@vertex fn vs_main() { return; }");
    let frame = renderer.device().last_frame().expect("presented");
    assert_eq!(frame.batches.len(), 2);
    assert_ne!(frame.batches[0].state.program, frame.batches[1].state.program);
    Ok(())
}

#[test]
fn invalid_shader_is_reported() {
    let (mut renderer, _clock) = renderer();
    let broken = AssetHandle::new(
        AssetId::new(1),
        Shader::new("@fragment fn main() {}", ShaderKind::Fragment),
    );

    let result = renderer.use_shader(&broken);

    assert!(matches!(
        result,
        Err(RenderError::ShaderCompilation {
            kind: ShaderKind::Fragment,
            ..
        })
    ));
}

#[test]
fn font_atlas_is_cached_per_instance() -> Result<()> {
    // --- 1. ARRANGE ---
    let (mut renderer, _clock) = renderer();
    let original = font(3);
    // Same id, new instance: what the asset store hands out after a rebuild.
    let rebuilt = font(3);

    // --- 2. ACT ---
    renderer.begin_frame();
    renderer.draw_text("A", &original, Vec2f::ZERO, Rgba::WHITE, 0.0)?;
    renderer.draw_text("B", &original, Vec2f::ZERO, Rgba::WHITE, 0.0)?;
    let uploads_before = renderer.device().live_textures();
    renderer.draw_text("A", &rebuilt, Vec2f::ZERO, Rgba::WHITE, 0.0)?;
    renderer.end_frame()?;
    let released_in_frame = renderer.device().released().len();
    renderer.begin_frame();
    renderer.end_frame()?;

    // --- 3. ASSERT ---
    assert_eq!(uploads_before, 1);
    // The stale atlas outlives the frame that still referenced it.
    assert_eq!(released_in_frame, 0);
    assert_eq!(renderer.device().live_textures(), 1);
    assert_eq!(renderer.device().released().len(), 1);
    Ok(())
}

#[test]
fn atlas_of_a_dropped_font_is_released() -> Result<()> {
    // --- 1. ARRANGE ---
    let (mut renderer, _clock) = renderer();
    let evicted = font(7);
    renderer.begin_frame();
    renderer.draw_text("AB", &evicted, Vec2f::ZERO, Rgba::WHITE, 0.0)?;
    renderer.end_frame()?;
    assert_eq!(renderer.device().live_textures(), 1);

    // --- 2. ACT ---
    // The store evicted the font and nothing draws with it again.
    drop(evicted);
    renderer.begin_frame();
    renderer.end_frame()?;
    let live_after_one_frame = renderer.device().live_textures();
    renderer.begin_frame();
    renderer.end_frame()?;

    // --- 3. ASSERT ---
    // Retired on the first frame, released on the next.
    assert_eq!(live_after_one_frame, 1);
    assert_eq!(renderer.device().live_textures(), 0);
    assert_eq!(renderer.device().released().len(), 1);
    Ok(())
}

#[test]
fn atlas_of_a_live_font_survives_idle_frames() -> Result<()> {
    let (mut renderer, _clock) = renderer();
    let font = font(2);
    renderer.begin_frame();
    renderer.draw_text("A", &font, Vec2f::ZERO, Rgba::WHITE, 0.0)?;
    renderer.end_frame()?;

    for _ in 0..10 {
        renderer.begin_frame();
        renderer.end_frame()?;
    }

    assert_eq!(renderer.device().live_textures(), 1);
    assert!(renderer.device().released().is_empty());
    Ok(())
}

#[test]
fn text_skips_characters_outside_the_atlas() -> Result<()> {
    let (mut renderer, _clock) = renderer();
    let font = font(0);

    renderer.begin_frame();
    renderer.draw_text("A\u{e9}B\n", &font, Vec2f::new(0.0, 20.0), Rgba::WHITE, 0.0)?;
    renderer.end_frame()?;

    assert_eq!(renderer.primitive_count(), 4);
    let frame = renderer.device().last_frame().expect("presented");
    let atlas = frame.batches[0].state.texture.expect("text is textured");
    let uploaded = renderer.device().texture(atlas).expect("atlas uploaded");
    assert_eq!(uploaded.format, PixelFormat::Alpha8);
    Ok(())
}

#[test]
fn textures_are_released_after_their_last_handle_drops() -> Result<()> {
    let (mut renderer, _clock) = renderer();
    let sprite = Sprite::from_pixels(2, 1, 3, vec![0; 6])?;
    let texture = renderer.create_texture(&sprite)?;
    let handle = texture.gpu_handle();
    assert_eq!(renderer.device().texture(handle).map(|t| t.format), Some(PixelFormat::Rgb8));

    drop(texture);
    assert!(renderer.device().released().is_empty());
    renderer.begin_frame();
    renderer.end_frame()?;

    assert_eq!(renderer.device().released(), &[handle]);
    Ok(())
}

#[test]
fn single_channel_sprites_are_rejected() -> Result<()> {
    let (mut renderer, _clock) = renderer();
    let sprite = Sprite::from_pixels(2, 2, 1, vec![0; 4])?;

    let result = renderer.create_texture(&sprite);

    assert!(matches!(
        result,
        Err(RenderError::UnsupportedPixelFormat { channels: 1 })
    ));
    Ok(())
}

#[test]
fn vsync_reaches_the_device() {
    let (mut renderer, _clock) = renderer();
    assert!(renderer.device().vsync());

    renderer.set_vsync(false);
    renderer.set_fps(144);

    assert!(!renderer.vsync());
    assert!(!renderer.device().vsync());
    assert_eq!(renderer.fps(), 144);
}

#[test]
fn wireframe_is_ignored_without_device_support() -> Result<()> {
    let device = RecordingDevice::new(10, 10).with_wireframe_support(false);
    let (mut renderer, _clock) = renderer_with(device, &RendererConfig::default());

    renderer.begin_frame();
    renderer.wireframe(true);
    renderer.draw_pixel(Vec2f::ZERO, Rgba::WHITE);
    renderer.end_frame()?;

    let frame = renderer.device().last_frame().expect("presented");
    assert!(!frame.batches[0].state.wireframe);
    Ok(())
}

#[test]
fn delta_time_follows_the_clock() -> Result<()> {
    let (mut renderer, clock) = renderer();

    clock.advance(Duration::from_millis(16));
    renderer.begin_frame();
    renderer.end_frame()?;
    clock.advance(Duration::from_millis(33));
    renderer.begin_frame();
    renderer.end_frame()?;

    assert!((renderer.delta_time() - 0.033).abs() < 1e-9);
    assert_eq!(renderer.frame_counter(), 2);
    Ok(())
}

#[test]
#[should_panic(expected = "without a matching begin_frame")]
fn end_frame_outside_a_frame_panics() {
    let (mut renderer, _clock) = renderer();
    let _ = renderer.end_frame();
}
