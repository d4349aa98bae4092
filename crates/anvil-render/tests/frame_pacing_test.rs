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

use anvil_core::config::RendererConfig;
use anvil_render::{FrameController, RecordingDevice, Renderer2D};
use anyhow::Result;
use std::thread;
use std::time::{Duration, Instant};

const FPS: u32 = 50;
const FRAMES: u32 = 5;

#[test]
fn paced_frames_never_finish_early() {
    // --- 1. ARRANGE ---
    let config = RendererConfig {
        vsync: false,
        target_fps: FPS,
        ..Default::default()
    };
    let mut frames = FrameController::from_config(&config);
    let budget = Duration::from_secs(1) / FPS;

    // --- 2. & 3. ACT & ASSERT ---
    for _ in 0..FRAMES {
        let started = Instant::now();
        frames.begin_frame();
        thread::sleep(Duration::from_millis(2));
        frames.end_frame();
        let took = started.elapsed();
        assert!(took >= budget, "frame took {took:?}, budget {budget:?}");
    }
    assert_eq!(frames.frame_counter(), u64::from(FRAMES));
}

#[test]
fn vsync_frames_are_not_slept_by_the_controller() {
    let config = RendererConfig {
        vsync: true,
        target_fps: 1,
        ..Default::default()
    };
    let mut frames = FrameController::from_config(&config);

    let started = Instant::now();
    for _ in 0..FRAMES {
        frames.begin_frame();
        frames.end_frame();
    }

    // A one-fps floor would take seconds.
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[test]
fn renderer_with_fps_paces_on_the_wall_clock() -> Result<()> {
    let mut renderer = Renderer2D::with_fps(RecordingDevice::new(64, 64), FPS);
    let budget = Duration::from_secs(1) / FPS;

    let started = Instant::now();
    for _ in 0..FRAMES {
        renderer.begin_frame();
        renderer.end_frame()?;
    }

    assert!(started.elapsed() >= budget * FRAMES);
    assert!(renderer.delta_time() > 0.0);
    assert_eq!(renderer.device().frames().len(), FRAMES as usize);
    Ok(())
}
