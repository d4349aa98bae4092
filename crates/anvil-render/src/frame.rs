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

//! Frame bracketing, pacing and frame statistics.

use anvil_core::config::{FrameCounting, RendererConfig};
use anvil_core::time::{Clock, SystemClock};
use std::time::Duration;

/// Where a [`FrameController`] is in its frame bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// Between frames.
    Idle,
    /// Between `begin_frame` and `end_frame`.
    InFrame,
}

/// Brackets frames, enforces the pacing floor and keeps frame statistics.
///
/// With vsync on, pacing is left to the display's presentation. With vsync off and
/// a non-zero target, `end_frame` sleeps so that a whole frame lasts at least
/// `1 / target_fps`. Calling `begin_frame` or `end_frame` out of order panics.
#[derive(Debug)]
pub struct FrameController<C: Clock = SystemClock> {
    clock: C,
    phase: FramePhase,
    vsync: bool,
    target_fps: u32,
    counting: FrameCounting,
    frame_start: Duration,
    last_start: Duration,
    delta: Duration,
    frame_counter: u64,
    primitive_count: u64,
}

impl FrameController<SystemClock> {
    /// Creates a controller on the wall clock.
    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new(SystemClock::new(), config)
    }
}

impl<C: Clock> FrameController<C> {
    /// Creates a controller driven by `clock`.
    ///
    /// The first frame's delta is measured from this call.
    pub fn new(clock: C, config: &RendererConfig) -> Self {
        let now = clock.now();
        Self {
            clock,
            phase: FramePhase::Idle,
            vsync: config.vsync,
            target_fps: config.target_fps,
            counting: config.frame_counting,
            frame_start: now,
            last_start: now,
            delta: Duration::ZERO,
            frame_counter: 0,
            primitive_count: 0,
        }
    }

    /// Opens a frame and computes the delta since the previous frame's start.
    ///
    /// # Panics
    /// If a frame is already open.
    pub fn begin_frame(&mut self) {
        assert_eq!(
            self.phase,
            FramePhase::Idle,
            "begin_frame called while a frame is already in progress"
        );
        let now = self.clock.now();
        self.delta = now.saturating_sub(self.last_start);
        self.last_start = now;
        self.frame_start = now;
        self.phase = FramePhase::InFrame;
        log::trace!("Frame {} started, delta {:?}.", self.frame_counter, self.delta);
    }

    /// Closes the frame after it was presented, sleeping out the rest of the frame
    /// budget when pacing is on.
    ///
    /// # Panics
    /// If no frame is open.
    pub fn end_frame(&mut self) {
        self.expect_in_frame("end_frame");
        self.phase = FramePhase::Idle;

        if let Some(budget) = self.frame_budget() {
            let elapsed = self.clock.now().saturating_sub(self.frame_start);
            if elapsed < budget {
                self.clock.sleep(budget - elapsed);
            }
        }

        let counted = match self.counting {
            FrameCounting::EveryFrame => true,
            FrameCounting::PacedOnly => !self.vsync,
        };
        if counted {
            self.frame_counter += 1;
        }
    }

    /// Closes the frame without pacing or counting it.
    ///
    /// # Panics
    /// If no frame is open.
    pub fn abort_frame(&mut self) {
        self.expect_in_frame("abort_frame");
        self.phase = FramePhase::Idle;
    }

    fn expect_in_frame(&self, operation: &str) {
        assert_eq!(
            self.phase,
            FramePhase::InFrame,
            "{operation} called without a matching begin_frame"
        );
    }

    /// The minimum frame duration `end_frame` enforces, if any.
    pub fn frame_budget(&self) -> Option<Duration> {
        if self.vsync || self.target_fps == 0 {
            None
        } else {
            Some(Duration::from_secs(1) / self.target_fps)
        }
    }

    /// The current phase.
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Whether a frame is open.
    pub fn in_frame(&self) -> bool {
        self.phase == FramePhase::InFrame
    }

    /// Takes effect at the next `end_frame`.
    pub fn set_vsync(&mut self, enabled: bool) {
        self.vsync = enabled;
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    /// Takes effect at the next `end_frame`. Zero means uncapped.
    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps;
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    pub fn set_frame_counting(&mut self, counting: FrameCounting) {
        self.counting = counting;
    }

    pub fn frame_counting(&self) -> FrameCounting {
        self.counting
    }

    /// Number of frames counted so far (see [`FrameCounting`]).
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    /// Time between the last two frame starts.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// [`delta`](Self::delta) in seconds.
    pub fn delta_time(&self) -> f64 {
        self.delta.as_secs_f64()
    }

    /// Running total of triangles submitted through the renderer.
    pub fn primitive_count(&self) -> u64 {
        self.primitive_count
    }

    pub fn add_primitives(&mut self, count: u64) {
        self.primitive_count += count;
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_core::time::ManualClock;

    fn paced(fps: u32) -> RendererConfig {
        RendererConfig {
            vsync: false,
            target_fps: fps,
            ..Default::default()
        }
    }

    fn synced() -> RendererConfig {
        RendererConfig {
            vsync: true,
            ..Default::default()
        }
    }

    #[test]
    fn delta_is_time_between_frame_starts() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_millis(5));
        let mut frames = FrameController::new(clock.clone(), &synced());

        clock.advance(Duration::from_millis(7));
        frames.begin_frame();
        // First delta is measured from construction.
        assert_eq!(frames.delta(), Duration::from_millis(7));
        frames.end_frame();

        clock.advance(Duration::from_millis(20));
        frames.begin_frame();
        assert_eq!(frames.delta(), Duration::from_millis(20));
        assert!((frames.delta_time() - 0.020).abs() < 1e-9);
        frames.end_frame();
    }

    #[test]
    fn paced_frame_sleeps_out_the_budget() {
        let clock = ManualClock::new();
        let mut frames = FrameController::new(clock.clone(), &paced(50));

        frames.begin_frame();
        clock.advance(Duration::from_millis(5));
        frames.end_frame();

        assert_eq!(clock.sleeps(), vec![Duration::from_millis(15)]);
        assert_eq!(clock.now(), Duration::from_millis(20));
    }

    #[test]
    fn slow_frame_does_not_sleep() {
        let clock = ManualClock::new();
        let mut frames = FrameController::new(clock.clone(), &paced(50));

        frames.begin_frame();
        clock.advance(Duration::from_millis(30));
        frames.end_frame();

        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn vsync_and_uncapped_never_sleep() {
        let clock = ManualClock::new();
        let mut synced = FrameController::new(clock.clone(), &synced());
        let mut uncapped = FrameController::new(clock.clone(), &paced(0));

        synced.begin_frame();
        synced.end_frame();
        uncapped.begin_frame();
        uncapped.end_frame();

        assert!(clock.sleeps().is_empty());
        assert_eq!(uncapped.frame_budget(), None);
    }

    #[test]
    fn frame_counting_modes() {
        let clock = ManualClock::new();
        let mut every = FrameController::new(clock.clone(), &synced());
        let mut paced_only = FrameController::new(
            clock.clone(),
            &RendererConfig {
                frame_counting: FrameCounting::PacedOnly,
                ..synced()
            },
        );

        for frames in [&mut every, &mut paced_only] {
            frames.begin_frame();
            frames.end_frame();
            frames.set_vsync(false);
            frames.begin_frame();
            frames.end_frame();
        }

        assert_eq!(every.frame_counter(), 2);
        assert_eq!(paced_only.frame_counter(), 1);
    }

    #[test]
    fn settings_apply_at_next_end_frame() {
        let clock = ManualClock::new();
        let mut frames = FrameController::new(clock.clone(), &synced());

        frames.begin_frame();
        frames.set_vsync(false);
        frames.set_target_fps(100);
        frames.end_frame();

        assert_eq!(clock.sleeps(), vec![Duration::from_millis(10)]);
    }

    #[test]
    fn aborted_frame_is_not_paced_or_counted() {
        let clock = ManualClock::new();
        let mut frames = FrameController::new(clock.clone(), &paced(10));

        frames.begin_frame();
        frames.abort_frame();

        assert_eq!(frames.phase(), FramePhase::Idle);
        assert_eq!(frames.frame_counter(), 0);
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    #[should_panic(expected = "already in progress")]
    fn double_begin_panics() {
        let mut frames = FrameController::new(ManualClock::new(), &synced());
        frames.begin_frame();
        frames.begin_frame();
    }

    #[test]
    #[should_panic(expected = "without a matching begin_frame")]
    fn end_without_begin_panics() {
        let mut frames = FrameController::new(ManualClock::new(), &synced());
        frames.end_frame();
    }
}
