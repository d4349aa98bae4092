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

use super::Clock;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    sleeps: Vec<Duration>,
}

/// A virtual clock that only moves when told to.
///
/// Clones share the same timeline, so a test can keep one handle while the code
/// under test owns another. `sleep` advances virtual time instantly and records
/// the request.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
}

impl ManualClock {
    /// Creates a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves virtual time forward.
    pub fn advance(&self, by: Duration) {
        self.state.lock().now += by;
    }

    /// Jumps to an absolute time. Panics if that would move time backwards.
    pub fn set(&self, to: Duration) {
        let mut state = self.state.lock();
        assert!(to >= state.now, "ManualClock cannot go backwards");
        state.now = to;
    }

    /// Every duration passed to `sleep`, oldest first.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.lock().sleeps.clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.state.lock().now
    }

    fn sleep(&self, duration: Duration) {
        let mut state = self.state.lock();
        state.sleeps.push(duration);
        state.now += duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_a_timeline() {
        let clock = ManualClock::new();
        let other = clock.clone();

        clock.advance(Duration::from_millis(5));
        other.sleep(Duration::from_millis(10));

        assert_eq!(clock.now(), Duration::from_millis(15));
        assert_eq!(clock.sleeps(), vec![Duration::from_millis(10)]);
    }

    #[test]
    #[should_panic(expected = "cannot go backwards")]
    fn set_rejects_going_backwards() {
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(2));
        clock.set(Duration::from_secs(1));
    }
}
