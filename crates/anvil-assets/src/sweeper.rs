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

//! The background thread that periodically runs eviction sweeps.

use crossbeam_channel::{RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A periodic background task that can be stopped and joined.
///
/// The thread waits on a shutdown channel with the period as timeout, so
/// [`stop`](Self::stop) wakes it immediately. A sweep already in progress is
/// allowed to finish; `stop` returns only once the thread has exited.
pub(crate) struct Sweeper {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Starts the thread, calling `tick` once per `interval`.
    pub fn spawn(interval: Duration, mut tick: impl FnMut() + Send + 'static) -> Self {
        let (shutdown, signal) = crossbeam_channel::bounded::<()>(1);

        let handle = thread::spawn(move || {
            log::info!("Asset sweeper thread started (interval: {interval:?}).");
            loop {
                match signal.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            log::info!("Asset sweeper thread stopped.");
        });

        Self {
            shutdown: Some(shutdown),
            handle: Some(handle),
        }
    }

    /// Signals the thread and waits for it to exit. Idempotent.
    pub fn stop(&mut self) {
        // Dropping the only sender disconnects the channel.
        drop(self.shutdown.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Asset sweeper thread panicked.");
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn ticks_periodically_until_stopped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let t = ticks.clone();
        let mut sweeper = Sweeper::spawn(Duration::from_millis(5), move || {
            t.fetch_add(1, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(100));
        sweeper.stop();
        let after_stop = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));

        assert!(after_stop >= 2, "only {after_stop} ticks");
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn stop_does_not_wait_for_a_full_interval() {
        let mut sweeper = Sweeper::spawn(Duration::from_secs(60), || {});
        let started = Instant::now();
        sweeper.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
        sweeper.stop();
    }
}
