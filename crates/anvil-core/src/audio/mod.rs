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

//! Decoded audio and the playback contract.

use crate::error::{CodedError, ErrorCode};
use std::sync::Arc;
use std::time::Duration;

/// Interleaved 16-bit PCM samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    /// Samples, interleaved by channel.
    pub samples: Vec<i16>,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
}

impl PcmBuffer {
    /// Number of frames (one sample per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    /// Playback length at the buffer's own sample rate.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}

/// An audio output device that plays buffers fire-and-forget.
pub trait AudioOutput: Send + Sync {
    /// Starts playing `pcm` from the beginning, mixed with whatever is already playing.
    /// Returns as soon as the buffer is queued.
    fn play(&self, pcm: Arc<PcmBuffer>) -> Result<(), AudioError>;
}

/// Errors of the audio subsystem.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// No output device could be opened.
    #[error("no audio output device available: {0}")]
    DeviceUnavailable(String),
    /// The output stream failed.
    #[error("audio stream error: {0}")]
    Stream(String),
    /// Playback was requested before an output was attached.
    #[error("no audio output attached")]
    NoOutput,
}

impl CodedError for AudioError {
    fn code(&self) -> ErrorCode {
        let number = match self {
            AudioError::DeviceUnavailable(_) => 1,
            AudioError::Stream(_) => 2,
            AudioError::NoOutput => 3,
        };
        ErrorCode::new("AUDIO", number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_counts_frames_not_samples() {
        let pcm = PcmBuffer {
            samples: vec![0; 44_100 * 2],
            channels: 2,
            sample_rate: 44_100,
        };
        assert_eq!(pcm.frames(), 44_100);
        assert_eq!(pcm.duration(), Duration::from_secs(1));
    }

    #[test]
    fn degenerate_buffers_have_zero_length() {
        let pcm = PcmBuffer {
            samples: vec![1, 2, 3],
            channels: 0,
            sample_rate: 0,
        };
        assert_eq!(pcm.frames(), 0);
        assert_eq!(pcm.duration(), Duration::ZERO);
    }
}
