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

use super::{Asset, AssetKind};
use crate::audio::{AudioError, AudioOutput, PcmBuffer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// A decoded audio clip.
pub struct Audio {
    source: Option<PathBuf>,
    pcm: Arc<PcmBuffer>,
    output: OnceLock<Arc<dyn AudioOutput>>,
}

impl Audio {
    /// A clip with no on-disk origin. It is never evicted.
    pub fn new(pcm: PcmBuffer) -> Self {
        Self {
            source: None,
            pcm: Arc::new(pcm),
            output: OnceLock::new(),
        }
    }

    /// A clip that remembers the file it was decoded from.
    pub fn from_source(path: impl Into<PathBuf>, pcm: PcmBuffer) -> Self {
        Self {
            source: Some(path.into()),
            pcm: Arc::new(pcm),
            output: OnceLock::new(),
        }
    }

    /// Binds the clip to an output. Only the first binding takes effect.
    ///
    /// ## Returns
    /// `true` if this call bound the output.
    pub fn attach_output(&self, output: Arc<dyn AudioOutput>) -> bool {
        self.output.set(output).is_ok()
    }

    /// Starts playback and returns immediately.
    ///
    /// # Errors
    /// [`AudioError::NoOutput`] if no output was bound, or whatever the output reports.
    pub fn play(&self) -> Result<(), AudioError> {
        let output = self.output.get().ok_or(AudioError::NoOutput)?;
        output.play(self.pcm.clone())
    }

    /// The decoded samples.
    pub fn pcm(&self) -> &PcmBuffer {
        &self.pcm
    }

    /// The file the clip was decoded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Playback length.
    pub fn duration(&self) -> Duration {
        self.pcm.duration()
    }
}

impl fmt::Debug for Audio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Audio")
            .field("source", &self.source)
            .field("frames", &self.pcm.frames())
            .field("channels", &self.pcm.channels)
            .field("sample_rate", &self.pcm.sample_rate)
            .field("has_output", &self.output.get().is_some())
            .finish()
    }
}

impl Asset for Audio {
    const KIND: AssetKind = AssetKind::Audio;
}
