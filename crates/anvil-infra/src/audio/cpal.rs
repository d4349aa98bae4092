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

//! Playback through the host's default output device.

use super::mixer::Mixer;
use ::cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use anvil_core::audio::{AudioError, AudioOutput, PcmBuffer};
use parking_lot::Mutex;
use std::sync::Arc;

/// An [`AudioOutput`] on the host's default output device via CPAL.
///
/// The stream runs for the rest of the process once opened; buffers handed to
/// [`play`](AudioOutput::play) are mixed into it until they end.
pub struct CpalAudioOutput {
    mixer: Arc<Mutex<Mixer>>,
    channels: u16,
    sample_rate: u32,
}

impl CpalAudioOutput {
    /// Opens the default output device and starts its stream.
    ///
    /// # Errors
    /// [`AudioError::DeviceUnavailable`] if there is no usable output device,
    /// [`AudioError::Stream`] if the stream cannot be built or started.
    pub fn open() -> Result<Self, AudioError> {
        let host = ::cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::DeviceUnavailable("no default output device".into()))?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?;

        let channels = config.channels();
        let sample_rate = config.sample_rate();
        let mixer = Arc::new(Mutex::new(Mixer::new(channels, sample_rate)));

        let callback_mixer = Arc::clone(&mixer);
        let audio_callback = move |output: &mut [f32], _: &::cpal::OutputCallbackInfo| {
            callback_mixer.lock().mix(output);
        };
        let error_callback = |err| {
            log::error!("An error occurred on the audio stream: {err}");
        };

        let stream = match config.sample_format() {
            ::cpal::SampleFormat::F32 => device
                .build_output_stream(&config.into(), audio_callback, error_callback, None)
                .map_err(|e| AudioError::Stream(e.to_string()))?,
            format => {
                return Err(AudioError::DeviceUnavailable(format!(
                    "unsupported sample format: {format}"
                )))
            }
        };
        stream
            .play()
            .map_err(|e| AudioError::Stream(e.to_string()))?;

        // Detach the stream to keep it running for the lifetime of the application.
        std::mem::forget(stream);

        log::info!("Audio output opened ({channels} channel(s) at {sample_rate} Hz).");
        Ok(Self {
            mixer,
            channels,
            sample_rate,
        })
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl AudioOutput for CpalAudioOutput {
    fn play(&self, pcm: Arc<PcmBuffer>) -> Result<(), AudioError> {
        log::trace!(
            "Playing {} frame(s) at {} Hz.",
            pcm.frames(),
            pcm.sample_rate
        );
        self.mixer.lock().play(pcm);
        Ok(())
    }
}

impl std::fmt::Debug for CpalAudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpalAudioOutput")
            .field("channels", &self.channels)
            .field("sample_rate", &self.sample_rate)
            .field("active_voices", &self.mixer.lock().active_voices())
            .finish()
    }
}
