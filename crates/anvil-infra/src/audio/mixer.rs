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

//! Software mixing of fire-and-forget voices into an output stream.

use anvil_core::audio::PcmBuffer;
use std::sync::Arc;

/// One buffer being played.
#[derive(Debug)]
struct Voice {
    pcm: Arc<PcmBuffer>,
    /// Read position in source frames.
    cursor: f64,
}

/// Sums active voices into interleaved `f32` output.
///
/// Channel counts and sample rates are converted by nearest sample: a mono voice
/// plays on every output channel, and extra source channels are dropped. Voices
/// are removed once their last frame has been mixed.
#[derive(Debug)]
pub struct Mixer {
    channels: u16,
    sample_rate: u32,
    voices: Vec<Voice>,
}

impl Mixer {
    /// A mixer for an output stream of `channels` at `sample_rate`.
    pub fn new(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels: channels.max(1),
            sample_rate: sample_rate.max(1),
            voices: Vec::new(),
        }
    }

    /// Starts playing `pcm` from its first frame.
    pub fn play(&mut self, pcm: Arc<PcmBuffer>) {
        if pcm.frames() == 0 || pcm.sample_rate == 0 {
            return;
        }
        self.voices.push(Voice { pcm, cursor: 0.0 });
    }

    /// Number of voices still playing.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Overwrites `output` with the next frames of every voice, clamped to `-1..=1`.
    pub fn mix(&mut self, output: &mut [f32]) {
        output.fill(0.0);
        let out_channels = usize::from(self.channels);
        let out_rate = f64::from(self.sample_rate);

        self.voices.retain_mut(|voice| {
            let pcm = &voice.pcm;
            let src_channels = usize::from(pcm.channels);
            let frames = pcm.frames();
            let step = f64::from(pcm.sample_rate) / out_rate;

            for frame in output.chunks_exact_mut(out_channels) {
                let src_frame = voice.cursor as usize;
                if src_frame >= frames {
                    return false;
                }
                for (c, sample) in frame.iter_mut().enumerate() {
                    let src_channel = c.min(src_channels - 1);
                    let value = pcm.samples[src_frame * src_channels + src_channel];
                    *sample += f32::from(value) / 32768.0;
                }
                voice.cursor += step;
            }
            (voice.cursor as usize) < frames
        });

        for sample in output.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcm(samples: Vec<i16>, channels: u16, sample_rate: u32) -> Arc<PcmBuffer> {
        Arc::new(PcmBuffer {
            samples,
            channels,
            sample_rate,
        })
    }

    #[test]
    fn mono_voice_plays_on_every_channel() {
        let mut mixer = Mixer::new(2, 4);
        mixer.play(pcm(vec![16384, -16384], 1, 4));

        let mut out = [9.0; 4];
        mixer.mix(&mut out);

        assert_eq!(out, [0.5, 0.5, -0.5, -0.5]);
        assert_eq!(mixer.active_voices(), 0);
    }

    #[test]
    fn voices_are_summed_and_clamped() {
        let mut mixer = Mixer::new(1, 8);
        mixer.play(pcm(vec![24576; 4], 1, 8));
        mixer.play(pcm(vec![24576; 2], 1, 8));

        let mut out = [0.0; 4];
        mixer.mix(&mut out);

        assert_eq!(out, [1.0, 1.0, 0.75, 0.75]);
    }

    #[test]
    fn long_voice_spans_several_callbacks() {
        let mut mixer = Mixer::new(1, 4);
        mixer.play(pcm(vec![8192; 6], 1, 4));

        let mut out = [0.0; 4];
        mixer.mix(&mut out);
        assert_eq!(mixer.active_voices(), 1);
        mixer.mix(&mut out);

        assert_eq!(out, [0.25, 0.25, 0.0, 0.0]);
        assert_eq!(mixer.active_voices(), 0);
    }

    #[test]
    fn lower_source_rate_is_stretched() {
        let mut mixer = Mixer::new(1, 8);
        mixer.play(pcm(vec![8192, 16384], 1, 4));

        let mut out = [0.0; 4];
        mixer.mix(&mut out);

        assert_eq!(out, [0.25, 0.25, 0.5, 0.5]);
    }

    #[test]
    fn empty_buffers_are_ignored() {
        let mut mixer = Mixer::new(2, 44_100);
        mixer.play(pcm(Vec::new(), 2, 44_100));
        assert_eq!(mixer.active_voices(), 0);
    }
}
