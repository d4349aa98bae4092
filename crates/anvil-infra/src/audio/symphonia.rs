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

//! Decoding of compressed audio files with `symphonia`.

use anvil_core::asset::{AssetError, AudioDecoder};
use anvil_core::audio::PcmBuffer;
use std::io::Cursor;
use ::symphonia::core::{
    audio::SampleBuffer, codecs::DecoderOptions, errors::Error as SymphoniaError,
    formats::FormatOptions, io::MediaSourceStream, meta::MetadataOptions, probe::Hint,
};

/// An [`AudioDecoder`] for every container and codec `symphonia` ships with
/// (WAV, OGG/Vorbis, MP3, FLAC, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }
}

fn decode_error(e: impl std::fmt::Display) -> AssetError {
    AssetError::Decode(e.to_string())
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, bytes: Vec<u8>, extension: Option<&str>) -> Result<PcmBuffer, AssetError> {
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = extension {
            hint.with_extension(ext);
        }
        let meta_opts: MetadataOptions = Default::default();
        let fmt_opts: FormatOptions = Default::default();
        let probed = ::symphonia::default::get_probe()
            .format(&hint, mss, &fmt_opts, &meta_opts)
            .map_err(decode_error)?;
        let mut format_reader = probed.format;

        let track = format_reader
            .default_track()
            .ok_or_else(|| AssetError::Decode("no default audio track".into()))?;
        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| AssetError::Decode("unknown sample rate".into()))?;
        let channels = track
            .codec_params
            .channels
            .ok_or_else(|| AssetError::Decode("unknown channel count".into()))?
            .count() as u16;

        let dec_opts: DecoderOptions = Default::default();
        let mut decoder = ::symphonia::default::get_codecs()
            .make(&track.codec_params, &dec_opts)
            .map_err(decode_error)?;

        let mut samples = Vec::<i16>::new();
        loop {
            let packet = match format_reader.next_packet() {
                Ok(packet) => packet,
                // End of stream.
                Err(SymphoniaError::IoError(_)) => break,
                Err(e) => return Err(decode_error(e)),
            };
            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    // Planar to interleaved.
                    let mut sample_buf =
                        SampleBuffer::<i16>::new(decoded.capacity() as u64, *decoded.spec());
                    sample_buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(sample_buf.samples());
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    log::warn!("Skipping undecodable audio packet: {e}");
                }
                Err(e) => return Err(decode_error(e)),
            }
        }

        log::debug!(
            "Decoded {} sample(s), {channels} channel(s) at {sample_rate} Hz.",
            samples.len()
        );
        Ok(PcmBuffer {
            samples,
            channels,
            sample_rate,
        })
    }
}
