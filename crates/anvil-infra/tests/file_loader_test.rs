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

use anvil_core::asset::{AssetError, AssetLoader, FontSource};
use anvil_core::error::{CodedError, ErrorCode};
use anvil_infra::file_loader;
use anyhow::Result;
use std::path::Path;
use tempfile::tempdir;

fn write_wav(path: &Path, channels: u16, sample_rate: u32, samples: &[i16]) -> Result<()> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

#[test]
fn decodes_a_wav_file_to_interleaved_pcm() -> Result<()> {
    // --- 1. ARRANGE ---
    let dir = tempdir()?;
    let path = dir.path().join("blip.wav");
    let samples: Vec<i16> = (0..400).map(|i| (i * 37 - 7000) as i16).collect();
    write_wav(&path, 2, 22_050, &samples)?;

    // --- 2. ACT ---
    let audio = file_loader().load_audio(&path)?;

    // --- 3. ASSERT ---
    assert_eq!(audio.source(), Some(path.as_path()));
    let pcm = audio.pcm();
    assert_eq!(pcm.channels, 2);
    assert_eq!(pcm.sample_rate, 22_050);
    assert_eq!(pcm.frames(), 200);
    assert_eq!(pcm.samples, samples);
    Ok(())
}

#[test]
fn undecodable_audio_reports_the_path() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.ogg");
    std::fs::write(&path, b"OggS but not really")?;

    let err = file_loader().load_audio(&path).unwrap_err();

    assert!(matches!(&err, AssetError::Load { path: p, .. } if p == &path));
    assert_eq!(err.code(), ErrorCode::new("ASSET", 4));
    Ok(())
}

#[test]
fn missing_font_files_are_io_errors() {
    let source = FontSource {
        path: "does/not/exist.ttf".into(),
        size: 16,
    };

    let err = file_loader().load_font(&source).unwrap_err();

    assert!(matches!(err, AssetError::Io { .. }));
    assert_eq!(err.code(), ErrorCode::new("ASSET", 1));
}

#[test]
fn invalid_font_files_are_rejected() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("fake.ttf");
    std::fs::write(&path, b"this is a text file")?;

    let err = file_loader()
        .load_font(&FontSource { path, size: 16 })
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::new("ASSET", 2));
    Ok(())
}
