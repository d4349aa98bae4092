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

use anvil_core::asset::{
    AssetError, AssetLoader, AudioDecoder, FontBaker, FontSource, GlyphAtlas, SourceLoader,
    ATLAS_SIZE,
};
use anvil_core::audio::PcmBuffer;
use anvil_core::error::{CodedError, ErrorCode};
use anyhow::Result;
use tempfile::tempdir;

// --- Test Setup: byte-counting codecs ---
struct LengthBaker;
impl FontBaker for LengthBaker {
    fn bake(&self, bytes: &[u8], size: u32) -> Result<GlyphAtlas, AssetError> {
        if bytes.starts_with(b"bad") {
            return Err(AssetError::InvalidFont("unrecognized header".into()));
        }
        let mut pixels = vec![0; (ATLAS_SIZE * ATLAS_SIZE) as usize];
        pixels[0] = bytes.len() as u8;
        pixels[1] = size as u8;
        Ok(GlyphAtlas::new(ATLAS_SIZE, ATLAS_SIZE, pixels, Vec::new()))
    }
}

struct RawDecoder;
impl AudioDecoder for RawDecoder {
    fn decode(&self, bytes: Vec<u8>, extension: Option<&str>) -> Result<PcmBuffer, AssetError> {
        assert_eq!(extension, Some("raw"));
        Ok(PcmBuffer {
            samples: bytes.into_iter().map(i16::from).collect(),
            channels: 1,
            sample_rate: 4,
        })
    }
}
// ---

#[test]
fn loaded_font_remembers_its_source() -> Result<()> {
    // --- 1. ARRANGE ---
    let dir = tempdir()?;
    let path = dir.path().join("mono.ttf");
    std::fs::write(&path, b"12345")?;
    let loader = SourceLoader::new(LengthBaker, RawDecoder);
    let source = FontSource { path, size: 18 };

    // --- 2. ACT ---
    let font = loader.load_font(&source)?;

    // --- 3. ASSERT ---
    assert_eq!(font.source(), Some(&source));
    assert_eq!(font.atlas().pixels()[0], 5);
    assert_eq!(font.atlas().pixels()[1], 18);
    Ok(())
}

#[test]
fn loaded_audio_remembers_its_source() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("click.raw");
    std::fs::write(&path, [1u8, 2, 3, 4])?;
    let loader = SourceLoader::new(LengthBaker, RawDecoder);

    let audio = loader.load_audio(&path)?;

    assert_eq!(audio.source(), Some(path.as_path()));
    assert_eq!(audio.pcm().samples, vec![1, 2, 3, 4]);
    assert_eq!(audio.duration(), std::time::Duration::from_secs(1));
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let loader = SourceLoader::new(LengthBaker, RawDecoder);
    let source = FontSource {
        path: dir.path().join("absent.ttf"),
        size: 12,
    };

    let err = loader.load_font(&source).unwrap_err();

    assert!(matches!(err, AssetError::Io { .. }));
    assert_eq!(err.code(), ErrorCode::new("ASSET", 1));
}

#[test]
fn baker_failure_names_the_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.ttf");
    std::fs::write(&path, b"bad font")?;
    let loader = SourceLoader::new(LengthBaker, RawDecoder);

    let err = loader
        .load_font(&FontSource {
            path: path.clone(),
            size: 12,
        })
        .unwrap_err();

    match err {
        AssetError::Load { path: failed, source } => {
            assert_eq!(failed, path);
            assert!(matches!(*source, AssetError::InvalidFont(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}
