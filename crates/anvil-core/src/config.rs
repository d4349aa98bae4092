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

//! JSON-backed runtime configuration.

use crate::error::{CodedError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Errors raised while reading or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("config file i/o failed")]
    Io(#[from] std::io::Error),
    /// The contents are not a valid configuration.
    #[error("config is not valid JSON for this schema")]
    Parse(#[from] serde_json::Error),
}

impl CodedError for ConfigError {
    fn code(&self) -> ErrorCode {
        match self {
            ConfigError::Io(_) => ErrorCode::new("CONFIG", 1),
            ConfigError::Parse(_) => ErrorCode::new("CONFIG", 2),
        }
    }
}

/// Window creation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial window title.
    pub title: String,
    /// Requested inner width in pixels. Ignored in fullscreen.
    pub width: u32,
    /// Requested inner height in pixels. Ignored in fullscreen.
    pub height: u32,
    /// Take the primary monitor at its native resolution.
    pub fullscreen: bool,
    /// Whether the user may resize the window.
    pub resizable: bool,
    /// Multisample count; anything above 1 enables anti-aliasing.
    pub samples: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "game window".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            resizable: true,
            samples: 1,
        }
    }
}

/// Which completed frames advance the frame counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameCounting {
    /// Every completed frame is counted, whatever the pacing mode.
    #[default]
    EveryFrame,
    /// Only frames paced by the fixed-rate limiter are counted; vsync frames are not.
    PacedOnly,
}

/// Frame pacing options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Let the display's vertical sync pace frames.
    pub vsync: bool,
    /// Target rate when `vsync` is off. Zero disables the limiter.
    pub target_fps: u32,
    /// Frame counter policy.
    pub frame_counting: FrameCounting,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            vsync: true,
            target_fps: 60,
            frame_counting: FrameCounting::EveryFrame,
        }
    }
}

/// Asset store lifetime options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Idle time after which recoverable assets are evicted. `None` or zero disables lazy loading.
    pub lazy_timeout_ms: Option<u64>,
    /// How often the background sweeper runs.
    pub sweep_interval_ms: u64,
}

impl AssetConfig {
    /// The eviction timeout, if lazy loading is enabled.
    pub fn lazy_timeout(&self) -> Option<Duration> {
        self.lazy_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// The sweeper period.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms.max(1))
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            lazy_timeout_ms: None,
            sweep_interval_ms: 1000,
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window options.
    pub window: WindowConfig,
    /// Renderer and pacing options.
    pub renderer: RendererConfig,
    /// Asset store options.
    pub assets: AssetConfig,
}

impl EngineConfig {
    /// Load the configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save the configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.renderer.vsync);
        assert_eq!(config.window.title, "game window");
        assert_eq!(config.assets.lazy_timeout(), None);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = EngineConfig::from_json(
            r#"{
                "renderer": { "vsync": false, "target_fps": 30, "frame_counting": "paced_only" },
                "assets": { "lazy_timeout_ms": 5000 }
            }"#,
        )
        .unwrap();

        assert!(!config.renderer.vsync);
        assert_eq!(config.renderer.target_fps, 30);
        assert_eq!(config.renderer.frame_counting, FrameCounting::PacedOnly);
        assert_eq!(config.assets.lazy_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.assets.sweep_interval(), Duration::from_secs(1));
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn zero_timeout_disables_lazy_loading() {
        let assets = AssetConfig {
            lazy_timeout_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(assets.lazy_timeout(), None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert_eq!(err.code().to_string(), "ERR-CONFIG-2");
    }
}
