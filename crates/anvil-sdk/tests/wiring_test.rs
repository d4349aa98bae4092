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

use anvil_core::asset::{AssetKind, Shader, ShaderKind};
use anvil_core::config::{AssetConfig, EngineConfig};
use anvil_sdk::create_asset_store;
use std::time::Duration;

#[test]
fn asset_store_follows_the_asset_section() {
    // --- 1. ARRANGE ---
    let eager = AssetConfig::default();
    let lazy = AssetConfig {
        lazy_timeout_ms: Some(750),
        sweep_interval_ms: 50,
    };

    // --- 2. ACT ---
    let eager_store = create_asset_store(&eager);
    let lazy_store = create_asset_store(&lazy);

    // --- 3. ASSERT ---
    assert_eq!(eager_store.lazy_timeout(), None);
    assert_eq!(lazy_store.lazy_timeout(), Some(Duration::from_millis(750)));
}

#[test]
fn store_from_a_config_file_is_usable() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("engine.json");
    std::fs::write(&path, r#"{ "assets": { "lazy_timeout_ms": 0 } }"#)?;
    let config = EngineConfig::from_file(&path)?;

    let store = create_asset_store(&config.assets);
    let id = store.add_shader(Shader::new("@vertex fn vs_main() {}", ShaderKind::Vertex));

    assert_eq!(store.lazy_timeout(), None);
    assert!(store.get_shader(id).is_some());
    assert_eq!(store.live_count(AssetKind::Shader), 1);
    store.shutdown();
    assert_eq!(store.live_count(AssetKind::Shader), 0);
    Ok(())
}
