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

use anvil_core::config::AssetConfig;
use std::time::Duration;

/// Default period of the eviction sweeper.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest sweeper period. Shorter ones are raised to it.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for an [`AssetStore`](crate::AssetStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStoreConfig {
    /// Idle time after which an asset is evicted. `None` disables lazy loading.
    pub lazy_timeout: Option<Duration>,
    /// How often the sweeper wakes up. Never below [`MIN_SWEEP_INTERVAL`] once
    /// the store is running.
    pub sweep_interval: Duration,
}

impl AssetStoreConfig {
    /// Lazy loading off: assets live until the store is shut down.
    pub fn eager() -> Self {
        Self {
            lazy_timeout: None,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Lazy loading with the given idle timeout. A zero timeout disables it.
    pub fn lazy(timeout: Duration) -> Self {
        Self {
            lazy_timeout: Some(timeout).filter(|t| !t.is_zero()),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Overrides the sweeper period, raised to at least [`MIN_SWEEP_INTERVAL`].
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval.max(MIN_SWEEP_INTERVAL);
        self
    }
}

impl Default for AssetStoreConfig {
    fn default() -> Self {
        Self::eager()
    }
}

impl From<&AssetConfig> for AssetStoreConfig {
    fn from(config: &AssetConfig) -> Self {
        Self {
            lazy_timeout: config.lazy_timeout(),
            sweep_interval: config.sweep_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_means_eager() {
        assert_eq!(AssetStoreConfig::lazy(Duration::ZERO), AssetStoreConfig::eager());
    }

    #[test]
    fn zero_sweep_interval_is_raised_to_the_minimum() {
        let config =
            AssetStoreConfig::lazy(Duration::from_secs(1)).with_sweep_interval(Duration::ZERO);
        assert_eq!(config.sweep_interval, MIN_SWEEP_INTERVAL);

        let config = config.with_sweep_interval(Duration::from_millis(20));
        assert_eq!(config.sweep_interval, Duration::from_millis(20));
    }

    #[test]
    fn converts_from_engine_config() {
        let config = AssetConfig {
            lazy_timeout_ms: Some(1500),
            sweep_interval_ms: 250,
        };
        let store_config = AssetStoreConfig::from(&config);
        assert_eq!(store_config.lazy_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(store_config.sweep_interval, Duration::from_millis(250));
    }
}
