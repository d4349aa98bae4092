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

//! Recovery records for evicted assets.

use anvil_core::asset::{Asset, AssetId};
use std::collections::HashMap;

/// Remembers, for each evicted asset of one kind, the source it can be rebuilt from.
///
/// A record exists only while its id is not live: it is written just before the
/// asset is released and taken back when the asset is rebuilt.
pub(crate) struct RecoveryLedger<T: Asset, S> {
    records: HashMap<AssetId<T>, S>,
}

impl<T: Asset, S> RecoveryLedger<T, S> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    pub fn record(&mut self, id: AssetId<T>, source: S) {
        self.records.insert(id, source);
    }

    pub fn take(&mut self, id: AssetId<T>) -> Option<S> {
        self.records.remove(&id)
    }

    pub fn contains(&self, id: AssetId<T>) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_core::asset::Font;

    #[test]
    fn take_consumes_the_record() {
        let mut ledger = RecoveryLedger::<Font, &str>::new();
        let id = AssetId::new(2);
        ledger.record(id, "a.ttf");

        assert!(ledger.contains(id));
        assert_eq!(ledger.take(id), Some("a.ttf"));
        assert!(!ledger.contains(id));
        assert_eq!(ledger.take(id), None);
        assert_eq!(ledger.len(), 0);
    }
}
