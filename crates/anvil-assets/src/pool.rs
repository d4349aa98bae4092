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

//! Live assets of one kind, with their id counter and last-access times.

use anvil_core::asset::{Asset, AssetHandle, AssetId};
use std::collections::HashMap;
use std::time::Duration;

struct Entry<T: Asset> {
    handle: AssetHandle<T>,
    last_access: Duration,
}

/// The live assets of one kind.
pub(crate) struct Pool<T: Asset> {
    live: HashMap<AssetId<T>, Entry<T>>,
    next_id: u32,
}

impl<T: Asset> Pool<T> {
    pub fn new() -> Self {
        Self {
            live: HashMap::new(),
            next_id: 0,
        }
    }

    /// Stores `asset` under the next fresh id.
    pub fn insert(&mut self, asset: T, now: Duration) -> AssetHandle<T> {
        let id = AssetId::new(self.next_id);
        self.next_id += 1;
        self.place(id, asset, now)
    }

    /// Stores a rebuilt asset under the id it had before eviction. The fresh-id
    /// counter is not touched.
    pub fn reinsert(&mut self, id: AssetId<T>, asset: T, now: Duration) -> AssetHandle<T> {
        debug_assert!(id.index() < self.next_id, "{id} was never issued");
        debug_assert!(!self.live.contains_key(&id), "{id} is already live");
        self.place(id, asset, now)
    }

    fn place(&mut self, id: AssetId<T>, asset: T, now: Duration) -> AssetHandle<T> {
        let handle = AssetHandle::new(id, asset);
        self.live.insert(
            id,
            Entry {
                handle: handle.clone(),
                last_access: now,
            },
        );
        handle
    }

    /// Returns the live asset and refreshes its last-access time.
    pub fn touch(&mut self, id: AssetId<T>, now: Duration) -> Option<AssetHandle<T>> {
        let entry = self.live.get_mut(&id)?;
        entry.last_access = now;
        Some(entry.handle.clone())
    }

    /// Ids of live assets idle for strictly longer than `timeout` at `now`,
    /// restricted to those `evictable` accepts. Sorted for deterministic logs.
    pub fn idle(
        &self,
        now: Duration,
        timeout: Duration,
        evictable: impl Fn(&T) -> bool,
    ) -> Vec<AssetId<T>> {
        let mut ids: Vec<_> = self
            .live
            .iter()
            .filter(|(_, e)| now.saturating_sub(e.last_access) > timeout && evictable(&*e.handle))
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Visits every live asset without refreshing its last-access time.
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        for entry in self.live.values() {
            f(&entry.handle);
        }
    }

    pub fn remove(&mut self, id: AssetId<T>) -> Option<AssetHandle<T>> {
        self.live.remove(&id).map(|e| e.handle)
    }

    pub fn contains(&self, id: AssetId<T>) -> bool {
        self.live.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_core::asset::{Shader, ShaderKind};

    fn shader() -> Shader {
        Shader::new("", ShaderKind::Vertex)
    }

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut pool = Pool::new();
        let ids: Vec<u32> = (0..4)
            .map(|_| pool.insert(shader(), Duration::ZERO).id().index())
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn reinsert_keeps_the_counter() {
        let mut pool = Pool::new();
        let first = pool.insert(shader(), Duration::ZERO).id();
        pool.insert(shader(), Duration::ZERO);
        pool.remove(first);

        let rebuilt = pool.reinsert(first, shader(), Duration::ZERO);
        let fresh = pool.insert(shader(), Duration::ZERO);

        assert_eq!(rebuilt.id(), first);
        assert_eq!(fresh.id().index(), 2);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn idle_is_strictly_greater_than_timeout() {
        let mut pool = Pool::new();
        let a = pool.insert(shader(), Duration::from_secs(0)).id();
        let b = pool.insert(shader(), Duration::from_secs(1)).id();
        let timeout = Duration::from_secs(2);

        // a has been idle exactly 2s: not yet.
        assert!(pool.idle(Duration::from_secs(2), timeout, |_| true).is_empty());
        assert_eq!(pool.idle(Duration::from_millis(2001), timeout, |_| true), vec![a]);
        assert_eq!(pool.idle(Duration::from_secs(4), timeout, |_| true), vec![a, b]);
        assert!(pool.idle(Duration::from_secs(4), timeout, |_| false).is_empty());
    }

    #[test]
    fn touch_refreshes_last_access() {
        let mut pool = Pool::new();
        let id = pool.insert(shader(), Duration::ZERO).id();
        let timeout = Duration::from_secs(1);

        assert!(pool.touch(id, Duration::from_millis(900)).is_some());

        assert!(pool.idle(Duration::from_millis(1500), timeout, |_| true).is_empty());
        assert_eq!(pool.idle(Duration::from_millis(1901), timeout, |_| true), vec![id]);
    }
}
