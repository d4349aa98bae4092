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

use super::{Asset, AssetId};
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Weak};

/// A thread-safe, reference-counted handle to a stored asset.
///
/// This acts as a smart pointer, providing shared ownership of an asset's data
/// together with its id. Cloning a handle is cheap. When the store evicts an
/// asset, handles already given out stay valid; the payload is freed once the
/// last one is dropped.
pub struct AssetHandle<T: Asset> {
    id: AssetId<T>,
    inner: Arc<T>,
}

impl<T: Asset> AssetHandle<T> {
    /// Creates a handle that takes ownership of the asset data.
    pub fn new(id: AssetId<T>, asset: T) -> Self {
        Self {
            id,
            inner: Arc::new(asset),
        }
    }

    /// The asset's id.
    pub fn id(&self) -> AssetId<T> {
        self.id
    }

    /// Whether two handles point at the same instance. A rebuilt asset has the
    /// same id as the evicted one but is a different instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// A weak reference to the payload, for caches that must not keep it alive.
    pub fn downgrade(&self) -> Weak<T> {
        Arc::downgrade(&self.inner)
    }

    /// Number of live handles to this instance.
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<T: Asset> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: self.inner.clone(),
        }
    }
}

impl<T: Asset> Deref for AssetHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: Asset> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetHandle")
            .field("id", &self.id)
            .field("strong_count", &Arc::strong_count(&self.inner))
            .finish()
    }
}
