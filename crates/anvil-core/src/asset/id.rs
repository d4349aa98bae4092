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

use super::Asset;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// The identity of an asset within its kind.
///
/// Ids are handed out by the store in increasing order starting at zero, and an
/// evicted asset that is rebuilt from disk keeps its id.
pub struct AssetId<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AssetId<T> {
    /// Wraps a raw index.
    pub const fn new(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// The raw index.
    pub const fn index(self) -> u32 {
        self.index
    }
}

impl<T> Clone for AssetId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetId<T> {}

impl<T> PartialEq for AssetId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for AssetId<T> {}

impl<T> PartialOrd for AssetId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for AssetId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for AssetId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: Asset> fmt::Debug for AssetId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId<{}>({})", T::KIND, self.index)
    }
}

impl<T: Asset> fmt::Display for AssetId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", T::KIND, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Shader;
    use std::collections::HashSet;

    #[test]
    fn ids_compare_by_index() {
        let a = AssetId::<Shader>::new(1);
        let b = AssetId::<Shader>::new(2);
        assert!(a < b);
        assert_eq!(a, AssetId::new(1));

        let set: HashSet<_> = [a, b, AssetId::new(1)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_names_the_kind() {
        assert_eq!(AssetId::<Shader>::new(4).to_string(), "shader #4");
        assert_eq!(format!("{:?}", AssetId::<Shader>::new(4)), "AssetId<shader>(4)");
    }
}
