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

//! # Anvil Assets
//!
//! The asset store: it owns every shader, font, texture and audio clip, hands out
//! per-kind integer ids, evicts assets that sat idle longer than a timeout, and
//! rebuilds evicted fonts and audio clips from disk when they are asked for again,
//! under the same id.
//!
//! All mutable state sits behind one store-wide lock. Eviction runs on a background
//! thread owned by the store and joined when the store is shut down or dropped.

#![warn(missing_docs)]

mod config;
mod ledger;
mod pool;
mod store;
mod sweeper;

pub use config::AssetStoreConfig;
pub use store::{AssetStore, EvictionReport};
