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

//! Input events, the bus that fans them out to listeners, and the key-state tracker.
//!
//! The platform layer translates raw window-system callbacks into [`InputEvent`]s and
//! publishes them. The owner of the [`EventBus`] drains and dispatches them on the
//! foreground thread, so listeners never run concurrently with the render loop.

mod bus;
mod input;
mod state;

pub use bus::EventBus;
pub use input::*;
pub use state::InputState;
