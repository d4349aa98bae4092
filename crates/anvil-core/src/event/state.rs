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

use super::input::{Action, InputEvent, Key};
use crate::math::Vec2d;
use std::collections::HashSet;

/// Tracks which keys are currently held and where the cursor is.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    down: HashSet<Key>,
    cursor: Vec2d,
}

impl InputState {
    /// Creates an empty state: no key down, cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Key(e) => match e.action {
                Action::Press | Action::Repeat => {
                    self.down.insert(e.key);
                }
                Action::Release => {
                    self.down.remove(&e.key);
                }
            },
            InputEvent::MouseMove(e) => self.cursor = e.position,
            InputEvent::MouseButton(_) | InputEvent::CloseRequested => {}
        }
    }

    /// Whether `key` is currently held.
    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    /// Last known cursor position.
    pub fn cursor_position(&self) -> Vec2d {
        self.cursor
    }

    /// Forgets every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.down.clear();
    }
}
