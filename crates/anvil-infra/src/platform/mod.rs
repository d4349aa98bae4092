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

//! Window creation and input translation on top of `winit`.

mod input;
mod window;

pub use self::input::{map_modifiers, translate_winit_input};
pub use self::window::WindowBuilder;

use anvil_core::error::{CodedError, ErrorCode};

/// Errors of the windowing layer.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS event loop could not be created.
    #[error("failed to create the event loop: {0}")]
    EventLoop(String),
    /// The OS refused to create the window.
    #[error("failed to create the window: {0}")]
    WindowCreation(String),
    /// Fullscreen was requested but no primary monitor is connected.
    #[error("fullscreen requested but no primary monitor was found")]
    NoPrimaryMonitor,
    /// The window was needed before the event loop produced it.
    #[error("the window was not created by the event loop")]
    WindowUnavailable,
}

impl CodedError for PlatformError {
    fn code(&self) -> ErrorCode {
        let number = match self {
            PlatformError::EventLoop(_) => 1,
            PlatformError::WindowCreation(_) => 2,
            PlatformError::NoPrimaryMonitor => 3,
            PlatformError::WindowUnavailable => 4,
        };
        ErrorCode::new("PLATFORM", number)
    }
}
