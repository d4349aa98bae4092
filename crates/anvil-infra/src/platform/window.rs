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

use super::PlatformError;
use anvil_core::config::WindowConfig;
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window};

/// A builder for the game window.
///
/// In fullscreen the window is borderless on the primary monitor and takes that
/// monitor's native resolution, whatever size was requested.
#[derive(Debug, Clone)]
pub struct WindowBuilder {
    title: String,
    width: u32,
    height: u32,
    fullscreen: bool,
    resizable: bool,
}

impl WindowBuilder {
    /// Creates a builder with the default window settings.
    pub fn new() -> Self {
        Self::from_config(&WindowConfig::default())
    }

    /// Creates a builder from the engine configuration.
    pub fn from_config(config: &WindowConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            fullscreen: config.fullscreen,
            resizable: config.resizable,
        }
    }

    /// Sets the title of the window to be built.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner dimensions of the window to be built.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Builds the window using the provided `winit` event loop.
    ///
    /// # Errors
    /// [`PlatformError::NoPrimaryMonitor`] in fullscreen without a primary monitor,
    /// [`PlatformError::WindowCreation`] if the OS refuses the window.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>, PlatformError> {
        let mut attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_resizable(self.resizable)
            .with_visible(true);

        if self.fullscreen {
            let monitor = event_loop
                .primary_monitor()
                .ok_or(PlatformError::NoPrimaryMonitor)?;
            let native = monitor.size();
            log::info!(
                "Building fullscreen window '{}' at native resolution {}x{}",
                self.title,
                native.width,
                native.height
            );
            attributes = attributes
                .with_inner_size(native)
                .with_fullscreen(Some(Fullscreen::Borderless(Some(monitor))));
        } else {
            log::info!(
                "Building window with title: '{}' and size: {}x{}",
                self.title,
                self.width,
                self.height
            );
            attributes = attributes.with_inner_size(PhysicalSize::new(self.width, self.height));
        }

        let window = event_loop
            .create_window(attributes)
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;

        log::info!("Winit window created successfully (id: {:?}).", window.id());
        Ok(Arc::new(window))
    }
}

impl Default for WindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_takes_window_config() {
        let config = WindowConfig {
            title: "pong".into(),
            width: 320,
            height: 240,
            fullscreen: true,
            resizable: false,
            samples: 4,
        };

        let builder = WindowBuilder::from_config(&config).with_dimensions(640, 480);

        assert_eq!(builder.title, "pong");
        assert_eq!((builder.width, builder.height), (640, 480));
        assert!(builder.fullscreen);
        assert!(!builder.resizable);
    }
}
