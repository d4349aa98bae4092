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

//! The game window and its event loop.

use anvil_core::config::WindowConfig;
use anvil_core::event::{EventBus, InputEvent, InputState, Key, Modifiers};
use anvil_core::math::Vec2d;
use anvil_infra::platform::map_modifiers;
use anvil_infra::{translate_winit_input, PlatformError, WindowBuilder};
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// How long [`Game::create`] waits for the event loop to hand out the window.
const STARTUP_ATTEMPTS: u32 = 100;
const STARTUP_POLL: Duration = Duration::from_millis(10);

/// Window-side state, updated by `winit` callbacks while events are pumped.
struct GameHandler {
    builder: Option<WindowBuilder>,
    window: Option<Arc<Window>>,
    error: Option<PlatformError>,
    events: flume::Sender<InputEvent>,
    input: InputState,
    modifiers: Modifiers,
    size: (u32, u32),
    close_requested: bool,
}

impl GameHandler {
    fn new(builder: WindowBuilder, events: flume::Sender<InputEvent>) -> Self {
        Self {
            builder: Some(builder),
            window: None,
            error: None,
            events,
            input: InputState::new(),
            modifiers: Modifiers::NONE,
            size: (0, 0),
            close_requested: false,
        }
    }

    fn publish(&mut self, event: InputEvent) {
        self.input.apply(&event);
        if self.events.send(event).is_err() {
            log::error!("Failed to queue input event. Receiver likely disconnected.");
        }
    }
}

impl ApplicationHandler for GameHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Only the first resume creates the window.
        let Some(builder) = self.builder.take() else {
            return;
        };
        match builder.build(event_loop) {
            Ok(window) => {
                let size = window.inner_size();
                self.size = (size.width, size.height);
                self.window = Some(window);
            }
            Err(e) => self.error = Some(e),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(id) {
            return;
        }

        if let Some(input) = translate_winit_input(&event, self.modifiers) {
            self.publish(input);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested.");
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                log::debug!("Window resized to {}x{}.", size.width, size.height);
                self.size = (size.width, size.height);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = map_modifiers(modifiers.state());
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered to an unfocused window.
                self.input.release_all();
            }
            _ => {}
        }
    }
}

/// A window, its event loop, the input [`EventBus`] and the current key state.
///
/// The event loop is pumped, not run: the game drives it by calling
/// [`poll_events`](Self::poll_events) once per iteration of its own loop.
///
/// ```no_run
/// use anvil_sdk::prelude::*;
///
/// let mut game = Game::create(WindowConfig::default())?;
/// game.events_mut().on_key(|e| log::info!("{:?}", e.key));
/// while game.is_running() {
///     game.poll_events();
///     // update and draw
/// }
/// # Ok::<(), anvil_sdk::PlatformError>(())
/// ```
pub struct Game {
    event_loop: EventLoop<()>,
    handler: GameHandler,
    window: Arc<Window>,
    events: EventBus,
    title: String,
    samples: u32,
    running: bool,
}

impl Game {
    /// Creates the event loop and opens the window described by `config`.
    ///
    /// # Errors
    /// Returns a [`PlatformError`] if the event loop or the window cannot be
    /// created.
    pub fn create(config: WindowConfig) -> Result<Self, PlatformError> {
        let mut event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
        let events = EventBus::new();
        let mut handler = GameHandler::new(WindowBuilder::from_config(&config), events.sender());

        // The window can only be created from inside the loop, on `resumed`.
        let mut attempts = 0;
        let window = loop {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(STARTUP_POLL), &mut handler)
            {
                return Err(PlatformError::EventLoop(format!(
                    "event loop exited during start-up with status {code}"
                )));
            }
            if let Some(e) = handler.error.take() {
                return Err(e);
            }
            if let Some(window) = handler.window.clone() {
                break window;
            }
            attempts += 1;
            if attempts >= STARTUP_ATTEMPTS {
                return Err(PlatformError::WindowUnavailable);
            }
        };

        log::info!(
            "Game window '{}' created ({}x{}).",
            config.title,
            handler.size.0,
            handler.size.1
        );
        Ok(Self {
            event_loop,
            handler,
            window,
            events,
            title: config.title,
            samples: config.samples,
            running: true,
        })
    }

    /// Processes pending OS events without blocking, then dispatches the input
    /// they produced to the listeners registered on [`events_mut`](Self::events_mut).
    ///
    /// Key state, window size and the running flag are up to date when this returns.
    pub fn poll_events(&mut self) {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler)
        {
            log::info!("Event loop exited with status {code}.");
            self.running = false;
        }
        if self.handler.close_requested {
            self.running = false;
        }
        let dispatched = self.events.dispatch_pending();
        if dispatched > 0 {
            log::trace!("Dispatched {dispatched} input event(s).");
        }
    }

    /// `false` once the window was asked to close or [`close`](Self::close) was called.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ends the game loop and hides the window.
    pub fn close(&mut self) {
        if self.running {
            log::info!("Closing game window '{}'.", self.title);
            self.running = false;
            self.window.set_visible(false);
        }
    }

    /// Inner size of the window in physical pixels.
    pub fn window_size(&self) -> (u32, u32) {
        self.handler.size
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.window.set_title(&self.title);
    }

    /// The input bus, to register listeners on.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Whether `key` is currently held.
    pub fn is_down(&self, key: Key) -> bool {
        self.handler.input.is_down(key)
    }

    /// Last reported cursor position in window pixels.
    pub fn cursor_position(&self) -> Vec2d {
        self.handler.input.cursor_position()
    }

    /// The underlying window, for creating a graphics device on it.
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// The multisample count the window was configured with.
    pub fn samples(&self) -> u32 {
        self.samples
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("title", &self.title)
            .field("size", &self.handler.size)
            .field("running", &self.running)
            .field("events", &self.events)
            .finish()
    }
}
