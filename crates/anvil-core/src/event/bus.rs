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

use super::input::{InputEvent, KeyEvent, MouseButtonEvent, MouseMoveEvent};
use std::fmt;

type Listener<E> = Box<dyn FnMut(&E)>;

/// Queues input events and fans them out to registered listeners.
///
/// Producers (the window system pump, or any thread holding a [`sender`](Self::sender))
/// only enqueue. Listeners run when the owner calls [`dispatch_pending`](Self::dispatch_pending),
/// in registration order for each event and in FIFO order across events.
pub struct EventBus {
    sender: flume::Sender<InputEvent>,
    receiver: flume::Receiver<InputEvent>,
    key_listeners: Vec<Listener<KeyEvent>>,
    mouse_button_listeners: Vec<Listener<MouseButtonEvent>>,
    mouse_move_listeners: Vec<Listener<MouseMoveEvent>>,
    close_listeners: Vec<Box<dyn FnMut()>>,
}

impl EventBus {
    /// Creates a new EventBus with an unbounded queue and no listeners.
    ///
    /// ## Returns
    /// A new instance of the EventBus struct.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::info!("Input EventBus initialized.");
        Self {
            sender,
            receiver,
            key_listeners: Vec::new(),
            mouse_button_listeners: Vec::new(),
            mouse_move_listeners: Vec::new(),
            close_listeners: Vec::new(),
        }
    }

    /// Registers a listener for keyboard events.
    pub fn on_key(&mut self, listener: impl FnMut(&KeyEvent) + 'static) {
        self.key_listeners.push(Box::new(listener));
    }

    /// Registers a listener for mouse button events.
    pub fn on_mouse_button(&mut self, listener: impl FnMut(&MouseButtonEvent) + 'static) {
        self.mouse_button_listeners.push(Box::new(listener));
    }

    /// Registers a listener for cursor movement.
    pub fn on_mouse_move(&mut self, listener: impl FnMut(&MouseMoveEvent) + 'static) {
        self.mouse_move_listeners.push(Box::new(listener));
    }

    /// Registers a listener for window close requests.
    pub fn on_close(&mut self, listener: impl FnMut() + 'static) {
        self.close_listeners.push(Box::new(listener));
    }

    /// Enqueues an event for the next dispatch.
    ///
    /// ## Arguments
    /// * `event` - The event to be queued.
    pub fn publish(&self, event: InputEvent) {
        log::trace!("Publishing input event: {event:?}");

        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to queue input event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end of the queue.
    /// Use this to let other parts of the system publish events.
    ///
    /// ## Returns
    /// A clone of the sender end of the queue.
    pub fn sender(&self) -> flume::Sender<InputEvent> {
        self.sender.clone()
    }

    /// Number of events waiting for dispatch.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Invokes the listeners matching `event` right away, bypassing the queue.
    pub fn dispatch(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Key(e) => self.key_listeners.iter_mut().for_each(|l| l(e)),
            InputEvent::MouseButton(e) => self.mouse_button_listeners.iter_mut().for_each(|l| l(e)),
            InputEvent::MouseMove(e) => self.mouse_move_listeners.iter_mut().for_each(|l| l(e)),
            InputEvent::CloseRequested => self.close_listeners.iter_mut().for_each(|l| l()),
        }
    }

    /// Drains the queue and dispatches every event it held.
    ///
    /// Events published while this runs (e.g. by a listener through a cloned sender)
    /// are left for the next call.
    ///
    /// ## Returns
    /// The number of events dispatched.
    pub fn dispatch_pending(&mut self) -> usize {
        let events: Vec<InputEvent> = self.receiver.try_iter().collect();
        for event in &events {
            self.dispatch(event);
        }
        events.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("pending", &self.receiver.len())
            .field("key_listeners", &self.key_listeners.len())
            .field("mouse_button_listeners", &self.mouse_button_listeners.len())
            .field("mouse_move_listeners", &self.mouse_move_listeners.len())
            .field("close_listeners", &self.close_listeners.len())
            .finish()
    }
}
