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

//! Translation from `winit` window events to the runtime's [`InputEvent`]s.
//!
//! This module is the only place that knows `winit`'s input vocabulary; the rest of
//! the runtime sees [`Key`], [`MouseButton`] and friends.

use anvil_core::event::{
    Action, InputEvent, Key, KeyEvent, Modifiers, MouseButton, MouseButtonEvent, MouseMoveEvent,
};
use anvil_core::math::Vec2d;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Translates a `winit` window event into an [`InputEvent`].
///
/// `modifiers` is the modifier state last reported by the window
/// (`WindowEvent::ModifiersChanged`), since `winit` does not attach it to each
/// event.
///
/// # Returns
/// `Some(InputEvent)` for key, mouse button, cursor and close events; `None` for
/// everything else (resize, focus, ...).
pub fn translate_winit_input(event: &WindowEvent, modifiers: Modifiers) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            let action = match key_event.state {
                ElementState::Pressed if key_event.repeat => Action::Repeat,
                ElementState::Pressed => Action::Press,
                ElementState::Released => Action::Release,
            };
            let key = match key_event.physical_key {
                PhysicalKey::Code(code) => map_key(code),
                PhysicalKey::Unidentified(_) => Key::Unknown,
            };
            Some(InputEvent::Key(KeyEvent {
                key,
                scancode: scancode(key_event.physical_key),
                action,
                modifiers,
            }))
        }
        WindowEvent::MouseInput { state, button, .. } => {
            Some(InputEvent::MouseButton(MouseButtonEvent {
                button: map_mouse_button(*button),
                action: match state {
                    ElementState::Pressed => Action::Press,
                    ElementState::Released => Action::Release,
                },
                modifiers,
            }))
        }
        WindowEvent::CursorMoved { position, .. } => {
            Some(InputEvent::MouseMove(MouseMoveEvent {
                position: Vec2d::new(position.x, position.y),
            }))
        }
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
        _ => None,
    }
}

/// Maps `winit`'s modifier state to [`Modifiers`].
pub fn map_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        super_key: state.super_key(),
    }
}

// --- Private Helper Functions ---

#[cfg(any(windows, target_os = "macos", target_os = "linux"))]
fn scancode(key: PhysicalKey) -> u32 {
    use winit::platform::scancode::PhysicalKeyExtScancode;
    key.to_scancode().unwrap_or(0)
}

#[cfg(not(any(windows, target_os = "macos", target_os = "linux")))]
fn scancode(_key: PhysicalKey) -> u32 {
    0
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Space => Key::Space,
        KeyCode::Quote => Key::Apostrophe,
        KeyCode::Comma => Key::Comma,
        KeyCode::Minus => Key::Minus,
        KeyCode::Period => Key::Period,
        KeyCode::Slash => Key::Slash,
        KeyCode::Digit0 => Key::Num0,
        KeyCode::Digit1 => Key::Num1,
        KeyCode::Digit2 => Key::Num2,
        KeyCode::Digit3 => Key::Num3,
        KeyCode::Digit4 => Key::Num4,
        KeyCode::Digit5 => Key::Num5,
        KeyCode::Digit6 => Key::Num6,
        KeyCode::Digit7 => Key::Num7,
        KeyCode::Digit8 => Key::Num8,
        KeyCode::Digit9 => Key::Num9,
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Equal => Key::Equal,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::BracketLeft => Key::LeftBracket,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::BracketRight => Key::RightBracket,
        KeyCode::Backquote => Key::GraveAccent,
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::ScrollLock => Key::ScrollLock,
        KeyCode::NumLock => Key::NumLock,
        KeyCode::PrintScreen => Key::PrintScreen,
        KeyCode::Pause => Key::Pause,
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
        KeyCode::Numpad0 => Key::Keypad0,
        KeyCode::Numpad1 => Key::Keypad1,
        KeyCode::Numpad2 => Key::Keypad2,
        KeyCode::Numpad3 => Key::Keypad3,
        KeyCode::Numpad4 => Key::Keypad4,
        KeyCode::Numpad5 => Key::Keypad5,
        KeyCode::Numpad6 => Key::Keypad6,
        KeyCode::Numpad7 => Key::Keypad7,
        KeyCode::Numpad8 => Key::Keypad8,
        KeyCode::Numpad9 => Key::Keypad9,
        KeyCode::NumpadDecimal => Key::KeypadDecimal,
        KeyCode::NumpadDivide => Key::KeypadDivide,
        KeyCode::NumpadMultiply => Key::KeypadMultiply,
        KeyCode::NumpadSubtract => Key::KeypadSubtract,
        KeyCode::NumpadAdd => Key::KeypadAdd,
        KeyCode::NumpadEnter => Key::KeypadEnter,
        KeyCode::NumpadEqual => Key::KeypadEqual,
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::ControlLeft => Key::LeftControl,
        KeyCode::AltLeft => Key::LeftAlt,
        KeyCode::SuperLeft => Key::LeftSuper,
        KeyCode::ShiftRight => Key::RightShift,
        KeyCode::ControlRight => Key::RightControl,
        KeyCode::AltRight => Key::RightAlt,
        KeyCode::SuperRight => Key::RightSuper,
        KeyCode::ContextMenu => Key::Menu,
        _ => Key::Unknown,
    }
}

// --- Unit Tests for Input Translation ---
#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    #[test]
    fn maps_letters_digits_and_keypad() {
        assert_eq!(map_key(KeyCode::KeyA), Key::A);
        assert_eq!(map_key(KeyCode::Digit1), Key::Num1);
        assert_eq!(map_key(KeyCode::Numpad7), Key::Keypad7);
        assert_eq!(map_key(KeyCode::ArrowUp), Key::Up);
        assert_eq!(map_key(KeyCode::F24), Key::Unknown);
    }

    #[test]
    fn maps_mouse_buttons() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Forward), MouseButton::Forward);
        assert_eq!(
            map_mouse_button(WinitMouseButton::Other(8)),
            MouseButton::Other(8)
        );
    }

    #[test]
    fn maps_modifier_state() {
        let state = ModifiersState::SHIFT | ModifiersState::SUPER;
        let modifiers = map_modifiers(state);
        assert!(modifiers.shift && modifiers.super_key);
        assert!(!modifiers.control && !modifiers.alt);
    }

    #[test]
    fn translates_mouse_press_with_modifiers() {
        let held = Modifiers {
            control: true,
            ..Modifiers::NONE
        };
        let winit_event = WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Left,
        };

        let expected = Some(InputEvent::MouseButton(MouseButtonEvent {
            button: MouseButton::Left,
            action: Action::Press,
            modifiers: held,
        }));
        assert_eq!(translate_winit_input(&winit_event, held), expected);
    }

    #[test]
    fn translates_mouse_release() {
        let winit_event = WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Released,
            button: WinitMouseButton::Right,
        };
        let Some(InputEvent::MouseButton(event)) =
            translate_winit_input(&winit_event, Modifiers::NONE)
        else {
            panic!("expected a mouse button event");
        };
        assert_eq!(event.action, Action::Release);
        assert_eq!(event.button, MouseButton::Right);
    }

    #[test]
    fn translates_cursor_moved() {
        let winit_event = WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(100.5, 200.75),
        };
        let expected = Some(InputEvent::MouseMove(MouseMoveEvent {
            position: Vec2d::new(100.5, 200.75),
        }));
        assert_eq!(translate_winit_input(&winit_event, Modifiers::NONE), expected);
    }

    #[test]
    fn translates_close_request() {
        assert_eq!(
            translate_winit_input(&WindowEvent::CloseRequested, Modifiers::NONE),
            Some(InputEvent::CloseRequested)
        );
    }

    #[test]
    fn non_input_events_are_ignored() {
        let resize = WindowEvent::Resized(winit::dpi::PhysicalSize::new(100, 100));
        let focus = WindowEvent::Focused(true);
        assert_eq!(translate_winit_input(&resize, Modifiers::NONE), None);
        assert_eq!(translate_winit_input(&focus, Modifiers::NONE), None);
    }
}
