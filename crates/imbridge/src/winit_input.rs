//! An [`InputService`] fed by winit window events.
//!
//! Hosts that drive their window with winit forward each [`WindowEvent`] to
//! [`WinitInputService::handle_window_event`]; attached listeners then see the engine's input
//! taxonomy. Dispatch stops at the first listener that consumes an event.

use imbridge_core::{Button, InputListener, InputService, Key, ListenerHandle};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixel scroll deltas are divided by this to approximate wheel lines.
const PIXELS_PER_LINE: f32 = 10.0;

/// Input service over winit window events.
#[derive(Default)]
pub struct WinitInputService {
    listeners: Vec<(ListenerHandle, Box<dyn InputListener>)>,
    next_handle: u32,
    cursor: Option<(f32, f32)>,
}

impl WinitInputService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Translates a window event and dispatches it. Returns whether a listener consumed it.
    #[allow(clippy::cast_possible_truncation)]
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let key = match event.physical_key {
                    PhysicalKey::Code(code) => map_key_code(code),
                    PhysicalKey::Unidentified(_) => Key::Unknown,
                };
                let pressed = event.state == ElementState::Pressed;
                self.handle_key(key, pressed, event.text.as_deref())
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor(position.x as f32, position.y as f32)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => (
                        pos.x as f32 / PIXELS_PER_LINE,
                        pos.y as f32 / PIXELS_PER_LINE,
                    ),
                };
                self.dispatch(|l| l.on_mouse_scroll(dx, dy))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_mouse_button(*button);
                match state {
                    ElementState::Pressed => self.dispatch(|l| l.on_mouse_down(button)),
                    ElementState::Released => self.dispatch(|l| l.on_mouse_up(button)),
                }
            }
            WindowEvent::Focused(focused) => {
                let focused = *focused;
                self.dispatch(|l| l.on_window_focus(focused))
            }
            WindowEvent::Resized(size) => {
                let (width, height) = (size.width, size.height);
                self.dispatch(|l| l.on_window_resize(width, height))
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                false
            }
            _ => false,
        }
    }

    /// Dispatches a key transition, followed by the text it produced on press.
    pub fn handle_key(&mut self, key: Key, pressed: bool, text: Option<&str>) -> bool {
        let mut consumed = if pressed {
            self.dispatch(|l| l.on_key_down(key))
        } else {
            self.dispatch(|l| l.on_key_up(key))
        };
        if pressed {
            for ch in text.unwrap_or_default().chars().filter(|c| !c.is_control()) {
                let codepoint = u32::from(ch);
                consumed |= self.dispatch(|l| l.on_key_type(codepoint));
            }
        }
        consumed
    }

    /// Dispatches an absolute cursor position with its delta from the previous one.
    pub fn handle_cursor(&mut self, x: f32, y: f32) -> bool {
        let (last_x, last_y) = self.cursor.unwrap_or((x, y));
        self.cursor = Some((x, y));
        self.dispatch(|l| l.on_mouse_move(x, y, x - last_x, y - last_y))
    }

    fn dispatch(&mut self, mut event: impl FnMut(&mut dyn InputListener) -> bool) -> bool {
        self.listeners
            .iter_mut()
            .any(|(_, listener)| event(listener.as_mut()))
    }
}

impl InputService for WinitInputService {
    fn attach(&mut self, listener: Box<dyn InputListener>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push((handle, listener));
        log::debug!("input listener {handle:?} attached");
        handle
    }

    fn detach(&mut self, handle: ListenerHandle) -> Option<Box<dyn InputListener>> {
        let position = self.listeners.iter().position(|(h, _)| *h == handle)?;
        log::debug!("input listener {handle:?} detached");
        Some(self.listeners.remove(position).1)
    }
}

/// Maps a winit physical key code to the engine's key.
pub fn map_key_code(code: KeyCode) -> Key {
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
        KeyCode::IntlBackslash => Key::World1,
        KeyCode::IntlRo => Key::World2,
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
        KeyCode::F13 => Key::F13,
        KeyCode::F14 => Key::F14,
        KeyCode::F15 => Key::F15,
        KeyCode::F16 => Key::F16,
        KeyCode::F17 => Key::F17,
        KeyCode::F18 => Key::F18,
        KeyCode::F19 => Key::F19,
        KeyCode::F20 => Key::F20,
        KeyCode::F21 => Key::F21,
        KeyCode::F22 => Key::F22,
        KeyCode::F23 => Key::F23,
        KeyCode::F24 => Key::F24,
        KeyCode::F25 => Key::F25,
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

/// Maps a winit mouse button to the engine's button.
pub fn map_mouse_button(button: WinitMouseButton) -> Button {
    match button {
        WinitMouseButton::Left => Button::Left,
        WinitMouseButton::Right => Button::Right,
        WinitMouseButton::Middle => Button::Middle,
        WinitMouseButton::Back => Button::X1,
        WinitMouseButton::Forward => Button::X2,
        WinitMouseButton::Other(id) => Button::Other(id),
    }
}
