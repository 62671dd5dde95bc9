//! Engine key and button codes to UI library codes.
//!
//! Every function is total over its input and returns `None` where the UI library has no
//! equivalent.

use imbridge_core::{Button, Key, UiKey, UiMouseButton};

/// Maps an engine key to the UI library's key.
pub fn map_key(key: Key) -> Option<UiKey> {
    let mapped = match key {
        Key::Space => UiKey::Space,
        Key::Apostrophe => UiKey::Apostrophe,
        Key::Comma => UiKey::Comma,
        Key::Minus => UiKey::Minus,
        Key::Period => UiKey::Period,
        Key::Slash => UiKey::Slash,
        Key::Num0 => UiKey::Key0,
        Key::Num1 => UiKey::Key1,
        Key::Num2 => UiKey::Key2,
        Key::Num3 => UiKey::Key3,
        Key::Num4 => UiKey::Key4,
        Key::Num5 => UiKey::Key5,
        Key::Num6 => UiKey::Key6,
        Key::Num7 => UiKey::Key7,
        Key::Num8 => UiKey::Key8,
        Key::Num9 => UiKey::Key9,
        Key::Semicolon => UiKey::Semicolon,
        Key::Equal => UiKey::Equal,
        Key::A => UiKey::A,
        Key::B => UiKey::B,
        Key::C => UiKey::C,
        Key::D => UiKey::D,
        Key::E => UiKey::E,
        Key::F => UiKey::F,
        Key::G => UiKey::G,
        Key::H => UiKey::H,
        Key::I => UiKey::I,
        Key::J => UiKey::J,
        Key::K => UiKey::K,
        Key::L => UiKey::L,
        Key::M => UiKey::M,
        Key::N => UiKey::N,
        Key::O => UiKey::O,
        Key::P => UiKey::P,
        Key::Q => UiKey::Q,
        Key::R => UiKey::R,
        Key::S => UiKey::S,
        Key::T => UiKey::T,
        Key::U => UiKey::U,
        Key::V => UiKey::V,
        Key::W => UiKey::W,
        Key::X => UiKey::X,
        Key::Y => UiKey::Y,
        Key::Z => UiKey::Z,
        Key::LeftBracket => UiKey::LeftBracket,
        Key::Backslash => UiKey::Backslash,
        Key::RightBracket => UiKey::RightBracket,
        Key::GraveAccent => UiKey::GraveAccent,
        Key::World1 => UiKey::Oem102,
        Key::Escape => UiKey::Escape,
        Key::Enter => UiKey::Enter,
        Key::Tab => UiKey::Tab,
        Key::Backspace => UiKey::Backspace,
        Key::Insert => UiKey::Insert,
        Key::Delete => UiKey::Delete,
        Key::Right => UiKey::RightArrow,
        Key::Left => UiKey::LeftArrow,
        Key::Down => UiKey::DownArrow,
        Key::Up => UiKey::UpArrow,
        Key::PageUp => UiKey::PageUp,
        Key::PageDown => UiKey::PageDown,
        Key::Home => UiKey::Home,
        Key::End => UiKey::End,
        Key::CapsLock => UiKey::CapsLock,
        Key::ScrollLock => UiKey::ScrollLock,
        Key::NumLock => UiKey::NumLock,
        Key::PrintScreen => UiKey::PrintScreen,
        Key::Pause => UiKey::Pause,
        Key::F1 => UiKey::F1,
        Key::F2 => UiKey::F2,
        Key::F3 => UiKey::F3,
        Key::F4 => UiKey::F4,
        Key::F5 => UiKey::F5,
        Key::F6 => UiKey::F6,
        Key::F7 => UiKey::F7,
        Key::F8 => UiKey::F8,
        Key::F9 => UiKey::F9,
        Key::F10 => UiKey::F10,
        Key::F11 => UiKey::F11,
        Key::F12 => UiKey::F12,
        Key::F13 => UiKey::F13,
        Key::F14 => UiKey::F14,
        Key::F15 => UiKey::F15,
        Key::F16 => UiKey::F16,
        Key::F17 => UiKey::F17,
        Key::F18 => UiKey::F18,
        Key::F19 => UiKey::F19,
        Key::F20 => UiKey::F20,
        Key::F21 => UiKey::F21,
        Key::F22 => UiKey::F22,
        Key::F23 => UiKey::F23,
        Key::F24 => UiKey::F24,
        Key::Keypad0 => UiKey::Keypad0,
        Key::Keypad1 => UiKey::Keypad1,
        Key::Keypad2 => UiKey::Keypad2,
        Key::Keypad3 => UiKey::Keypad3,
        Key::Keypad4 => UiKey::Keypad4,
        Key::Keypad5 => UiKey::Keypad5,
        Key::Keypad6 => UiKey::Keypad6,
        Key::Keypad7 => UiKey::Keypad7,
        Key::Keypad8 => UiKey::Keypad8,
        Key::Keypad9 => UiKey::Keypad9,
        Key::KeypadDecimal => UiKey::KeypadDecimal,
        Key::KeypadDivide => UiKey::KeypadDivide,
        Key::KeypadMultiply => UiKey::KeypadMultiply,
        Key::KeypadSubtract => UiKey::KeypadSubtract,
        Key::KeypadAdd => UiKey::KeypadAdd,
        Key::KeypadEnter => UiKey::KeypadEnter,
        Key::KeypadEqual => UiKey::KeypadEqual,
        Key::LeftShift => UiKey::LeftShift,
        Key::LeftControl => UiKey::LeftCtrl,
        Key::LeftAlt => UiKey::LeftAlt,
        Key::LeftSuper => UiKey::LeftSuper,
        Key::RightShift => UiKey::RightShift,
        Key::RightControl => UiKey::RightCtrl,
        Key::RightAlt => UiKey::RightAlt,
        Key::RightSuper => UiKey::RightSuper,
        Key::Menu => UiKey::Menu,
        Key::Unknown | Key::World2 | Key::F25 => return None,
    };
    Some(mapped)
}

/// Maps a modifier key, left or right, to the UI library's modifier pseudo-key.
pub fn map_modifier(key: Key) -> Option<UiKey> {
    match key {
        Key::LeftControl | Key::RightControl => Some(UiKey::ModCtrl),
        Key::LeftShift | Key::RightShift => Some(UiKey::ModShift),
        Key::LeftAlt | Key::RightAlt => Some(UiKey::ModAlt),
        Key::LeftSuper | Key::RightSuper => Some(UiKey::ModSuper),
        _ => None,
    }
}

/// Maps an engine mouse button to the UI library's button.
pub fn map_button(button: Button) -> Option<UiMouseButton> {
    match button {
        Button::Left => Some(UiMouseButton::Left),
        Button::Right => Some(UiMouseButton::Right),
        Button::Middle => Some(UiMouseButton::Middle),
        Button::X1 => Some(UiMouseButton::Extra1),
        Button::X2 => Some(UiMouseButton::Extra2),
        Button::Other(_) => None,
    }
}
