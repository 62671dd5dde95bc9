//! Key, modifier and mouse button identifiers of the UI library.

/// Named keys of the UI library, plus the four modifier pseudo-keys.
///
/// Modifier state is reported separately from the physical key through the `Mod*` variants;
/// pressing left control emits both [`UiKey::ModCtrl`] and [`UiKey::LeftCtrl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiKey {
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Space,
    Enter,
    Escape,
    LeftCtrl,
    LeftShift,
    LeftAlt,
    LeftSuper,
    RightCtrl,
    RightShift,
    RightAlt,
    RightSuper,
    Menu,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadDecimal,
    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    KeypadEnter,
    KeypadEqual,
    AppBack,
    AppForward,
    Oem102,
    ModCtrl,
    ModShift,
    ModAlt,
    ModSuper,
}

impl UiKey {
    /// Returns true for the modifier pseudo-keys.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            UiKey::ModCtrl | UiKey::ModShift | UiKey::ModAlt | UiKey::ModSuper
        )
    }
}

/// Mouse buttons of the UI library, by canonical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiMouseButton {
    Left,
    Right,
    Middle,
    Extra1,
    Extra2,
}

impl UiMouseButton {
    /// Returns the button's index in the UI library's mouse state arrays.
    pub fn index(self) -> usize {
        match self {
            UiMouseButton::Left => 0,
            UiMouseButton::Right => 1,
            UiMouseButton::Middle => 2,
            UiMouseButton::Extra1 => 3,
            UiMouseButton::Extra2 => 4,
        }
    }
}
