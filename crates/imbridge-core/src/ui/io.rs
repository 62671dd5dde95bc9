//! Configuration and per-frame state the UI library exposes to its backends.

use std::fmt;

use glam::Vec2;

/// Reads the host clipboard.
pub type ClipboardGetter = Box<dyn Fn() -> Option<String>>;

/// Writes the host clipboard.
pub type ClipboardSetter = Box<dyn Fn(&str)>;

/// Opens a URL or path with the host shell. Returns whether it succeeded.
pub type ShellOpener = Box<dyn Fn(&str) -> bool>;

/// Feature switches set by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigFlags {
    pub nav_enable_keyboard: bool,
    pub docking_enable: bool,
}

/// Capabilities declared by the backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackendFlags {
    /// The renderer honours `DrawCmdParams::vtx_offset`, allowing lists over 64k vertices.
    pub renderer_has_vtx_offset: bool,
    /// The renderer services texture create/update/destroy requests.
    pub renderer_has_textures: bool,
}

/// The UI library's IO block.
pub struct Io {
    pub config_flags: ConfigFlags,
    pub backend_flags: BackendFlags,
    pub display_size: Vec2,
    pub display_framebuffer_scale: Vec2,
    /// Seconds since the previous frame.
    pub delta_time: f32,
    /// The UI wants keyboard input for itself this frame.
    pub want_capture_keyboard: bool,
    /// The UI wants mouse input for itself this frame.
    pub want_capture_mouse: bool,
    /// Largest texture side the renderer accepts. 0 means unknown.
    pub renderer_texture_max_size: u32,
    pub get_clipboard_text: Option<ClipboardGetter>,
    pub set_clipboard_text: Option<ClipboardSetter>,
    pub open_in_shell: Option<ShellOpener>,
}

impl Default for Io {
    fn default() -> Self {
        Self {
            config_flags: ConfigFlags::default(),
            backend_flags: BackendFlags::default(),
            display_size: Vec2::ZERO,
            display_framebuffer_scale: Vec2::ONE,
            delta_time: 1.0 / 60.0,
            want_capture_keyboard: false,
            want_capture_mouse: false,
            renderer_texture_max_size: 0,
            get_clipboard_text: None,
            set_clipboard_text: None,
            open_in_shell: None,
        }
    }
}

impl Io {
    /// Reads the clipboard through the installed getter.
    pub fn clipboard_text(&self) -> Option<String> {
        self.get_clipboard_text.as_ref().and_then(|get| get())
    }

    /// Writes the clipboard through the installed setter. Returns false if none is installed.
    pub fn set_clipboard(&self, text: &str) -> bool {
        match &self.set_clipboard_text {
            Some(set) => {
                set(text);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Io {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Io")
            .field("config_flags", &self.config_flags)
            .field("backend_flags", &self.backend_flags)
            .field("display_size", &self.display_size)
            .field("display_framebuffer_scale", &self.display_framebuffer_scale)
            .field("delta_time", &self.delta_time)
            .field("want_capture_keyboard", &self.want_capture_keyboard)
            .field("want_capture_mouse", &self.want_capture_mouse)
            .field("renderer_texture_max_size", &self.renderer_texture_max_size)
            .field("clipboard", &self.get_clipboard_text.is_some())
            .field("open_in_shell", &self.open_in_shell.is_some())
            .finish()
    }
}
