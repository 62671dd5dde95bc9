//! The UI library context contract.

use crate::options::Theme;
use crate::ui::{DrawData, FontAtlas, Io, TextureRegistry, UiKey, UiMouseButton};

/// Result of finalizing a frame: the draw data plus the registry its texture requests refer to.
pub struct FrameOutput<'a> {
    pub draw_data: &'a DrawData,
    pub textures: &'a mut TextureRegistry,
}

/// An immediate-mode UI library context.
///
/// One context exists per UI session. It is not thread-safe; every call happens on the thread
/// that runs the engine's frame loop.
pub trait UiContext {
    /// Creates a context with default state.
    fn create() -> Self
    where
        Self: Sized;

    fn io(&self) -> &Io;

    fn io_mut(&mut self) -> &mut Io;

    /// Whether this library version delegates texture management to the renderer.
    fn supports_texture_management(&self) -> bool;

    /// Applies one of the built-in color themes.
    fn apply_theme(&mut self, theme: Theme);

    fn fonts_mut(&mut self) -> &mut dyn FontAtlas;

    fn textures(&self) -> &TextureRegistry;

    fn textures_mut(&mut self) -> &mut TextureRegistry;

    /// Starts a frame.
    fn new_frame(&mut self);

    /// Ends the frame and generates its draw data.
    fn render(&mut self) -> FrameOutput<'_>;

    /// Queues a key or modifier state change.
    fn add_key_event(&mut self, key: UiKey, down: bool);

    /// Queues a typed character.
    fn add_input_character(&mut self, codepoint: u32);

    /// Queues an absolute cursor position.
    fn add_mouse_pos_event(&mut self, x: f32, y: f32);

    /// Queues a mouse button state change.
    fn add_mouse_button_event(&mut self, button: UiMouseButton, down: bool);

    /// Queues a wheel movement.
    fn add_mouse_wheel_event(&mut self, x: f32, y: f32);

    /// Queues a focus change.
    fn add_focus_event(&mut self, focused: bool);
}
