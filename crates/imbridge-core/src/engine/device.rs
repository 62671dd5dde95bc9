//! Device contract: display metrics and clipboard.

/// The host device the UI is displayed on.
///
/// Shared behind an `Rc` so that clipboard closures installed into the UI library can
/// outlive the initialization call.
pub trait Device {
    /// Display width in pixels.
    fn width(&self) -> u32;

    /// Display height in pixels.
    fn height(&self) -> u32;

    /// DPI scale factor.
    fn scale(&self) -> f32;

    /// Returns the clipboard text.
    fn clipboard(&self) -> String;

    /// Replaces the clipboard text.
    fn set_clipboard(&self, text: &str);
}
