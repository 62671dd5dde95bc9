//! Font atlas contract of the UI library.

use crate::engine::TextureId;

/// Options for adding a font to the atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    pub size_pixels: f32,
    /// Merge glyphs into the previously added font instead of creating a new one.
    pub merge_mode: bool,
    /// Snap glyph advances to whole pixels.
    pub pixel_snap_h: bool,
    /// Minimum horizontal advance, used to give icons a fixed width.
    pub glyph_min_advance_x: f32,
    /// Inclusive codepoint ranges to rasterize.
    pub glyph_ranges: Vec<(u32, u32)>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size_pixels: 13.0,
            merge_mode: false,
            pixel_snap_h: false,
            glyph_min_advance_x: 0.0,
            glyph_ranges: Vec::new(),
        }
    }
}

/// Rasterized atlas pixels.
#[derive(Debug, Clone, Copy)]
pub struct AtlasImage<'a> {
    pub width: u32,
    pub height: u32,
    /// RGBA32, row-major.
    pub pixels: &'a [u8],
}

/// The UI library's font atlas.
pub trait FontAtlas {
    /// Adds the built-in default font.
    fn add_font_default(&mut self);

    /// Adds a TrueType font from memory. Returns false if the data could not be parsed.
    fn add_font_from_memory_ttf(&mut self, data: Vec<u8>, config: &FontConfig) -> bool;

    /// Rasterizes all added fonts. Returns false on failure.
    fn build(&mut self) -> bool;

    /// Returns the built atlas as RGBA32, or `None` if it has not been built.
    fn tex_data_as_rgba32(&mut self) -> Option<AtlasImage<'_>>;

    /// Records the engine texture holding the atlas.
    fn set_tex_id(&mut self, id: TextureId);

    /// Returns the engine texture holding the atlas.
    fn tex_id(&self) -> Option<TextureId>;
}
