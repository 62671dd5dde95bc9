//! Configuration options for the UI glue layer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Pipeline asset loaded for all UI draws unless overridden.
pub const DEFAULT_PIPELINE_URI: &str = "Engine://Pipeline/UI.effect";

/// Start of the icon glyph range merged into the default font.
pub const ICON_MIN: u32 = 0xE005;

/// End of the icon glyph range merged into the default font.
pub const ICON_MAX: u32 = 0xF8FF;

/// Configuration for a UI session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Shader pipeline asset used for every standard draw.
    pub pipeline_uri: String,

    /// Whether keyboard navigation is enabled in the UI library.
    pub nav_enable_keyboard: bool,

    /// Whether docking is enabled in the UI library.
    pub docking_enable: bool,

    /// Icon font files merged into the default font when the atlas is built eagerly.
    ///
    /// Empty by default: the files belong to the host. Icon glyphs from the regular (400) and
    /// solid (900) weights of an icon set need one entry each, merged in that order.
    pub icon_fonts: Vec<PathBuf>,

    /// Pixel size of merged icon glyphs.
    pub icon_font_size: f32,

    /// Inclusive codepoint range taken from each icon font.
    pub icon_glyph_range: [u32; 2],

    /// Color theme applied at initialization.
    pub theme: Theme,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pipeline_uri: DEFAULT_PIPELINE_URI.to_string(),
            nav_enable_keyboard: true,
            docking_enable: true,
            icon_fonts: Vec::new(),
            icon_font_size: 13.0,
            icon_glyph_range: [ICON_MIN, ICON_MAX],
            theme: Theme::Dark,
        }
    }
}

impl Options {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&text)?;
        log::debug!("loaded UI options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Sets the pipeline asset URI.
    pub fn with_pipeline_uri(mut self, uri: impl Into<String>) -> Self {
        self.pipeline_uri = uri.into();
        self
    }

    /// Adds an icon font file to merge into the default font.
    pub fn with_icon_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.icon_fonts.push(path.into());
        self
    }

    /// Sets the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Enables or disables docking.
    pub fn with_docking(mut self, enabled: bool) -> Self {
        self.docking_enable = enabled;
        self
    }
}

/// Built-in color themes of the UI library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    /// Dark background, light text.
    #[default]
    Dark,
    /// Light background, dark text.
    Light,
    /// The library's original blue-grey look.
    Classic,
}
