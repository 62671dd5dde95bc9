//! Rendering error types.

use std::path::PathBuf;

use imbridge_core::{BridgeError, TextureIndex};
use thiserror::Error;

/// Errors that can occur while rendering UI draw data.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The graphics service failed.
    #[error("graphics service failed: {0}")]
    Graphics(#[from] BridgeError),

    /// An update was requested for a texture that was never created.
    #[error("texture {0:?} requested updates before it was created")]
    TextureNotCreated(TextureIndex),

    /// The font atlas could not be built.
    #[error("font atlas error: {0}")]
    FontAtlas(String),

    /// An icon font file could not be read.
    #[error("failed to read font {}: {source}", path.display())]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
