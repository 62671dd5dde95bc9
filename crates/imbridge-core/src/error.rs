//! Error types for imbridge.

use thiserror::Error;

use crate::engine::{Stream, TextureId};

/// Errors raised by engine services and configuration loading.
///
/// Graphics failures are not handled by the glue layer; they travel up to the caller unchanged.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The graphics service failed to satisfy a request.
    #[error("graphics service error: {0}")]
    Graphics(String),

    /// A stream handle does not refer to a live allocation.
    #[error("stream {0:?} is not a live allocation")]
    InvalidStream(Stream),

    /// A texture handle is not known to the graphics service.
    #[error("texture {0:?} is not known to the graphics service")]
    UnknownTexture(TextureId),

    /// A texture exceeds the device's maximum dimension.
    #[error("texture of {width}x{height} exceeds the device limit of {limit}")]
    TextureTooLarge { width: u32, height: u32, limit: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for imbridge-core operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
