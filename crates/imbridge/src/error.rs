//! Error type of the facade crate.

use imbridge_core::BridgeError;
use imbridge_render::RenderError;
use thiserror::Error;

/// Errors surfaced by [`crate::UiSystem`].
#[derive(Error, Debug)]
pub enum Error {
    /// An engine service or configuration error.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// The render adapter failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A specialized Result type for imbridge operations.
pub type Result<T> = std::result::Result<T, Error>;
