//! Render adapter for imbridge.
//!
//! This crate turns one frame of UI draw data into engine work:
//! - transient vertex, index and uniform allocations
//! - per-command scissor, binding and indexed draw encoding
//! - servicing texture create/update/destroy requests from the UI library
//! - eager font atlas construction for library versions without texture management

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod error;
pub mod fonts;
pub mod projection;
pub mod renderer;
pub mod scissor;
pub mod textures;

pub use error::{RenderError, RenderResult};
pub use projection::orthographic_projection;
pub use renderer::{RenderAdapter, TextureMode, UI_SAMPLER};
pub use scissor::scissor_for;
