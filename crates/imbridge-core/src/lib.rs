//! Core contracts for imbridge.
//!
//! This crate defines both sides of the glue layer without implementing either:
//! - [`engine`]: the host engine's graphics, content, input and device services
//! - [`ui`]: the immediate-mode UI library's draw data, texture registry, key enums and context
//! - [`Options`]: configuration shared by the render adapter and the frame orchestrator
//!
//! Enable the `testing` feature for in-memory fakes of every contract.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Flag structs mirror the UI library's bit flags one field per bit
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod engine;
pub mod error;
pub mod options;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod ui;

pub use engine::{
    Button, Capabilities, ContentService, Device, Encoder, FrameTime, GraphicsService, Host,
    InputListener, InputService, Key, ListenerHandle, Pipeline, PipelineId, Sampler, Scissor,
    Stream, Submission, TextureDesc, TextureEdge, TextureFilter, TextureFormat, TextureId,
    TextureRegion, Usage,
};
pub use error::{BridgeError, Result};
pub use options::{Options, Theme};
pub use ui::{
    AtlasImage, BackendFlags, ConfigFlags, DrawCallback, DrawCmd, DrawCmdParams, DrawData,
    DrawIdx, DrawList, DrawVert, FontAtlas, FontConfig, FrameOutput, Io, PixelFormat,
    TextureData, TextureIndex, TextureRef, TextureRegistry, TextureStatus, UiContext, UiKey,
    UiMouseButton,
};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec4};
