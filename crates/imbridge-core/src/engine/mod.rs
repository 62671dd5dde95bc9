//! Host engine service contracts.
//!
//! The glue layer never implements these; it consumes them. Each trait is the narrowest
//! surface the adapters need from the engine.

mod content;
mod device;
mod encoder;
mod graphics;
mod input;
mod time;

pub use content::{ContentService, Pipeline, PipelineId};
pub use device::Device;
pub use encoder::{Encoder, Sampler, Scissor, Submission, TextureEdge, TextureFilter, MAX_SLOTS};
pub use graphics::{
    Capabilities, GraphicsService, Stream, TextureDesc, TextureFormat, TextureId, TextureRegion,
    Usage,
};
pub use input::{Button, InputListener, InputService, Key, ListenerHandle};
pub use time::FrameTime;

/// The engine services handed to initialization and teardown.
pub struct Host<'a> {
    pub graphics: &'a mut dyn GraphicsService,
    pub content: &'a mut dyn ContentService,
    pub input: &'a mut dyn InputService,
}
