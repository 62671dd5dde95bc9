//! Draw encoder: accumulates state bindings and draws for one batch submission.

use crate::engine::{PipelineId, Stream, TextureId};

/// Number of vertex, uniform, texture and sampler slots an encoder exposes.
pub const MAX_SLOTS: usize = 4;

/// Scissor rectangle in framebuffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scissor {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Scissor {
    /// Creates a scissor rectangle.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Texture addressing mode outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureEdge {
    Clamp,
    Repeat,
    Mirror,
}

/// Texture filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    MinMagMipPoint,
    MinMagMipLinear,
    Anisotropic,
}

/// Sampler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sampler {
    pub edge_u: TextureEdge,
    pub edge_v: TextureEdge,
    pub filter: TextureFilter,
}

impl Sampler {
    /// Creates a sampler.
    pub const fn new(edge_u: TextureEdge, edge_v: TextureEdge, filter: TextureFilter) -> Self {
        Self {
            edge_u,
            edge_v,
            filter,
        }
    }
}

/// One encoded draw with the full state it was issued under.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Submission {
    pub scissor: Option<Scissor>,
    pub vertices: [Option<Stream>; MAX_SLOTS],
    pub indices: Option<Stream>,
    pub uniforms: [Option<Stream>; MAX_SLOTS],
    pub pipeline: Option<PipelineId>,
    pub textures: [Option<TextureId>; MAX_SLOTS],
    pub samplers: [Option<Sampler>; MAX_SLOTS],
    /// Number of indices to draw.
    pub count: u32,
    /// Value added to every index before fetching a vertex.
    pub base_vertex: u32,
    /// First index read from the index stream.
    pub base_index: u32,
}

/// Accumulates draw state and emits a [`Submission`] per draw.
///
/// State is sticky: a binding stays in effect for every following draw until it is replaced
/// or the encoder is cleared.
#[derive(Debug, Default)]
pub struct Encoder {
    state: Submission,
    submissions: Vec<Submission>,
}

impl Encoder {
    /// Creates an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scissor(&mut self, scissor: Scissor) {
        self.state.scissor = Some(scissor);
    }

    pub fn set_vertices(&mut self, slot: usize, stream: Stream) {
        if let Some(binding) = self.state.vertices.get_mut(slot) {
            *binding = Some(stream);
        } else {
            log::warn!("vertex slot {slot} out of range");
        }
    }

    pub fn set_indices(&mut self, stream: Stream) {
        self.state.indices = Some(stream);
    }

    pub fn set_uniform(&mut self, slot: usize, stream: Stream) {
        if let Some(binding) = self.state.uniforms.get_mut(slot) {
            *binding = Some(stream);
        } else {
            log::warn!("uniform slot {slot} out of range");
        }
    }

    pub fn set_pipeline(&mut self, pipeline: PipelineId) {
        self.state.pipeline = Some(pipeline);
    }

    pub fn set_texture(&mut self, slot: usize, texture: TextureId) {
        if let Some(binding) = self.state.textures.get_mut(slot) {
            *binding = Some(texture);
        } else {
            log::warn!("texture slot {slot} out of range");
        }
    }

    pub fn set_sampler(&mut self, slot: usize, sampler: Sampler) {
        if let Some(binding) = self.state.samplers.get_mut(slot) {
            *binding = Some(sampler);
        } else {
            log::warn!("sampler slot {slot} out of range");
        }
    }

    /// Records an indexed draw under the current state.
    pub fn draw(&mut self, count: u32, base_vertex: u32, base_index: u32) {
        let mut submission = self.state.clone();
        submission.count = count;
        submission.base_vertex = base_vertex;
        submission.base_index = base_index;
        self.submissions.push(submission);
    }

    /// Returns the draws recorded since the last clear.
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Drops all recorded draws and bindings.
    pub fn clear(&mut self) {
        self.state = Submission::default();
        self.submissions.clear();
    }
}
