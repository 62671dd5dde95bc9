//! Graphics service contract: transient buffers, textures and batch submission.

use crate::engine::Submission;
use crate::error::Result;

/// Usage class of a transient buffer allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Usage {
    Vertex,
    Index,
    Uniform,
}

/// Handle to a transient buffer allocation, valid for the frame it was allocated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stream {
    /// Service-assigned identifier of the allocation.
    pub id: u32,
    /// Usage class the allocation was made for.
    pub usage: Usage,
    /// Size of one element in bytes.
    pub stride: u32,
    /// Number of elements.
    pub count: u32,
}

impl Stream {
    /// Returns the allocation size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.stride as usize * self.count as usize
    }
}

/// Engine-side texture handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Pixel formats the graphics service can create textures in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8-bit RGBA, normalized.
    Rgba8UNorm,
    /// 8-bit single channel, normalized.
    R8UNorm,
}

impl TextureFormat {
    /// Returns the size of one texel in bytes.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgba8UNorm => 4,
            TextureFormat::R8UNorm => 1,
        }
    }
}

/// Description of a texture to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc<'a> {
    pub label: Option<&'a str>,
    pub format: TextureFormat,
    pub width: u32,
    pub height: u32,
}

/// A rectangular texel region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TextureRegion {
    /// Creates a region.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the number of texels covered.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Hardware limits reported by the graphics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Largest width or height a texture may have.
    pub max_texture_dimension: u32,
}

/// The engine's graphics service.
pub trait GraphicsService {
    /// Reports hardware capability limits.
    fn capabilities(&self) -> Capabilities;

    /// Allocates a transient buffer of `count` elements of `stride` bytes.
    fn allocate(&mut self, usage: Usage, stride: u32, count: u32) -> Result<Stream>;

    /// Returns the writable bytes of a live allocation.
    fn stream_mut(&mut self, stream: &Stream) -> Result<&mut [u8]>;

    /// Creates a texture and uploads its initial texels.
    fn create_texture(&mut self, desc: &TextureDesc<'_>, pixels: &[u8]) -> Result<TextureId>;

    /// Replaces a region of an existing texture. `pixels` is tightly packed.
    fn update_texture(&mut self, id: TextureId, region: TextureRegion, pixels: &[u8])
        -> Result<()>;

    /// Releases a texture.
    fn delete_texture(&mut self, id: TextureId);

    /// Queues a batch of encoded draws.
    fn submit(&mut self, submissions: &[Submission]);
}
