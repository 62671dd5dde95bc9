//! Per-frame draw data produced by the UI library.

use std::fmt;
use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

use crate::engine::{Encoder, TextureId};
use crate::ui::TextureIndex;

/// A UI vertex: screen position, texture coordinate and packed ABGR color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct DrawVert {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub col: u32,
}

/// Index type of UI draw lists. Indices are relative to their own list.
pub type DrawIdx = u16;

/// Texture a draw command samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureRef {
    /// A texture whose engine handle is already known (font atlas, user images).
    Id(TextureId),
    /// A texture in the UI library's registry; resolved at draw time.
    Managed(TextureIndex),
}

/// Parameters of a standard indexed draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCmdParams {
    /// Clip rectangle `(min_x, min_y, max_x, max_y)` in display coordinates.
    pub clip_rect: Vec4,
    pub texture: TextureRef,
    /// Offset into the list's vertex buffer added to every index.
    pub vtx_offset: u32,
    /// First index into the list's index buffer.
    pub idx_offset: u32,
}

/// Custom rendering hook invoked in place of a standard draw.
pub type DrawCallback = Rc<dyn Fn(&DrawList, &mut Encoder)>;

/// One command of a draw list.
#[derive(Clone)]
pub enum DrawCmd {
    /// Draw `count` indices with the given parameters.
    Elements { count: u32, params: DrawCmdParams },
    /// Hand control to user code; no standard draw is emitted.
    Callback(DrawCallback),
}

impl fmt::Debug for DrawCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCmd::Elements { count, params } => f
                .debug_struct("Elements")
                .field("count", count)
                .field("params", params)
                .finish(),
            DrawCmd::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Vertices, indices and commands of one UI window or layer.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub vtx_buffer: Vec<DrawVert>,
    pub idx_buffer: Vec<DrawIdx>,
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    /// Creates an empty draw list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a textured, solid-colored rectangle as its own draw command.
    ///
    /// Adds 4 vertices and 6 indices.
    pub fn push_quad(&mut self, min: Vec2, max: Vec2, col: u32, texture: TextureRef, clip_rect: Vec4) {
        let base = u16::try_from(self.vtx_buffer.len()).unwrap_or(u16::MAX - 3);
        let idx_offset = u32::try_from(self.idx_buffer.len()).unwrap_or(u32::MAX);

        self.vtx_buffer.extend_from_slice(&[
            DrawVert { pos: [min.x, min.y], uv: [0.0, 0.0], col },
            DrawVert { pos: [max.x, min.y], uv: [1.0, 0.0], col },
            DrawVert { pos: [max.x, max.y], uv: [1.0, 1.0], col },
            DrawVert { pos: [min.x, max.y], uv: [0.0, 1.0], col },
        ]);
        self.idx_buffer
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.commands.push(DrawCmd::Elements {
            count: 6,
            params: DrawCmdParams {
                clip_rect,
                texture,
                vtx_offset: 0,
                idx_offset,
            },
        });
    }

    /// Appends a user callback command.
    pub fn push_callback(&mut self, callback: DrawCallback) {
        self.commands.push(DrawCmd::Callback(callback));
    }
}

/// Everything the UI library produced for one frame.
#[derive(Debug, Clone, Default)]
pub struct DrawData {
    /// Top-left of the displayed area.
    pub display_pos: Vec2,
    /// Size of the displayed area.
    pub display_size: Vec2,
    pub lists: Vec<DrawList>,
    /// Registry entries with pending create/update/destroy requests, in request order.
    /// `None` when the library does not delegate texture management to the renderer.
    pub textures: Option<Vec<TextureIndex>>,
}

impl DrawData {
    /// Sum of vertex counts over all lists.
    pub fn total_vtx_count(&self) -> usize {
        self.lists.iter().map(|l| l.vtx_buffer.len()).sum()
    }

    /// Sum of index counts over all lists.
    pub fn total_idx_count(&self) -> usize {
        self.lists.iter().map(|l| l.idx_buffer.len()).sum()
    }

    /// Returns true if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.total_vtx_count() == 0
    }
}
