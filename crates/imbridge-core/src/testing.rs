//! In-memory fakes of the engine and UI contracts.
//!
//! Each fake records what was asked of it so tests can assert on allocations, texture
//! traffic, submitted draws and injected UI events.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::{Vec2, Vec4};

use crate::engine::{
    Button, Capabilities, ContentService, Device, GraphicsService, InputListener, InputService,
    Key, ListenerHandle, Pipeline, PipelineId, Stream, Submission, TextureDesc, TextureFormat,
    TextureId, TextureRegion, Usage,
};
use crate::error::{BridgeError, Result};
use crate::options::Theme;
use crate::ui::{
    AtlasImage, DrawData, DrawList, FontAtlas, FontConfig, FrameOutput, Io, PixelFormat,
    TextureData, TextureIndex, TextureRef, TextureRegistry, UiContext, UiKey, UiMouseButton,
};

/// A texture held by [`RecordingGraphics`].
#[derive(Debug, Clone)]
pub struct FakeTexture {
    pub label: Option<String>,
    pub format: TextureFormat,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Graphics service that keeps everything in memory.
#[derive(Debug)]
pub struct RecordingGraphics {
    pub max_texture_dimension: u32,
    /// Makes the next `allocate` call fail.
    pub fail_next_allocation: bool,
    pub created: Vec<TextureId>,
    pub updated: Vec<(TextureId, TextureRegion)>,
    pub deleted: Vec<TextureId>,
    pub batches: Vec<Vec<Submission>>,
    streams: Vec<(Stream, Vec<u8>)>,
    textures: HashMap<TextureId, FakeTexture>,
    next_texture: u64,
}

impl Default for RecordingGraphics {
    fn default() -> Self {
        Self {
            max_texture_dimension: 8192,
            fail_next_allocation: false,
            created: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
            batches: Vec::new(),
            streams: Vec::new(),
            textures: HashMap::new(),
            next_texture: 1,
        }
    }
}

impl RecordingGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_texture_dimension(mut self, max: u32) -> Self {
        self.max_texture_dimension = max;
        self
    }

    /// Number of buffer allocations made so far.
    pub fn allocation_count(&self) -> usize {
        self.streams.len()
    }

    /// Allocations made so far, in order.
    pub fn allocations(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter().map(|(s, _)| s)
    }

    /// Bytes of an allocation.
    pub fn stream_bytes(&self, stream: &Stream) -> Option<&[u8]> {
        self.streams
            .get(stream.id as usize)
            .filter(|entry| entry.0 == *stream)
            .map(|entry| entry.1.as_slice())
    }

    /// Total number of draws across all submitted batches.
    pub fn draw_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn last_batch(&self) -> Option<&[Submission]> {
        self.batches.last().map(Vec::as_slice)
    }

    pub fn texture(&self, id: TextureId) -> Option<&FakeTexture> {
        self.textures.get(&id)
    }

    /// Number of textures created and not yet deleted.
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }
}

impl GraphicsService for RecordingGraphics {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            max_texture_dimension: self.max_texture_dimension,
        }
    }

    fn allocate(&mut self, usage: Usage, stride: u32, count: u32) -> Result<Stream> {
        if std::mem::take(&mut self.fail_next_allocation) {
            return Err(BridgeError::Graphics("out of scratch memory".to_string()));
        }
        let stream = Stream {
            id: u32::try_from(self.streams.len()).unwrap_or(u32::MAX),
            usage,
            stride,
            count,
        };
        self.streams.push((stream, vec![0; stream.size_bytes()]));
        Ok(stream)
    }

    fn stream_mut(&mut self, stream: &Stream) -> Result<&mut [u8]> {
        self.streams
            .get_mut(stream.id as usize)
            .filter(|entry| entry.0 == *stream)
            .map(|entry| entry.1.as_mut_slice())
            .ok_or(BridgeError::InvalidStream(*stream))
    }

    fn create_texture(&mut self, desc: &TextureDesc<'_>, pixels: &[u8]) -> Result<TextureId> {
        let limit = self.max_texture_dimension;
        if desc.width > limit || desc.height > limit {
            return Err(BridgeError::TextureTooLarge {
                width: desc.width,
                height: desc.height,
                limit,
            });
        }
        let expected =
            desc.width as usize * desc.height as usize * desc.format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(BridgeError::Graphics(format!(
                "expected {expected} bytes of pixels, got {}",
                pixels.len()
            )));
        }

        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(
            id,
            FakeTexture {
                label: desc.label.map(str::to_string),
                format: desc.format,
                width: desc.width,
                height: desc.height,
                pixels: pixels.to_vec(),
            },
        );
        self.created.push(id);
        Ok(id)
    }

    fn update_texture(
        &mut self,
        id: TextureId,
        region: TextureRegion,
        pixels: &[u8],
    ) -> Result<()> {
        let texture = self
            .textures
            .get_mut(&id)
            .ok_or(BridgeError::UnknownTexture(id))?;
        let bpp = texture.format.bytes_per_pixel();
        if pixels.len() != region.area() * bpp {
            return Err(BridgeError::Graphics(format!(
                "region {region:?} needs {} bytes, got {}",
                region.area() * bpp,
                pixels.len()
            )));
        }

        let row_len = region.width as usize * bpp;
        let pitch = texture.width as usize * bpp;
        for row in 0..region.height as usize {
            let dst = (region.y as usize + row) * pitch + region.x as usize * bpp;
            texture.pixels[dst..dst + row_len]
                .copy_from_slice(&pixels[row * row_len..(row + 1) * row_len]);
        }
        self.updated.push((id, region));
        Ok(())
    }

    fn delete_texture(&mut self, id: TextureId) {
        self.textures.remove(&id);
        self.deleted.push(id);
    }

    fn submit(&mut self, submissions: &[Submission]) {
        self.batches.push(submissions.to_vec());
    }
}

/// A pipeline whose readiness is controlled by the test.
#[derive(Debug)]
pub struct FakePipeline {
    pub id: PipelineId,
    ready: Cell<bool>,
}

impl FakePipeline {
    pub fn new(id: PipelineId, ready: bool) -> Self {
        Self {
            id,
            ready: Cell::new(ready),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }
}

impl Pipeline for FakePipeline {
    fn id(&self) -> PipelineId {
        self.id
    }

    fn is_ready(&self) -> bool {
        self.ready.get()
    }
}

/// Content service that hands out one shared [`FakePipeline`].
#[derive(Debug)]
pub struct FakeContent {
    pub pipeline: Rc<FakePipeline>,
    /// URIs requested so far.
    pub loaded: Vec<String>,
}

impl FakeContent {
    pub fn new(ready: bool) -> Self {
        Self {
            pipeline: Rc::new(FakePipeline::new(PipelineId(1), ready)),
            loaded: Vec::new(),
        }
    }
}

impl ContentService for FakeContent {
    fn load_pipeline(&mut self, uri: &str) -> Rc<dyn Pipeline> {
        self.loaded.push(uri.to_string());
        let pipeline: Rc<dyn Pipeline> = self.pipeline.clone();
        pipeline
    }
}

/// Input service that dispatches synthetic events to its listeners in attach order.
#[derive(Default)]
pub struct RecordingInput {
    listeners: Vec<(ListenerHandle, Box<dyn InputListener>)>,
    next_handle: u32,
}

impl RecordingInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Delivers an event to each listener until one consumes it.
    pub fn dispatch(&mut self, mut event: impl FnMut(&mut dyn InputListener) -> bool) -> bool {
        self.listeners
            .iter_mut()
            .any(|(_, listener)| event(listener.as_mut()))
    }

    pub fn key_down(&mut self, key: Key) -> bool {
        self.dispatch(|l| l.on_key_down(key))
    }

    pub fn key_up(&mut self, key: Key) -> bool {
        self.dispatch(|l| l.on_key_up(key))
    }

    pub fn key_type(&mut self, codepoint: u32) -> bool {
        self.dispatch(|l| l.on_key_type(codepoint))
    }

    pub fn mouse_move(&mut self, x: f32, y: f32, delta_x: f32, delta_y: f32) -> bool {
        self.dispatch(|l| l.on_mouse_move(x, y, delta_x, delta_y))
    }

    pub fn mouse_scroll(&mut self, delta_x: f32, delta_y: f32) -> bool {
        self.dispatch(|l| l.on_mouse_scroll(delta_x, delta_y))
    }

    pub fn mouse_down(&mut self, button: Button) -> bool {
        self.dispatch(|l| l.on_mouse_down(button))
    }

    pub fn mouse_up(&mut self, button: Button) -> bool {
        self.dispatch(|l| l.on_mouse_up(button))
    }

    pub fn window_focus(&mut self, focused: bool) -> bool {
        self.dispatch(|l| l.on_window_focus(focused))
    }

    pub fn window_resize(&mut self, width: u32, height: u32) -> bool {
        self.dispatch(|l| l.on_window_resize(width, height))
    }
}

impl InputService for RecordingInput {
    fn attach(&mut self, listener: Box<dyn InputListener>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push((handle, listener));
        handle
    }

    fn detach(&mut self, handle: ListenerHandle) -> Option<Box<dyn InputListener>> {
        let position = self.listeners.iter().position(|(h, _)| *h == handle)?;
        Some(self.listeners.remove(position).1)
    }
}

/// Device with fixed metrics and an in-memory clipboard.
#[derive(Debug)]
pub struct FakeDevice {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub clipboard: RefCell<String>,
}

impl FakeDevice {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
            clipboard: RefCell::new(String::new()),
        }
    }
}

impl Device for FakeDevice {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn clipboard(&self) -> String {
        self.clipboard.borrow().clone()
    }

    fn set_clipboard(&self, text: &str) {
        *self.clipboard.borrow_mut() = text.to_string();
    }
}

/// Font atlas that produces a solid white bitmap.
#[derive(Debug)]
pub struct ScriptedFontAtlas {
    /// Descriptions of the fonts added, in order.
    pub fonts: Vec<String>,
    pub configs: Vec<FontConfig>,
    /// Makes `build` fail.
    pub fail_build: bool,
    pub width: u32,
    pub height: u32,
    pixels: Option<Vec<u8>>,
    tex_id: Option<TextureId>,
}

impl Default for ScriptedFontAtlas {
    fn default() -> Self {
        Self {
            fonts: Vec::new(),
            configs: Vec::new(),
            fail_build: false,
            width: 64,
            height: 32,
            pixels: None,
            tex_id: None,
        }
    }
}

impl FontAtlas for ScriptedFontAtlas {
    fn add_font_default(&mut self) {
        self.fonts.push("default".to_string());
    }

    fn add_font_from_memory_ttf(&mut self, data: Vec<u8>, config: &FontConfig) -> bool {
        if data.is_empty() {
            return false;
        }
        self.fonts.push(format!("ttf:{}", data.len()));
        self.configs.push(config.clone());
        true
    }

    fn build(&mut self) -> bool {
        if self.fail_build || self.fonts.is_empty() {
            return false;
        }
        self.pixels = Some(vec![0xFF; self.width as usize * self.height as usize * 4]);
        true
    }

    fn tex_data_as_rgba32(&mut self) -> Option<AtlasImage<'_>> {
        let (width, height) = (self.width, self.height);
        self.pixels.as_deref().map(|pixels| AtlasImage {
            width,
            height,
            pixels,
        })
    }

    fn set_tex_id(&mut self, id: TextureId) {
        self.tex_id = Some(id);
    }

    fn tex_id(&self) -> Option<TextureId> {
        self.tex_id
    }
}

/// An event injected into [`ScriptedUi`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    Key(UiKey, bool),
    Char(u32),
    MousePos(f32, f32),
    MouseButton(UiMouseButton, bool),
    Wheel(f32, f32),
    Focus(bool),
}

/// UI context whose frames contain whatever draw lists the test queues.
#[derive(Debug)]
pub struct ScriptedUi {
    /// Events injected so far, in order.
    pub events: Vec<UiEvent>,
    pub theme: Option<Theme>,
    pub frames_started: u32,
    pub frames_rendered: u32,
    /// `Io::delta_time` as seen by each `new_frame` call.
    pub frame_deltas: Vec<f32>,
    texture_management: bool,
    font_texture: Option<TextureIndex>,
    io: Io,
    fonts: ScriptedFontAtlas,
    textures: TextureRegistry,
    queued: Vec<DrawList>,
    draw_data: DrawData,
}

impl ScriptedUi {
    fn with_mode(texture_management: bool) -> Self {
        let mut textures = TextureRegistry::new();
        let font_texture = texture_management
            .then(|| textures.insert(TextureData::new(PixelFormat::Rgba32, 8, 8)));
        Self {
            events: Vec::new(),
            theme: None,
            frames_started: 0,
            frames_rendered: 0,
            frame_deltas: Vec::new(),
            texture_management,
            font_texture,
            io: Io::default(),
            fonts: ScriptedFontAtlas::default(),
            textures,
            queued: Vec::new(),
            draw_data: DrawData::default(),
        }
    }

    /// A context that relies on an eagerly built font atlas.
    pub fn atlas() -> Self {
        Self::with_mode(false)
    }

    /// A context that delegates texture management, starting with a font texture to create.
    pub fn managed() -> Self {
        Self::with_mode(true)
    }

    pub fn fonts(&self) -> &ScriptedFontAtlas {
        &self.fonts
    }

    /// The concrete font atlas, for scripting build failures.
    pub fn font_atlas_mut(&mut self) -> &mut ScriptedFontAtlas {
        &mut self.fonts
    }

    /// Registry index of the font texture in managed mode.
    pub fn font_texture_index(&self) -> Option<TextureIndex> {
        self.font_texture
    }

    /// Texture reference widgets use for text and solid fills.
    pub fn font_texture(&self) -> Option<TextureRef> {
        match self.font_texture {
            Some(index) => Some(TextureRef::Managed(index)),
            None => self.fonts.tex_id.map(TextureRef::Id),
        }
    }

    /// Sets the capture flags reported through `io()`.
    pub fn set_capture(&mut self, keyboard: bool, mouse: bool) {
        self.io.want_capture_keyboard = keyboard;
        self.io.want_capture_mouse = mouse;
    }

    /// Queues a draw list for the next `render`.
    pub fn queue_list(&mut self, list: DrawList) {
        self.queued.push(list);
    }

    /// Queues a single-quad widget spanning `min..max`, clipped to the display.
    pub fn add_quad(&mut self, min: Vec2, max: Vec2) {
        let texture = self
            .font_texture()
            .unwrap_or(TextureRef::Id(TextureId(0)));
        let size = self.io.display_size;
        let mut list = DrawList::new();
        list.push_quad(min, max, 0xFFFF_FFFF, texture, Vec4::new(0.0, 0.0, size.x, size.y));
        self.queue_list(list);
    }

    /// Draw data of the last rendered frame.
    pub fn last_draw_data(&self) -> &DrawData {
        &self.draw_data
    }
}

impl UiContext for ScriptedUi {
    fn create() -> Self {
        Self::atlas()
    }

    fn io(&self) -> &Io {
        &self.io
    }

    fn io_mut(&mut self) -> &mut Io {
        &mut self.io
    }

    fn supports_texture_management(&self) -> bool {
        self.texture_management
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }

    fn fonts_mut(&mut self) -> &mut dyn FontAtlas {
        &mut self.fonts
    }

    fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    fn textures_mut(&mut self) -> &mut TextureRegistry {
        &mut self.textures
    }

    fn new_frame(&mut self) {
        self.frames_started += 1;
        self.frame_deltas.push(self.io.delta_time);
    }

    fn render(&mut self) -> FrameOutput<'_> {
        self.frames_rendered += 1;
        self.draw_data = DrawData {
            display_pos: Vec2::ZERO,
            display_size: self.io.display_size,
            lists: std::mem::take(&mut self.queued),
            textures: self.texture_management.then(|| self.textures.pending()),
        };
        FrameOutput {
            draw_data: &self.draw_data,
            textures: &mut self.textures,
        }
    }

    fn add_key_event(&mut self, key: UiKey, down: bool) {
        self.events.push(UiEvent::Key(key, down));
    }

    fn add_input_character(&mut self, codepoint: u32) {
        self.events.push(UiEvent::Char(codepoint));
    }

    fn add_mouse_pos_event(&mut self, x: f32, y: f32) {
        self.events.push(UiEvent::MousePos(x, y));
    }

    fn add_mouse_button_event(&mut self, button: UiMouseButton, down: bool) {
        self.events.push(UiEvent::MouseButton(button, down));
    }

    fn add_mouse_wheel_event(&mut self, x: f32, y: f32) {
        self.events.push(UiEvent::Wheel(x, y));
    }

    fn add_focus_event(&mut self, focused: bool) {
        self.events.push(UiEvent::Focus(focused));
    }
}
