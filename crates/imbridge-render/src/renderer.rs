//! The render adapter: one frame of UI draw data to one batch of engine draws.

use std::rc::Rc;

use imbridge_core::{
    DrawCmd, DrawData, DrawIdx, DrawVert, Encoder, GraphicsService, Host, Options, Pipeline,
    Sampler, TextureEdge, TextureFilter, TextureId, TextureRef, TextureRegistry, UiContext, Usage,
};

use crate::buffer;
use crate::error::RenderResult;
use crate::fonts::{build_font_atlas, upload_font_atlas};
use crate::projection::orthographic_projection;
use crate::scissor::scissor_for;
use crate::textures::{process_requests, release_owned};

/// Sampler bound for every UI draw.
pub const UI_SAMPLER: Sampler = Sampler::new(
    TextureEdge::Clamp,
    TextureEdge::Clamp,
    TextureFilter::MinMagMipLinear,
);

/// How font and image textures reach the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureMode {
    /// The font atlas is built and uploaded once at initialization.
    Atlas,
    /// The UI library requests texture work through the registry every frame.
    Managed,
}

impl TextureMode {
    /// Picks the mode the context's library version supports.
    pub fn for_context(ui: &dyn UiContext) -> Self {
        if ui.supports_texture_management() {
            TextureMode::Managed
        } else {
            TextureMode::Atlas
        }
    }
}

/// Renders UI draw data through the engine's graphics service.
pub struct RenderAdapter {
    pipeline: Rc<dyn Pipeline>,
    encoder: Encoder,
    mode: TextureMode,
    font_atlas: Option<TextureId>,
}

impl RenderAdapter {
    /// Loads the UI pipeline, reports the texture size limit to the UI library and, in
    /// [`TextureMode::Atlas`], builds and uploads the font atlas.
    pub fn initialize(
        host: &mut Host<'_>,
        ui: &mut dyn UiContext,
        mode: TextureMode,
        options: &Options,
    ) -> RenderResult<Self> {
        let pipeline = host.content.load_pipeline(&options.pipeline_uri);

        let caps = host.graphics.capabilities();
        ui.io_mut().renderer_texture_max_size = caps.max_texture_dimension;

        let font_atlas = match mode {
            TextureMode::Atlas => {
                build_font_atlas(ui.fonts_mut(), options)?;
                Some(upload_font_atlas(&mut *host.graphics, ui.fonts_mut())?)
            }
            TextureMode::Managed => None,
        };

        log::info!(
            "UI renderer initialized ({mode:?}, pipeline {}, max texture {})",
            options.pipeline_uri,
            caps.max_texture_dimension
        );

        Ok(Self {
            pipeline,
            encoder: Encoder::new(),
            mode,
            font_atlas,
        })
    }

    pub fn mode(&self) -> TextureMode {
        self.mode
    }

    /// Handle of the eagerly built font atlas, if any.
    pub fn font_atlas(&self) -> Option<TextureId> {
        self.font_atlas
    }

    /// Returns whether the UI pipeline has finished compiling.
    pub fn is_ready(&self) -> bool {
        self.pipeline.is_ready()
    }

    /// Renders one frame of draw data.
    ///
    /// Nothing happens while the pipeline is still compiling; the frame is dropped, not queued.
    #[allow(clippy::cast_possible_truncation)]
    pub fn submit(
        &mut self,
        graphics: &mut dyn GraphicsService,
        draw_data: &DrawData,
        textures: &mut TextureRegistry,
    ) -> RenderResult<()> {
        if !self.pipeline.is_ready() {
            log::trace!("UI pipeline still compiling, dropping frame");
            return Ok(());
        }

        if let Some(requests) = &draw_data.textures {
            process_requests(graphics, textures, requests)?;
        }

        let vertices =
            buffer::allocate::<DrawVert>(graphics, Usage::Vertex, draw_data.total_vtx_count())?;
        let indices =
            buffer::allocate::<DrawIdx>(graphics, Usage::Index, draw_data.total_idx_count())?;

        let projection = orthographic_projection(draw_data.display_pos, draw_data.display_size);
        let uniforms = buffer::upload(graphics, Usage::Uniform, &[projection.to_cols_array()])?;

        let pipeline = self.pipeline.id();
        let mut vtx_offset: u32 = 0;
        let mut idx_offset: u32 = 0;

        for list in &draw_data.lists {
            buffer::write(graphics, &vertices, vtx_offset as usize, &list.vtx_buffer)?;
            buffer::write(graphics, &indices, idx_offset as usize, &list.idx_buffer)?;

            for command in &list.commands {
                match command {
                    DrawCmd::Callback(callback) => callback(list, &mut self.encoder),
                    DrawCmd::Elements { count, params } => {
                        let Some(scissor) = scissor_for(params.clip_rect, draw_data.display_pos)
                        else {
                            continue;
                        };
                        let Some(texture) = resolve_texture(params.texture, textures) else {
                            log::debug!("skipping draw with unavailable texture {:?}", params.texture);
                            continue;
                        };

                        self.encoder.set_scissor(scissor);
                        self.encoder.set_vertices(0, vertices);
                        self.encoder.set_indices(indices);
                        self.encoder.set_uniform(0, uniforms);
                        self.encoder.set_pipeline(pipeline);
                        self.encoder.set_texture(0, texture);
                        self.encoder.set_sampler(0, UI_SAMPLER);
                        self.encoder.draw(
                            *count,
                            params.vtx_offset + vtx_offset,
                            params.idx_offset + idx_offset,
                        );
                    }
                }
            }

            vtx_offset += list.vtx_buffer.len() as u32;
            idx_offset += list.idx_buffer.len() as u32;
        }

        log::trace!(
            "submitting {} UI draws ({vtx_offset} vertices, {idx_offset} indices)",
            self.encoder.submissions().len()
        );
        graphics.submit(self.encoder.submissions());
        self.encoder.clear();
        Ok(())
    }

    /// Releases every GPU texture this renderer solely owns.
    pub fn shutdown(&mut self, graphics: &mut dyn GraphicsService, textures: &mut TextureRegistry) {
        let released = release_owned(graphics, textures);
        if let Some(atlas) = self.font_atlas.take() {
            graphics.delete_texture(atlas);
        }
        self.encoder.clear();
        log::info!("UI renderer shut down, released {released} registry textures");
    }
}

/// Resolves a draw's texture to a live engine handle.
fn resolve_texture(reference: TextureRef, textures: &TextureRegistry) -> Option<TextureId> {
    match reference {
        TextureRef::Id(id) => Some(id),
        TextureRef::Managed(index) => textures.get(index).and_then(|t| t.tex_id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec4};
    use imbridge_core::testing::{FakeContent, RecordingGraphics, RecordingInput, ScriptedUi};
    use imbridge_core::{DrawList, FontAtlas, PipelineId, PixelFormat, Scissor, TextureData, TextureStatus};
    use proptest::prelude::*;
    use std::cell::Cell;

    struct Harness {
        graphics: RecordingGraphics,
        content: FakeContent,
        input: RecordingInput,
        ui: ScriptedUi,
    }

    impl Harness {
        fn new(ui: ScriptedUi) -> Self {
            Self {
                graphics: RecordingGraphics::new().with_max_texture_dimension(4096),
                content: FakeContent::new(true),
                input: RecordingInput::new(),
                ui,
            }
        }

        fn renderer(&mut self) -> RenderAdapter {
            let mode = TextureMode::for_context(&self.ui);
            let mut host = Host {
                graphics: &mut self.graphics,
                content: &mut self.content,
                input: &mut self.input,
            };
            RenderAdapter::initialize(&mut host, &mut self.ui, mode, &Options::default()).unwrap()
        }
    }

    fn clip() -> Vec4 {
        Vec4::new(0.0, 0.0, 800.0, 600.0)
    }

    fn frame(lists: Vec<DrawList>) -> DrawData {
        DrawData {
            display_size: Vec2::new(800.0, 600.0),
            lists,
            ..DrawData::default()
        }
    }

    fn quad_list(quads: usize, texture: TextureRef) -> DrawList {
        let mut list = DrawList::new();
        for i in 0..quads {
            let min = Vec2::splat(i as f32 * 10.0);
            list.push_quad(min, min + Vec2::splat(5.0), 0xFFFF_FFFF, texture, clip());
        }
        list
    }

    #[test]
    fn test_initialize_reports_max_texture_size() {
        let mut harness = Harness::new(ScriptedUi::managed());
        let renderer = harness.renderer();
        assert_eq!(renderer.mode(), TextureMode::Managed);
        assert_eq!(harness.ui.io().renderer_texture_max_size, 4096);
        assert_eq!(harness.content.loaded, vec!["Engine://Pipeline/UI.effect"]);
        assert_eq!(renderer.font_atlas(), None);
        assert_eq!(harness.graphics.live_textures(), 0);
    }

    #[test]
    fn test_initialize_atlas_mode_uploads_fonts() {
        let mut harness = Harness::new(ScriptedUi::atlas());
        let renderer = harness.renderer();
        assert_eq!(renderer.mode(), TextureMode::Atlas);
        let atlas = renderer.font_atlas().expect("atlas uploaded");
        assert_eq!(harness.ui.fonts().tex_id(), Some(atlas));
        assert_eq!(harness.graphics.live_textures(), 1);
    }

    #[test]
    fn test_single_quad_emits_one_draw() {
        let mut harness = Harness::new(ScriptedUi::atlas());
        let mut renderer = harness.renderer();
        let atlas = renderer.font_atlas().unwrap();
        let data = frame(vec![quad_list(1, TextureRef::Id(atlas))]);

        let mut textures = TextureRegistry::new();
        renderer.submit(&mut harness.graphics, &data, &mut textures).unwrap();

        let batch = harness.graphics.last_batch().unwrap();
        assert_eq!(batch.len(), 1);
        let draw = &batch[0];
        assert_eq!(draw.count, 6);
        assert_eq!((draw.base_vertex, draw.base_index), (0, 0));
        assert_eq!(draw.pipeline, Some(PipelineId(1)));
        assert_eq!(draw.textures[0], Some(atlas));
        assert_eq!(draw.samplers[0], Some(UI_SAMPLER));
        assert_eq!(draw.scissor, Some(Scissor::new(0, 0, 800, 600)));

        let vertices = draw.vertices[0].unwrap();
        let indices = draw.indices.unwrap();
        let uniforms = draw.uniforms[0].unwrap();
        assert_eq!((vertices.usage, vertices.count), (Usage::Vertex, 4));
        assert_eq!((indices.usage, indices.count), (Usage::Index, 6));
        assert_eq!((uniforms.usage, uniforms.count), (Usage::Uniform, 1));
        assert_eq!(uniforms.size_bytes(), 64);
    }

    #[test]
    fn test_pipeline_not_ready_does_nothing() {
        let mut harness = Harness::new(ScriptedUi::managed());
        let mut renderer = harness.renderer();
        harness.content.pipeline.set_ready(false);

        let mut textures = TextureRegistry::new();
        let font = textures.insert(TextureData::new(PixelFormat::Rgba32, 2, 2));
        let mut data = frame(vec![quad_list(3, TextureRef::Managed(font))]);
        data.textures = Some(vec![font]);

        renderer.submit(&mut harness.graphics, &data, &mut textures).unwrap();
        assert_eq!(harness.graphics.allocation_count(), 0);
        assert!(harness.graphics.batches.is_empty());
        assert_eq!(textures.get(font).unwrap().status(), TextureStatus::WantCreate);

        // The next frame after compilation finishes renders normally
        harness.content.pipeline.set_ready(true);
        renderer.submit(&mut harness.graphics, &data, &mut textures).unwrap();
        assert_eq!(harness.graphics.draw_count(), 3);
        assert_eq!(textures.get(font).unwrap().status(), TextureStatus::Ok);
    }

    #[test]
    fn test_zero_area_clip_is_skipped() {
        let mut harness = Harness::new(ScriptedUi::atlas());
        let mut renderer = harness.renderer();
        let atlas = TextureRef::Id(renderer.font_atlas().unwrap());

        let mut list = DrawList::new();
        list.push_quad(Vec2::ZERO, Vec2::ONE, 0, atlas, Vec4::new(10.0, 10.0, 10.0, 50.0));
        list.push_quad(Vec2::ZERO, Vec2::ONE, 0, atlas, Vec4::new(10.0, 10.0, 50.0, 10.0));
        list.push_quad(Vec2::ZERO, Vec2::ONE, 0, atlas, clip());

        let mut textures = TextureRegistry::new();
        renderer.submit(&mut harness.graphics, &frame(vec![list]), &mut textures).unwrap();

        let batch = harness.graphics.last_batch().unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].base_index, 12);
    }

    #[test]
    fn test_vertices_copied_contiguously() {
        let mut harness = Harness::new(ScriptedUi::atlas());
        let mut renderer = harness.renderer();
        let atlas = TextureRef::Id(renderer.font_atlas().unwrap());
        let a = quad_list(1, atlas);
        let b = quad_list(2, atlas);
        let expected: Vec<DrawVert> = a.vtx_buffer.iter().chain(&b.vtx_buffer).copied().collect();

        let mut textures = TextureRegistry::new();
        renderer.submit(&mut harness.graphics, &frame(vec![a, b]), &mut textures).unwrap();

        let vertices = harness.graphics.last_batch().unwrap()[0].vertices[0].unwrap();
        let bytes = harness.graphics.stream_bytes(&vertices).unwrap();
        assert_eq!(bytes, bytemuck::cast_slice::<DrawVert, u8>(&expected));
    }

    #[test]
    fn test_callback_replaces_standard_draw() {
        let mut harness = Harness::new(ScriptedUi::atlas());
        let mut renderer = harness.renderer();
        let atlas = TextureRef::Id(renderer.font_atlas().unwrap());

        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let mut list = quad_list(1, atlas);
        list.push_callback(Rc::new(move |list: &DrawList, _encoder: &mut Encoder| {
            assert_eq!(list.vtx_buffer.len(), 4);
            seen.set(seen.get() + 1);
        }));

        let mut textures = TextureRegistry::new();
        renderer.submit(&mut harness.graphics, &frame(vec![list]), &mut textures).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(harness.graphics.draw_count(), 1);
    }

    #[test]
    fn test_callback_can_encode_custom_draws() {
        let mut harness = Harness::new(ScriptedUi::atlas());
        let mut renderer = harness.renderer();

        let mut list = DrawList::new();
        list.push_callback(Rc::new(|_: &DrawList, encoder: &mut Encoder| {
            encoder.set_texture(0, TextureId(99));
            encoder.draw(3, 0, 0);
        }));
        list.vtx_buffer.push(DrawVert::default());

        let mut textures = TextureRegistry::new();
        renderer.submit(&mut harness.graphics, &frame(vec![list]), &mut textures).unwrap();

        let batch = harness.graphics.last_batch().unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].textures[0], Some(TextureId(99)));
    }

    #[test]
    fn test_managed_font_created_before_first_draw() {
        let mut harness = Harness::new(ScriptedUi::managed());
        let mut renderer = harness.renderer();
        harness.ui.io_mut().display_size = Vec2::new(800.0, 600.0);
        harness.ui.add_quad(Vec2::ZERO, Vec2::splat(16.0));
        let font = harness.ui.font_texture_index().unwrap();

        let output = harness.ui.render();
        renderer.submit(&mut harness.graphics, output.draw_data, output.textures).unwrap();

        let id = harness.ui.textures().get(font).unwrap().tex_id().unwrap();
        assert_eq!(harness.graphics.created, vec![id]);
        assert_eq!(harness.graphics.last_batch().unwrap()[0].textures[0], Some(id));
    }

    #[test]
    fn test_destroyed_texture_is_never_drawn() {
        let mut harness = Harness::new(ScriptedUi::managed());
        let mut renderer = harness.renderer();

        let mut textures = TextureRegistry::new();
        let image = textures.insert(TextureData::new(PixelFormat::Rgba32, 2, 2));
        let mut data = frame(vec![quad_list(1, TextureRef::Managed(image))]);
        data.textures = Some(vec![image]);
        renderer.submit(&mut harness.graphics, &data, &mut textures).unwrap();
        assert_eq!(harness.graphics.draw_count(), 1);

        textures.get_mut(image).unwrap().request_destroy();
        renderer.submit(&mut harness.graphics, &data, &mut textures).unwrap();

        assert_eq!(textures.get(image).unwrap().tex_id(), None);
        assert_eq!(harness.graphics.draw_count(), 1);
        assert_eq!(harness.graphics.last_batch().unwrap().len(), 0);
    }

    #[test]
    fn test_shutdown_releases_textures() {
        let mut harness = Harness::new(ScriptedUi::atlas());
        let mut renderer = harness.renderer();
        let mut textures = TextureRegistry::new();
        let image = textures.insert(TextureData::new(PixelFormat::Rgba32, 2, 2));
        process_requests(&mut harness.graphics, &mut textures, &[image]).unwrap();
        assert_eq!(harness.graphics.live_textures(), 2);

        renderer.shutdown(&mut harness.graphics, &mut textures);
        assert_eq!(harness.graphics.live_textures(), 0);
        assert_eq!(renderer.font_atlas(), None);
        assert_eq!(textures.get(image).unwrap().status(), TextureStatus::Destroyed);
    }

    #[test]
    fn test_allocation_failure_propagates() {
        let mut harness = Harness::new(ScriptedUi::atlas());
        let mut renderer = harness.renderer();
        let atlas = TextureRef::Id(renderer.font_atlas().unwrap());
        harness.graphics.fail_next_allocation = true;

        let mut textures = TextureRegistry::new();
        let result = renderer.submit(&mut harness.graphics, &frame(vec![quad_list(1, atlas)]), &mut textures);
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_running_offsets_match_preceding_lists(quads in proptest::collection::vec(1usize..6, 1..6)) {
            let mut harness = Harness::new(ScriptedUi::atlas());
            let mut renderer = harness.renderer();
            let atlas = TextureRef::Id(renderer.font_atlas().unwrap());
            let lists: Vec<DrawList> = quads.iter().map(|&n| quad_list(n, atlas)).collect();

            let mut expected = Vec::new();
            let (mut vtx, mut idx) = (0u32, 0u32);
            for list in &lists {
                for command in &list.commands {
                    if let DrawCmd::Elements { params, .. } = command {
                        expected.push((params.vtx_offset + vtx, params.idx_offset + idx));
                    }
                }
                vtx += list.vtx_buffer.len() as u32;
                idx += list.idx_buffer.len() as u32;
            }

            let mut textures = TextureRegistry::new();
            renderer.submit(&mut harness.graphics, &frame(lists), &mut textures).unwrap();

            let actual: Vec<(u32, u32)> = harness
                .graphics
                .last_batch()
                .unwrap()
                .iter()
                .map(|d| (d.base_vertex, d.base_index))
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
