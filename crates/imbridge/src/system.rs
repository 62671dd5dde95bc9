//! The frame orchestrator: owns the UI context for one session.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use glam::Vec2;
use imbridge_core::{
    Device, FrameTime, GraphicsService, Host, Io, ListenerHandle, Options, UiContext,
};
use imbridge_render::{RenderAdapter, TextureMode};

use crate::error::Result;
use crate::input::InputAdapter;

/// A UI session bound to the host engine.
///
/// Created by [`UiSystem::initialize`], driven by alternating [`UiSystem::begin`] and
/// [`UiSystem::end`] calls once per host frame, and consumed by [`UiSystem::teardown`].
pub struct UiSystem<C: UiContext + 'static> {
    ui: Rc<RefCell<C>>,
    renderer: RenderAdapter,
    listener: ListenerHandle,
    frame_count: u64,
}

impl<C: UiContext + 'static> UiSystem<C> {
    /// Creates a fresh UI context and binds it to the host.
    pub fn initialize(host: &mut Host<'_>, device: Rc<dyn Device>, options: &Options) -> Result<Self> {
        Self::initialize_with(C::create(), host, device, options)
    }

    /// Binds an existing UI context to the host.
    pub fn initialize_with(
        mut ui: C,
        host: &mut Host<'_>,
        device: Rc<dyn Device>,
        options: &Options,
    ) -> Result<Self> {
        let mode = TextureMode::for_context(&ui);
        configure_io(ui.io_mut(), &device, options, mode);
        ui.apply_theme(options.theme);

        let renderer = RenderAdapter::initialize(host, &mut ui, mode, options)?;

        let ui = Rc::new(RefCell::new(ui));
        let listener = host
            .input
            .attach(Box::new(InputAdapter::new(Rc::clone(&ui))));

        log::info!(
            "UI system initialized ({}x{} at scale {}, {mode:?} textures)",
            device.width(),
            device.height(),
            device.scale()
        );

        Ok(Self {
            ui,
            renderer,
            listener,
            frame_count: 0,
        })
    }

    /// Releases GPU textures and detaches the input listener.
    pub fn teardown(mut self, host: &mut Host<'_>) {
        {
            let mut ui = self.ui.borrow_mut();
            self.renderer
                .shutdown(&mut *host.graphics, ui.textures_mut());
        }
        if host.input.detach(self.listener).is_none() {
            log::warn!("UI input listener {:?} was already detached", self.listener);
        }
        log::info!("UI system torn down after {} frames", self.frame_count);
    }

    /// Starts a UI frame.
    ///
    /// The host's frame delta becomes the UI delta time. A zero delta keeps the previous value.
    ///
    /// The delta is written before the UI frame starts, so `new_frame` already sees the delta
    /// of the frame it opens rather than the one before it.
    pub fn begin(&mut self, time: &FrameTime) {
        let mut ui = self.ui.borrow_mut();
        let delta = time.delta_seconds();
        if delta > 0.0 {
            ui.io_mut().delta_time = delta;
        }
        ui.new_frame();
    }

    /// Finishes the UI frame and renders it. Frames without vertices are not submitted.
    pub fn end(&mut self, graphics: &mut dyn GraphicsService) -> Result<()> {
        let mut ui = self.ui.borrow_mut();
        let output = ui.render();
        self.frame_count += 1;

        if output.draw_data.is_empty() {
            log::trace!("frame {} has no UI geometry", self.frame_count);
            return Ok(());
        }

        self.renderer
            .submit(graphics, output.draw_data, output.textures)?;
        Ok(())
    }

    /// The UI context, for building widgets between `begin` and `end`.
    pub fn ui(&self) -> Ref<'_, C> {
        self.ui.borrow()
    }

    pub fn ui_mut(&mut self) -> RefMut<'_, C> {
        self.ui.borrow_mut()
    }

    /// Number of frames finished with [`UiSystem::end`].
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn texture_mode(&self) -> TextureMode {
        self.renderer.mode()
    }

    pub fn renderer(&self) -> &RenderAdapter {
        &self.renderer
    }
}

/// Writes backend flags, display metrics and host callbacks into the UI's IO block.
#[allow(clippy::cast_precision_loss)]
fn configure_io(io: &mut Io, device: &Rc<dyn Device>, options: &Options, mode: TextureMode) {
    io.config_flags.nav_enable_keyboard = options.nav_enable_keyboard;
    io.config_flags.docking_enable = options.docking_enable;
    io.backend_flags.renderer_has_vtx_offset = true;
    io.backend_flags.renderer_has_textures = mode == TextureMode::Managed;

    io.display_size = Vec2::new(device.width() as f32, device.height() as f32);
    io.display_framebuffer_scale = Vec2::splat(device.scale());

    let source = Rc::clone(device);
    io.get_clipboard_text = Some(Box::new(move || Some(source.clipboard())));
    let sink = Rc::clone(device);
    io.set_clipboard_text = Some(Box::new(move |text: &str| sink.set_clipboard(text)));

    if mode == TextureMode::Managed {
        io.open_in_shell = Some(Box::new(open_in_shell));
    }
}

fn open_in_shell(target: &str) -> bool {
    match open::that(target) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("failed to open {target}: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imbridge_core::testing::{FakeDevice, ScriptedUi};

    fn device() -> Rc<dyn Device> {
        Rc::new(FakeDevice::new(1280, 720, 2.0))
    }

    #[test]
    fn test_configure_io_atlas_mode() {
        let mut io = Io::default();
        configure_io(&mut io, &device(), &Options::default(), TextureMode::Atlas);

        assert!(io.config_flags.nav_enable_keyboard);
        assert!(io.config_flags.docking_enable);
        assert!(io.backend_flags.renderer_has_vtx_offset);
        assert!(!io.backend_flags.renderer_has_textures);
        assert_eq!(io.display_size, Vec2::new(1280.0, 720.0));
        assert_eq!(io.display_framebuffer_scale, Vec2::splat(2.0));
        assert!(io.open_in_shell.is_none());
    }

    #[test]
    fn test_configure_io_managed_mode() {
        let mut io = Io::default();
        let options = Options::default().with_docking(false);
        configure_io(&mut io, &device(), &options, TextureMode::Managed);

        assert!(!io.config_flags.docking_enable);
        assert!(io.backend_flags.renderer_has_textures);
        assert!(io.open_in_shell.is_some());
    }

    #[test]
    fn test_clipboard_bridges_to_device() {
        let fake = Rc::new(FakeDevice::new(10, 10, 1.0));
        let device: Rc<dyn Device> = fake.clone();
        let mut io = Io::default();
        configure_io(&mut io, &device, &Options::default(), TextureMode::Atlas);

        assert!(io.set_clipboard("copied"));
        assert_eq!(fake.clipboard.borrow().as_str(), "copied");

        *fake.clipboard.borrow_mut() = "pasted".to_string();
        assert_eq!(io.clipboard_text().as_deref(), Some("pasted"));
    }

    #[test]
    fn test_texture_mode_follows_context() {
        assert_eq!(TextureMode::for_context(&ScriptedUi::atlas()), TextureMode::Atlas);
        assert_eq!(TextureMode::for_context(&ScriptedUi::managed()), TextureMode::Managed);
    }
}
