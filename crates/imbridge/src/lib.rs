//! imbridge: binds an immediate-mode UI library to a host engine.
//!
//! The glue has three parts:
//!
//! - [`InputAdapter`] forwards engine input into the UI's event queue and reports capture
//! - [`RenderAdapter`] turns each frame's draw data into engine buffer allocations and draws
//! - [`UiSystem`] owns the UI context and drives both adapters once per host frame
//!
//! # Example
//!
//! ```ignore
//! use imbridge::*;
//!
//! let mut host = Host { graphics: &mut graphics, content: &mut content, input: &mut input };
//! let mut system = UiSystem::<MyContext>::initialize(&mut host, device, &Options::default())?;
//!
//! // Once per host frame
//! system.begin(&time);
//! build_widgets(&mut *system.ui_mut());
//! system.end(host.graphics)?;
//!
//! system.teardown(&mut host);
//! ```
//!
//! Hosts that use winit can drive the input side with [`WinitInputService`].

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod input;
pub mod keymap;
pub mod system;
pub mod winit_input;

pub use error::{Error, Result};
pub use input::InputAdapter;
pub use keymap::{map_button, map_key, map_modifier};
pub use system::UiSystem;
pub use winit_input::WinitInputService;

// Re-export core types
pub use imbridge_core::{
    BridgeError, Button, Device, DrawCmd, DrawData, DrawList, FrameTime, GraphicsService, Host,
    InputListener, InputService, Key, Options, Theme, UiContext, UiKey, UiMouseButton, Vec2,
    Vec4,
};

// Re-export render types
pub use imbridge_render::{RenderAdapter, RenderError, TextureMode};
