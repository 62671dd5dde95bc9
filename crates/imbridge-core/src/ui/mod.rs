//! UI library contracts: what the glue layer consumes from and injects into the UI library.

mod context;
mod draw;
mod fonts;
mod io;
mod keys;
mod texture;

pub use context::{FrameOutput, UiContext};
pub use draw::{DrawCallback, DrawCmd, DrawCmdParams, DrawData, DrawIdx, DrawList, DrawVert, TextureRef};
pub use fonts::{AtlasImage, FontAtlas, FontConfig};
pub use io::{BackendFlags, ClipboardGetter, ClipboardSetter, ConfigFlags, Io, ShellOpener};
pub use keys::{UiKey, UiMouseButton};
pub use texture::{PixelFormat, TextureData, TextureIndex, TextureRegistry, TextureStatus};
