//! Content service contract: asynchronously compiled shader pipelines.

use std::rc::Rc;

/// Engine-side pipeline identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineId(pub u32);

/// A shader pipeline that may still be compiling.
pub trait Pipeline {
    /// Returns the identifier bound by draws.
    fn id(&self) -> PipelineId;

    /// Returns whether compilation has finished.
    fn is_ready(&self) -> bool;
}

/// The engine's content service.
pub trait ContentService {
    /// Starts loading a pipeline asset. The handle is shared and polled every frame.
    fn load_pipeline(&mut self, uri: &str) -> Rc<dyn Pipeline>;
}
