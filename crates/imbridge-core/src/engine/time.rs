use std::time::Duration;

/// Timing of the current host frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Time since the previous frame.
    pub delta: Duration,
    /// Time since the engine started.
    pub total: Duration,
}

impl FrameTime {
    /// Creates a frame time.
    pub const fn new(delta: Duration, total: Duration) -> Self {
        Self { delta, total }
    }

    /// Returns the frame delta in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}
