use glam::{Vec2, Vec4};
use imbridge_core::Scissor;

/// Converts a clip rectangle in display coordinates into a scissor relative to the display
/// origin.
///
/// Returns `None` when the visible width or height rounds to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scissor_for(clip_rect: Vec4, display_pos: Vec2) -> Option<Scissor> {
    let min = (clip_rect.truncate().truncate() - display_pos).max(Vec2::ZERO);
    let max = Vec2::new(clip_rect.z, clip_rect.w) - display_pos;

    let size = (max - min).round();
    if size.x < 1.0 || size.y < 1.0 {
        return None;
    }
    let min = min.round();
    Some(Scissor::new(min.x as u32, min.y as u32, size.x as u32, size.y as u32))
}
