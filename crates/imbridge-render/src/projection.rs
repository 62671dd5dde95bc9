use glam::{Mat4, Vec2};

/// Orthographic projection mapping the display rectangle to clip space.
///
/// The display origin lands at the top-left of clip space (Y points down on screen).
/// Depth spans `-1..1`.
pub fn orthographic_projection(display_pos: Vec2, display_size: Vec2) -> Mat4 {
    let left = display_pos.x;
    let right = display_pos.x + display_size.x;
    let top = display_pos.y;
    let bottom = display_pos.y + display_size.y;
    Mat4::orthographic_rh(left, right, bottom, top, -1.0, 1.0)
}
