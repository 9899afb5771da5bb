//! The 2D drawing capability bursts paint onto

use crate::types::Color;

/// Immediate-mode 2D drawing context with a save/restore transform stack.
///
/// Coordinates are in the context's current user space. `set_transform` replaces
/// the current matrix `[a c e; b d f]`; `translate` and `rotate` post-multiply it.
/// `save`/`restore` push and pop the matrix, global alpha and fill color together.
pub trait DrawContext {
    fn save(&mut self);
    fn restore(&mut self);

    fn set_transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32);
    fn translate(&mut self, x: f32, y: f32);
    /// Rotate by `angle` radians (clockwise in y-down space)
    fn rotate(&mut self, angle: f32);

    fn set_global_alpha(&mut self, alpha: f32);
    fn set_fill_color(&mut self, color: Color);

    /// Reset the rectangle to fully transparent
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);
    fn fill_triangle(&mut self, points: [[f32; 2]; 3]);
}
