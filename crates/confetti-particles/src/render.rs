//! Drawing particles onto a 2D context

use crate::particle::{Particle, Shape};
use confetti_core::DrawContext;

/// Paint one particle at its position and rotation.
/// The transform is local to this call: it is restored before returning.
pub fn draw_particle(ctx: &mut impl DrawContext, p: &Particle) {
    let opacity = p.opacity();
    if opacity <= 0.0 {
        return;
    }

    ctx.save();
    ctx.translate(p.position.x, p.position.y);
    ctx.rotate(p.rotation);
    ctx.set_global_alpha(opacity);
    ctx.set_fill_color(p.color);

    let half = p.size / 2.0;
    match p.shape {
        Shape::Block => ctx.fill_rect(-half, -half, p.size, p.size),
        Shape::Disc => ctx.fill_circle(0.0, 0.0, half),
        Shape::Wedge => ctx.fill_triangle([[0.0, -half], [half, half], [-half, half]]),
    }

    ctx.restore();
}
