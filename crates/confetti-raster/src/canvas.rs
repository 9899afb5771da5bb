//! `DrawContext` implementation over an RGBA8 buffer
//!
//! Shapes are rasterized by mapping each candidate pixel center back into the
//! shape's local space through the inverse transform, so rotated and scaled
//! shapes need no special casing. Coverage is binary (no anti-aliasing).

use crate::surface::Backing;
use confetti_core::{Color, DrawContext};
use glam::{Affine2, Vec2};
use image::Rgba;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug)]
struct DrawState {
    transform: Affine2,
    alpha: f32,
    fill: Color,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            alpha: 1.0,
            fill: Color::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Local-space shape tested per pixel
enum Coverage {
    Rect { min: Vec2, max: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Triangle([Vec2; 3]),
}

impl Coverage {
    fn bounds(&self) -> (Vec2, Vec2) {
        match *self {
            Coverage::Rect { min, max } => (min, max),
            Coverage::Circle { center, radius } => {
                (center - Vec2::splat(radius), center + Vec2::splat(radius))
            }
            Coverage::Triangle([a, b, c]) => (a.min(b).min(c), a.max(b).max(c)),
        }
    }

    fn contains(&self, p: Vec2) -> bool {
        match *self {
            Coverage::Rect { min, max } => p.cmpge(min).all() && p.cmplt(max).all(),
            Coverage::Circle { center, radius } => p.distance_squared(center) <= radius * radius,
            Coverage::Triangle([a, b, c]) => {
                let d1 = edge(p, a, b);
                let d2 = edge(p, b, c);
                let d3 = edge(p, c, a);
                let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
                let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
                !(has_neg && has_pos)
            }
        }
    }
}

fn edge(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

/// A 2D drawing context bound to one surface
pub struct RasterContext {
    backing: Rc<RefCell<Backing>>,
    generation: u64,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl RasterContext {
    pub(crate) fn new(backing: Rc<RefCell<Backing>>) -> Self {
        let generation = backing.borrow().generation;
        Self {
            backing,
            generation,
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    /// Current transform as `[a, b, c, d, e, f]`
    pub fn transform(&mut self) -> [f32; 6] {
        self.sync();
        self.state.transform.to_cols_array()
    }

    /// Resizing the surface resets drawing state, as with an HTML canvas
    fn sync(&mut self) {
        let generation = self.backing.borrow().generation;
        if generation != self.generation {
            self.generation = generation;
            self.state = DrawState::default();
            self.stack.clear();
        }
    }

    fn rasterize(&mut self, shape: Coverage, paint: Option<Color>) {
        self.sync();
        let transform = self.state.transform;
        if transform.matrix2.determinant().abs() < f32::EPSILON {
            return;
        }
        let inverse = transform.inverse();

        let (lo, hi) = shape.bounds();
        let corners = [
            transform.transform_point2(lo),
            transform.transform_point2(Vec2::new(hi.x, lo.y)),
            transform.transform_point2(hi),
            transform.transform_point2(Vec2::new(lo.x, hi.y)),
        ];
        let dmin = corners.iter().fold(Vec2::splat(f32::MAX), |m, c| m.min(*c));
        let dmax = corners.iter().fold(Vec2::splat(f32::MIN), |m, c| m.max(*c));

        let mut backing = self.backing.borrow_mut();
        let image = &mut backing.image;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        let x0 = dmin.x.floor().max(0.0) as u32;
        let y0 = dmin.y.floor().max(0.0) as u32;
        let x1 = (dmax.x.ceil().max(0.0) as u32).min(width);
        let y1 = (dmax.y.ceil().max(0.0) as u32).min(height);

        let source = paint.map(|c| Color {
            a: c.a * self.state.alpha.clamp(0.0, 1.0),
            ..c
        });

        for y in y0..y1 {
            for x in x0..x1 {
                let local = inverse.transform_point2(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                if !shape.contains(local) {
                    continue;
                }
                let pixel = image.get_pixel_mut(x, y);
                match source {
                    Some(color) => blend(pixel, color),
                    None => *pixel = Rgba([0, 0, 0, 0]),
                }
            }
        }
    }
}

/// Source-over compositing of a straight-alpha color onto a straight-alpha pixel
fn blend(dst: &mut Rgba<u8>, src: Color) {
    let sa = src.a.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let [dr, dg, db, da] = dst.0.map(|v| v as f32 / 255.0);
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
    let out = Color::new(mix(src.r, dr), mix(src.g, dg), mix(src.b, db), out_a);
    *dst = Rgba(out.to_rgba8());
}

impl DrawContext for RasterContext {
    fn save(&mut self) {
        self.sync();
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        self.sync();
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.sync();
        self.state.transform = Affine2::from_cols_array(&[a, b, c, d, e, f]);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.sync();
        self.state.transform = self.state.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    fn rotate(&mut self, angle: f32) {
        self.sync();
        self.state.transform = self.state.transform * Affine2::from_angle(angle);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.sync();
        if alpha.is_finite() {
            self.state.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.sync();
        self.state.fill = color;
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let min = Vec2::new(x, y);
        let max = min + Vec2::new(width, height);
        self.rasterize(
            Coverage::Rect {
                min: min.min(max),
                max: min.max(max),
            },
            None,
        );
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let min = Vec2::new(x, y);
        let max = min + Vec2::new(width, height);
        let fill = self.state.fill;
        self.rasterize(
            Coverage::Rect {
                min: min.min(max),
                max: min.max(max),
            },
            Some(fill),
        );
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let fill = self.state.fill;
        self.rasterize(
            Coverage::Circle {
                center: Vec2::new(cx, cy),
                radius,
            },
            Some(fill),
        );
    }

    fn fill_triangle(&mut self, points: [[f32; 2]; 3]) {
        let fill = self.state.fill;
        self.rasterize(Coverage::Triangle(points.map(Vec2::from_array)), Some(fill));
    }
}
