//! Particle state and the fixed-size ensemble owned by one burst

use confetti_core::Color;
use glam::Vec2;

/// Opacity lost per simulation step
pub const ALPHA_DECREMENT: f32 = 0.012;

/// Shape a particle is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Axis-aligned square
    Block,
    /// Filled circle
    Disc,
    /// Isosceles triangle, apex up
    Wedge,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Block, Shape::Disc, Shape::Wedge];
}

/// Simulation state of one particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: Color,
    /// Starts at 1, never stored below 0
    pub alpha: f32,
    /// Radians
    pub rotation: f32,
    /// Radians per step
    pub rotation_speed: f32,
    pub shape: Shape,
}

impl Particle {
    /// Opacity to draw with
    pub fn opacity(&self) -> f32 {
        self.alpha.max(0.0)
    }

    pub fn is_faded(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// The particles of one burst. The count is fixed at creation: particles fade
/// out but stay in the ensemble until the burst ends.
#[derive(Debug, Clone, Default)]
pub struct Ensemble {
    particles: Vec<Particle>,
}

impl Ensemble {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the particles; the slice cannot grow or shrink
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn faded_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_faded()).count()
    }

    /// True once every particle is invisible
    pub fn all_faded(&self) -> bool {
        self.particles.iter().all(Particle::is_faded)
    }
}
