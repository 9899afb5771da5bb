//! Initial particle ensemble for a burst

use crate::config::{BurstConfig, DEFAULT_PALETTE};
use crate::particle::{Ensemble, Particle, Shape};
use crate::rand::RandomSource;
use confetti_core::Color;
use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Initial speed range, units per frame
pub const SPEED_RANGE: (f32, f32) = (4.0, 9.0);
/// Particle size range
pub const SIZE_RANGE: (f32, f32) = (4.0, 8.0);
/// Rotation speed is drawn from [-MAX, MAX) radians per frame
pub const MAX_ROTATION_SPEED: f32 = 0.2;

/// Build exactly `config.particle_count` particles at the burst origin
pub fn spawn_ensemble(config: &BurstConfig, rng: &mut impl RandomSource) -> Ensemble {
    let particles = (0..config.particle_count)
        .map(|_| spawn_particle(config, rng))
        .collect();
    Ensemble::new(particles)
}

/// One particle heading into either the right (0 rad) or left (π rad) spread cone
pub fn spawn_particle(config: &BurstConfig, rng: &mut impl RandomSource) -> Particle {
    let angle = cone_angle(rng, config.spread);
    let speed = rng.range(SPEED_RANGE.0, SPEED_RANGE.1);

    let size = rng.range(SIZE_RANGE.0, SIZE_RANGE.1);
    let color = match config.colors.as_slice() {
        [] => Color::from_hex(DEFAULT_PALETTE[rng.index(DEFAULT_PALETTE.len())]),
        colors => colors[rng.index(colors.len())],
    };
    let rotation = rng.range(0.0, TAU);
    let rotation_speed = rng.range(-MAX_ROTATION_SPEED, MAX_ROTATION_SPEED);
    let shape = Shape::ALL[rng.index(Shape::ALL.len())];

    Particle {
        position: Vec2::from_array(config.origin),
        velocity: Vec2::from_angle(angle) * speed,
        size,
        color,
        alpha: 1.0,
        rotation,
        rotation_speed,
        shape,
    }
}

/// Direction in radians: a base direction picked with equal probability from
/// two opposing ones, offset uniformly within `spread_deg` centered on it
fn cone_angle(rng: &mut impl RandomSource, spread_deg: f32) -> f32 {
    let base = if rng.chance(0.5) { 0.0 } else { PI };
    let offset = rng.range(-0.5, 0.5) * spread_deg;
    base + offset.to_radians()
}
