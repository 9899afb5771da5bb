//! Confetti Particles - burst particle simulation
//!
//! Everything here is independent of any rendering environment:
//! - `BurstOptions` / `BurstConfig` - caller options resolved against defaults
//! - `spawn_ensemble` - the initial particle ensemble of a burst
//! - `step` - fixed per-frame semi-implicit Euler integration
//! - `draw_particle` - shape rendering onto any `DrawContext`

pub mod config;
pub mod factory;
pub mod particle;
pub mod physics;
pub mod rand;
pub mod render;

pub use config::{BurstConfig, BurstOptions, MAX_PARTICLE_COUNT};
pub use factory::{spawn_ensemble, spawn_particle};
pub use particle::{Ensemble, Particle, Shape, ALPHA_DECREMENT};
pub use physics::{step, step_all};
pub use rand::{ParticleRng, RandomSource};
pub use render::draw_particle;
