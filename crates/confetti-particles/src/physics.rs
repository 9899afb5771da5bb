//! Per-frame particle integration
//!
//! Steps are in fixed per-frame units with no delta-time scaling, so apparent
//! speed follows the host frame rate.

use crate::config::BurstConfig;
use crate::particle::{Ensemble, Particle, ALPHA_DECREMENT};

/// Advance one particle by one frame (semi-implicit Euler)
pub fn step(p: &mut Particle, config: &BurstConfig) {
    p.velocity.y += config.gravity;
    p.velocity *= config.decay;
    p.position += p.velocity;
    p.rotation += p.rotation_speed;
    p.alpha = (p.alpha - ALPHA_DECREMENT).max(0.0);
}

/// Advance every particle in the ensemble by one frame
pub fn step_all(ensemble: &mut Ensemble, config: &BurstConfig) {
    for p in ensemble.as_mut_slice() {
        step(p, config);
    }
}
