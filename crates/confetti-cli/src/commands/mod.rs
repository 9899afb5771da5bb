//! CLI command implementations

pub mod config;
pub mod render;
pub mod simulate;

use anyhow::{Context, Result};
use clap::Args;
use confetti_core::Viewport;
use confetti_particles::{BurstOptions, ParticleRng, RandomSource};
use confetti_raster::HeadlessHost;
use confetti_runtime::{Environment, ManualScheduler};
use std::path::Path;
use std::rc::Rc;

/// Burst options and the simulated viewport, shared by every command
#[derive(Args, Debug, Clone)]
pub struct BurstArgs {
    /// TOML file with burst options; flags override its fields
    #[arg(long)]
    pub config: Option<String>,

    /// Burst origin x (defaults to viewport center)
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<f32>,

    /// Burst origin y (defaults to viewport center)
    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<f32>,

    #[arg(long)]
    pub particle_count: Option<i64>,

    /// Spread cone in degrees
    #[arg(long)]
    pub spread: Option<f32>,

    #[arg(long, allow_hyphen_values = true)]
    pub gravity: Option<f32>,

    #[arg(long)]
    pub decay: Option<f32>,

    #[arg(long, allow_hyphen_values = true)]
    pub z_index: Option<i64>,

    /// Comma-separated hex colors, e.g. "#ff0000,#00ff00"
    #[arg(long, value_delimiter = ',')]
    pub colors: Option<Vec<String>>,

    #[arg(long)]
    pub duration_ms: Option<f64>,

    /// Viewport width in CSS pixels
    #[arg(long, default_value = "1280")]
    pub width: f32,

    /// Viewport height in CSS pixels
    #[arg(long, default_value = "720")]
    pub height: f32,

    /// Device pixel ratio
    #[arg(long, default_value = "1")]
    pub dpr: f32,

    /// Simulated frame rate
    #[arg(long, default_value = "60")]
    pub fps: f64,

    /// Seed for a reproducible burst (random when omitted)
    #[arg(long)]
    pub seed: Option<u32>,
}

impl BurstArgs {
    /// Options from `--config` overlaid with any flags given
    pub fn options(&self) -> Result<BurstOptions> {
        let base = match &self.config {
            Some(path) => load_options(Path::new(path))?,
            None => BurstOptions::default(),
        };

        Ok(base.merge(BurstOptions {
            x: self.x,
            y: self.y,
            particle_count: self.particle_count,
            spread: self.spread,
            gravity: self.gravity,
            decay: self.decay,
            z_index: self.z_index,
            colors: self.colors.clone(),
            duration_ms: self.duration_ms,
        }))
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.dpr)
    }

    pub fn frame_interval_ms(&self) -> f64 {
        if self.fps.is_finite() && self.fps > 0.0 {
            1000.0 / self.fps
        } else {
            1000.0 / 60.0
        }
    }

    pub fn rng(&self) -> BurstRng {
        match self.seed {
            Some(seed) => BurstRng::Seeded(ParticleRng::new(seed)),
            None => BurstRng::Entropy(fastrand::Rng::new()),
        }
    }

    pub fn environment(&self) -> Environment<HeadlessHost, ManualScheduler> {
        Environment::new(
            Rc::new(HeadlessHost::new(self.viewport())),
            Rc::new(ManualScheduler::new()),
        )
    }
}

/// Seeded when `--seed` is given, entropy-seeded otherwise
pub enum BurstRng {
    Seeded(ParticleRng),
    Entropy(fastrand::Rng),
}

impl RandomSource for BurstRng {
    fn next_f32(&mut self) -> f32 {
        match self {
            BurstRng::Seeded(rng) => rng.next_f32(),
            BurstRng::Entropy(rng) => RandomSource::next_f32(rng),
        }
    }
}

fn load_options(path: &Path) -> Result<BurstOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read burst config {}", path.display()))?;
    let table: toml::Table = toml::from_str(&text)
        .with_context(|| format!("Failed to parse burst config {}", path.display()))?;
    Ok(BurstOptions::from_toml(&table))
}
