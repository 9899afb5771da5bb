//! Print the resolved burst configuration

use super::BurstArgs;
use anyhow::{Context, Result};
use confetti_particles::BurstConfig;

pub fn run(args: &BurstArgs) -> Result<()> {
    let options = args.options()?;
    let config = BurstConfig::resolve(&options, args.viewport());
    let text = toml::to_string(&config.to_toml()).context("Failed to serialize configuration")?;
    print!("{text}");
    Ok(())
}
