//! Run a burst to completion and report how it ended

use super::BurstArgs;
use anyhow::{bail, Result};
use confetti_runtime::{launch, BurstReport, EndReason};
use serde::Serialize;

/// Upper bound on simulated frames, far beyond any budget at sane frame rates
const MAX_FRAMES: usize = 1_000_000;

#[derive(Serialize)]
struct Summary {
    particles: usize,
    frames: u64,
    elapsed_ms: f64,
    faded: usize,
    end_reason: &'static str,
    surfaces_left: usize,
    listeners_left: usize,
}

fn reason_name(reason: Option<EndReason>) -> &'static str {
    match reason {
        Some(EndReason::DurationElapsed) => "duration",
        Some(EndReason::FadedOut) => "faded",
        Some(EndReason::Stopped) => "stopped",
        None => "running",
    }
}

pub fn run(args: &BurstArgs, format: &str) -> Result<()> {
    let options = args.options()?;
    let env = args.environment();
    let mut rng = args.rng();

    let Some(burst) = launch(&env, &options, &mut rng) else {
        bail!("Headless environment could not start a burst");
    };
    env.scheduler
        .run_until_idle(0.0, args.frame_interval_ms(), MAX_FRAMES);

    let report: BurstReport = burst.borrow().report();
    let summary = Summary {
        particles: report.particle_count,
        frames: report.frames,
        elapsed_ms: report.elapsed_ms,
        faded: report.faded,
        end_reason: reason_name(report.end_reason),
        surfaces_left: env.host.attached_count(),
        listeners_left: env.host.listener_count(),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => {
            println!("Particles: {}", summary.particles);
            println!("Frames: {}", summary.frames);
            println!("Elapsed: {:.1} ms", summary.elapsed_ms);
            println!("Faded: {}/{}", summary.faded, summary.particles);
            println!("Ended by: {}", summary.end_reason);
            println!(
                "Left behind: {} surface(s), {} listener(s)",
                summary.surfaces_left, summary.listeners_left
            );
        }
    }
    Ok(())
}
