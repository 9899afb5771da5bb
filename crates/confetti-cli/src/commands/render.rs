//! Headless burst-to-PNG render command

use super::BurstArgs;
use anyhow::{bail, Context, Result};
use confetti_raster::save_png;
use confetti_runtime::{launch, BurstLoop};
use std::path::Path;
use tracing::info;

pub struct RenderArgs {
    pub burst: BurstArgs,
    pub output: String,
    pub max_frames: Option<usize>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let options = args.burst.options()?;
    let env = args.burst.environment();
    let mut rng = args.burst.rng();

    let out_dir = Path::new(&args.output);
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let Some(burst) = launch(&env, &options, &mut rng) else {
        bail!("Headless environment could not start a burst");
    };
    // Clones share pixels, so this handle still sees the final frame after the
    // overlay is detached
    let Some(surface) = env.host.attached_surfaces().into_iter().next() else {
        bail!("Burst started without an attached surface");
    };
    let interval = args.burst.frame_interval_ms();

    let mut written = 0;
    while env.scheduler.pending() > 0 {
        if args.max_frames.is_some_and(|max| written >= max) {
            BurstLoop::stop(&burst, env.scheduler.as_ref());
            break;
        }

        env.scheduler.run_frame(written as f64 * interval);

        let path = out_dir.join(format!("frame_{written:04}.png"));
        save_png(&surface, &path).with_context(|| format!("Failed to write {}", path.display()))?;
        written += 1;
    }

    let report = burst.borrow().report();
    info!(
        frames = written,
        elapsed_ms = report.elapsed_ms,
        reason = ?report.end_reason,
        "burst rendered"
    );
    println!("Wrote {} frame(s) to {}", written, out_dir.display());
    Ok(())
}
