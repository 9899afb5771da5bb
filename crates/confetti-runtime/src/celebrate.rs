//! Fire-and-forget burst entry point

use crate::burst::BurstLoop;
use crate::lifecycle::Overlay;
use confetti_core::{FrameScheduler, Host};
use confetti_particles::{spawn_ensemble, BurstConfig, BurstOptions, RandomSource};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// The rendering environment a burst runs in
pub struct Environment<H, S> {
    pub host: Rc<H>,
    pub scheduler: Rc<S>,
}

impl<H, S> Environment<H, S> {
    pub fn new(host: Rc<H>, scheduler: Rc<S>) -> Self {
        Self { host, scheduler }
    }
}

impl<H, S> Clone for Environment<H, S> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
            scheduler: Rc::clone(&self.scheduler),
        }
    }
}

/// Fire a confetti burst. Returns immediately; the burst animates on the
/// environment's frame schedule and removes its overlay when done.
///
/// Never fails: in an environment that cannot render this does nothing.
pub fn celebrate<H, S>(env: &Environment<H, S>, options: BurstOptions)
where
    H: Host + 'static,
    H::Surface: 'static,
    S: FrameScheduler + 'static,
{
    celebrate_with_rng(env, options, &mut fastrand::Rng::new());
}

/// [`celebrate`] with an explicit random source, for reproducible bursts
pub fn celebrate_with_rng<H, S>(
    env: &Environment<H, S>,
    options: BurstOptions,
    rng: &mut impl RandomSource,
) where
    H: Host + 'static,
    H::Surface: 'static,
    S: FrameScheduler + 'static,
{
    let _ = launch(env, &options, rng);
}

/// Start a burst and return its loop for inspection, or `None` if the
/// environment cannot render. Dropping the returned handle does not stop it.
pub fn launch<H, S>(
    env: &Environment<H, S>,
    options: &BurstOptions,
    rng: &mut impl RandomSource,
) -> Option<Rc<RefCell<BurstLoop<H>>>>
where
    H: Host + 'static,
    H::Surface: 'static,
    S: FrameScheduler + 'static,
{
    let Some(viewport) = env.host.viewport() else {
        debug!("no renderable environment, skipping burst");
        return None;
    };
    let config = BurstConfig::resolve(options, viewport);

    let overlay = match Overlay::mount(Rc::clone(&env.host), config.z_index) {
        Ok(overlay) => overlay,
        Err(err) => {
            debug!("skipping burst: {err}");
            return None;
        }
    };

    let ensemble = spawn_ensemble(&config, rng);
    let burst = Rc::new(RefCell::new(BurstLoop::new(config, ensemble, overlay)));
    BurstLoop::run(&burst, &env.scheduler);
    Some(burst)
}
