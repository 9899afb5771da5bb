//! Animation loop controller for one burst

use crate::clock::FrameClock;
use crate::lifecycle::Overlay;
use confetti_core::{DrawContext, FrameHandle, FrameScheduler, Host};
use confetti_particles::{draw_particle, step, BurstConfig, Ensemble};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Why a burst ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The duration budget ran out
    DurationElapsed,
    /// Every particle faded before the budget ran out
    FadedOut,
    /// Stopped from outside the loop
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    /// Terminal
    Ended(EndReason),
}

/// Summary of a burst, available at any point in its life
#[derive(Debug, Clone, PartialEq)]
pub struct BurstReport {
    pub particle_count: usize,
    pub frames: u64,
    pub elapsed_ms: f64,
    pub faded: usize,
    pub end_reason: Option<EndReason>,
}

/// Drives one burst: each frame integrates and draws every particle, then
/// decides whether to continue.
///
/// The loop owns the ensemble and the overlay. Both are released the moment
/// it ends, and an ended loop schedules nothing further.
pub struct BurstLoop<H: Host> {
    config: BurstConfig,
    ensemble: Ensemble,
    overlay: Option<Overlay<H>>,
    clock: FrameClock,
    state: LoopState,
    pending_frame: Option<FrameHandle>,
    particle_count: usize,
    faded_at_end: usize,
}

impl<H> BurstLoop<H>
where
    H: Host + 'static,
    H::Surface: 'static,
{
    pub fn new(config: BurstConfig, ensemble: Ensemble, overlay: Overlay<H>) -> Self {
        let particle_count = ensemble.len();
        Self {
            config,
            ensemble,
            overlay: Some(overlay),
            clock: FrameClock::new(),
            state: LoopState::Idle,
            pending_frame: None,
            particle_count,
            faded_at_end: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn config(&self) -> &BurstConfig {
        &self.config
    }

    /// Particles of a live burst; empty once ended
    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    pub fn report(&self) -> BurstReport {
        let (faded, end_reason) = match self.state {
            LoopState::Ended(reason) => (self.faded_at_end, Some(reason)),
            _ => (self.ensemble.faded_count(), None),
        };
        BurstReport {
            particle_count: self.particle_count,
            frames: self.clock.frames(),
            elapsed_ms: self.clock.elapsed(),
            faded,
            end_reason,
        }
    }

    /// `Idle → Running`. No effect in any other state.
    pub fn start(&mut self) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
            debug!(particles = self.particle_count, "burst running");
        }
    }

    /// Run one frame at `timestamp_ms` and return the resulting state
    pub fn frame(&mut self, timestamp_ms: f64) -> LoopState {
        if self.state != LoopState::Running {
            return self.state;
        }

        let elapsed = self.clock.tick(timestamp_ms);

        let config = &self.config;
        let ensemble = &mut self.ensemble;
        if let Some(overlay) = self.overlay.as_ref() {
            overlay.with_context(|ctx, viewport| {
                ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
                for p in ensemble.as_mut_slice() {
                    step(p, config);
                    draw_particle(ctx, p);
                }
            });
        }

        if elapsed >= self.config.duration_ms {
            self.end(EndReason::DurationElapsed);
        } else if self.ensemble.all_faded() {
            self.end(EndReason::FadedOut);
        }
        self.state
    }

    fn end(&mut self, reason: EndReason) {
        if matches!(self.state, LoopState::Ended(_)) {
            return;
        }
        self.state = LoopState::Ended(reason);
        self.faded_at_end = self.ensemble.faded_count();
        self.ensemble = Ensemble::default();
        self.pending_frame = None;
        if let Some(mut overlay) = self.overlay.take() {
            overlay.teardown();
        }
        debug!(
            ?reason,
            frames = self.clock.frames(),
            elapsed_ms = self.clock.elapsed(),
            "burst ended"
        );
    }

    /// Start the loop on `scheduler`: one frame per callback until it ends.
    /// The pending callback is what keeps the burst alive.
    pub fn run<S: FrameScheduler + 'static>(this: &Rc<RefCell<Self>>, scheduler: &Rc<S>) {
        this.borrow_mut().start();
        Self::schedule(this, scheduler);
    }

    fn schedule<S: FrameScheduler + 'static>(this: &Rc<RefCell<Self>>, scheduler: &Rc<S>) {
        let burst = Rc::clone(this);
        let next = Rc::clone(scheduler);
        let handle = scheduler.request_frame(Box::new(move |timestamp_ms| {
            let state = {
                let mut burst = burst.borrow_mut();
                burst.pending_frame = None;
                burst.frame(timestamp_ms)
            };
            if state == LoopState::Running {
                Self::schedule(&burst, &next);
            }
        }));
        this.borrow_mut().pending_frame = Some(handle);
    }

    /// Force the burst to end now: cancels the pending frame and cleans up
    pub fn stop<S: FrameScheduler>(this: &Rc<RefCell<Self>>, scheduler: &S) {
        let mut burst = this.borrow_mut();
        if let Some(handle) = burst.pending_frame.take() {
            scheduler.cancel_frame(handle);
        }
        burst.end(EndReason::Stopped);
    }
}
