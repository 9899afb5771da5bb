//! Confetti Runtime - burst lifecycle
//!
//! Drives a burst from mount to disposal:
//! - `Overlay` - mounts a full-viewport surface and guarantees its removal
//! - `BurstLoop` - `Idle → Running → Ended` frame loop (integrate, render, stop check)
//! - `FrameClock` - logical start and elapsed time from frame timestamps
//! - `ManualScheduler` - a `FrameScheduler` stepped by hand (headless tools, tests)
//! - `celebrate` - fire-and-forget entry point

mod burst;
mod celebrate;
mod clock;
mod lifecycle;
mod scheduler;

pub use burst::{BurstLoop, BurstReport, EndReason, LoopState};
pub use celebrate::{celebrate, celebrate_with_rng, launch, Environment};
pub use clock::FrameClock;
pub use lifecycle::Overlay;
pub use scheduler::ManualScheduler;
