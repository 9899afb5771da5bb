//! Confetti Core - Foundational types for the Confetti burst engine
//!
//! This crate provides the types every other Confetti crate depends on:
//! - `Color`, `Viewport` - Drawing and screen types
//! - `DrawContext` - the 2D drawing capability particles are painted with
//! - `Host`, `HostSurface`, `FrameScheduler` - the capabilities a rendering
//!   environment provides to a burst
//! - Error types and Result alias

mod canvas;
mod error;
mod host;
mod types;

pub use canvas::DrawContext;
pub use error::{ConfettiError, Result};
pub use host::{
    FrameCallback, FrameHandle, FrameScheduler, Host, HostSurface, ListenerId, OverlayStyle,
    ResizeListener,
};
pub use types::{Color, Viewport};
