//! Capabilities a rendering environment provides to a burst
//!
//! A burst never touches a global document. Everything it needs (viewport
//! queries, surface creation and attachment, resize notifications, frame
//! scheduling) is reached through these traits, so the same engine runs
//! against a real windowing backend, the headless rasterizer, or a test fake.
//!
//! All methods take `&self`: host handles are cheap single-threaded references
//! (`Rc` + interior mutability) that callbacks can hold on to.

use crate::canvas::DrawContext;
use crate::error::Result;
use crate::types::Viewport;
use std::rc::Rc;

/// Called with the new viewport whenever the host viewport is resized
pub type ResizeListener = Rc<dyn Fn(Viewport)>;

/// Called once on the next frame with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Registration token for a resize listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Cancellation token for a scheduled frame callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Presentation of an overlay surface within the document
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayStyle {
    pub z_index: i32,
    /// Whether the surface receives pointer input; overlays never do
    pub pointer_events: bool,
    /// Fixed position covering the whole viewport
    pub full_viewport: bool,
}

impl OverlayStyle {
    pub fn overlay(z_index: i32) -> Self {
        Self {
            z_index,
            pointer_events: false,
            full_viewport: true,
        }
    }
}

/// A drawing surface created by a [`Host`]
pub trait HostSurface {
    type Context: DrawContext;

    /// Unique id of this surface within its host
    fn id(&self) -> u64;

    /// Resize the backing store. Resets the context's drawing state.
    fn set_pixel_size(&mut self, width: u32, height: u32);

    fn pixel_size(&self) -> (u32, u32);

    /// Acquire the 2D context, or `None` if the surface cannot provide one
    fn context_2d(&mut self) -> Option<Self::Context>;
}

/// The visible document and viewport of a rendering environment
pub trait Host {
    type Surface: HostSurface;

    /// Current viewport, or `None` when there is nothing to render into
    fn viewport(&self) -> Option<Viewport>;

    fn create_surface(&self) -> Option<Self::Surface>;

    fn attach(&self, surface: &Self::Surface, style: &OverlayStyle) -> Result<()>;

    /// Remove a surface from the document.
    /// Returns `SurfaceNotAttached` if it was never attached or already removed.
    fn detach(&self, surface: &Self::Surface) -> Result<()>;

    fn add_resize_listener(&self, listener: ResizeListener) -> ListenerId;

    /// Returns `ListenerNotFound` if the listener was already removed
    fn remove_resize_listener(&self, id: ListenerId) -> Result<()>;
}

/// The host's per-frame scheduling primitive
pub trait FrameScheduler {
    /// Run `callback` once on the next frame
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a pending callback. Returns false if it already ran or was cancelled.
    fn cancel_frame(&self, handle: FrameHandle) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_style_ignores_pointer() {
        let style = OverlayStyle::overlay(42);
        assert_eq!(style.z_index, 42);
        assert!(!style.pointer_events);
        assert!(style.full_viewport);
    }
}
