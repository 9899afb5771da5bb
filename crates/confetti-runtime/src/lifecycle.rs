//! Overlay surface lifecycle: mount, resize tracking, guaranteed removal

use confetti_core::{
    ConfettiError, DrawContext, Host, HostSurface, ListenerId, OverlayStyle, Result, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

type ContextOf<H> = <<H as Host>::Surface as HostSurface>::Context;

/// Surface, its context, and the viewport it is currently sized for
struct Canvas<S: HostSurface> {
    surface: S,
    context: S::Context,
    viewport: Viewport,
}

impl<S: HostSurface> Canvas<S> {
    /// Size the backing store to `viewport × dpr` and reset the base transform
    fn fit(&mut self, viewport: Viewport) {
        let (width, height) = viewport.pixel_size();
        self.surface.set_pixel_size(width, height);
        let dpr = viewport.pixel_ratio();
        self.context.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.viewport = viewport;
    }
}

/// A full-viewport overlay surface owned by one burst.
///
/// The surface ignores pointer input and stacks at the burst's z-index. It
/// follows viewport resizes until [`teardown`](Overlay::teardown), which runs
/// at most once and also runs on drop.
pub struct Overlay<H: Host> {
    host: Rc<H>,
    canvas: Option<Rc<RefCell<Canvas<H::Surface>>>>,
    listener: Option<ListenerId>,
    surface_id: u64,
}

impl<H> Overlay<H>
where
    H: Host + 'static,
    H::Surface: 'static,
{
    /// Create, size and attach an overlay surface.
    ///
    /// Fails with `EnvironmentUnavailable` when the host has nothing to render
    /// into, or `ContextUnavailable` when the surface yields no 2D context. In
    /// both cases nothing is left attached.
    pub fn mount(host: Rc<H>, z_index: i32) -> Result<Self> {
        let viewport = host.viewport().ok_or(ConfettiError::EnvironmentUnavailable)?;
        let mut surface = host
            .create_surface()
            .ok_or(ConfettiError::EnvironmentUnavailable)?;
        // Dropping the surface here disposes it; it was never attached
        let context = surface
            .context_2d()
            .ok_or(ConfettiError::ContextUnavailable)?;

        let surface_id = surface.id();
        let mut canvas = Canvas {
            surface,
            context,
            viewport,
        };
        canvas.fit(viewport);

        host.attach(&canvas.surface, &OverlayStyle::overlay(z_index))?;
        let canvas = Rc::new(RefCell::new(canvas));

        // Weak so a resize delivered after teardown finds nothing to resize
        let weak = Rc::downgrade(&canvas);
        let listener = host.add_resize_listener(Rc::new(move |viewport: Viewport| {
            let Some(canvas) = weak.upgrade() else {
                return;
            };
            match canvas.try_borrow_mut() {
                Ok(mut canvas) => canvas.fit(viewport),
                Err(_) => debug!(surface_id, "resize skipped while surface is in use"),
            };
        }));

        debug!(
            surface_id,
            z_index,
            width = viewport.width,
            height = viewport.height,
            dpr = viewport.pixel_ratio(),
            "overlay mounted"
        );

        Ok(Self {
            host,
            canvas: Some(canvas),
            listener: Some(listener),
            surface_id,
        })
    }

    pub fn surface_id(&self) -> u64 {
        self.surface_id
    }

    pub fn is_mounted(&self) -> bool {
        self.canvas.is_some()
    }

    /// Viewport the surface is currently sized for
    pub fn viewport(&self) -> Option<Viewport> {
        self.canvas.as_ref().map(|c| c.borrow().viewport)
    }

    /// Run `f` with the drawing context and current viewport.
    /// Returns `None` once torn down.
    pub fn with_context<R>(&self, f: impl FnOnce(&mut ContextOf<H>, Viewport) -> R) -> Option<R> {
        let canvas = self.canvas.as_ref()?;
        let mut canvas = canvas.borrow_mut();
        let viewport = canvas.viewport;
        Some(f(&mut canvas.context, viewport))
    }
}

impl<H: Host> Overlay<H> {
    /// Stop tracking resizes and remove the surface from the document.
    /// Tolerates both having already been removed; repeated calls do nothing.
    pub fn teardown(&mut self) {
        if let Some(id) = self.listener.take() {
            if let Err(err) = self.host.remove_resize_listener(id) {
                debug!(surface_id = self.surface_id, "{err}");
            }
        }

        if let Some(canvas) = self.canvas.take() {
            if let Err(err) = self.host.detach(&canvas.borrow().surface) {
                debug!(surface_id = self.surface_id, "{err}");
            }
            debug!(surface_id = self.surface_id, "overlay removed");
        }
    }
}

impl<H: Host> Drop for Overlay<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confetti_core::Color;
    use confetti_raster::HeadlessHost;

    fn host(width: f32, height: f32, dpr: f32) -> Rc<HeadlessHost> {
        Rc::new(HeadlessHost::new(Viewport::new(width, height, dpr)))
    }

    #[test]
    fn mount_attaches_scaled_overlay() {
        let host = host(400.0, 300.0, 2.0);
        let overlay = Overlay::mount(host.clone(), 77).unwrap();

        assert!(overlay.is_mounted());
        assert_eq!(host.attached_count(), 1);
        assert_eq!(host.listener_count(), 1);

        let styles = host.attached_styles();
        let style = &styles[0];
        assert_eq!(style.z_index, 77);
        assert!(!style.pointer_events);
        assert!(style.full_viewport);

        let surfaces = host.attached_surfaces();
        assert_eq!(surfaces[0].pixel_size(), (800, 600));
        let transform = overlay.with_context(|ctx, _| ctx.transform()).unwrap();
        assert_eq!(transform, [2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn resize_refits_surface() {
        let host = host(400.0, 300.0, 1.0);
        let overlay = Overlay::mount(host.clone(), 1).unwrap();

        host.resize(Viewport::new(640.0, 480.0, 1.5));
        assert_eq!(host.attached_surfaces()[0].pixel_size(), (960, 720));
        assert_eq!(overlay.viewport().unwrap().width, 640.0);
        let transform = overlay.with_context(|ctx, _| ctx.transform()).unwrap();
        assert_eq!(transform, [1.5, 0.0, 0.0, 1.5, 0.0, 0.0]);

        // Drawing in CSS units lands at device scale
        overlay.with_context(|ctx, _| {
            ctx.set_fill_color(Color::WHITE);
            ctx.fill_rect(0.0, 0.0, 2.0, 2.0);
        });
        assert_eq!(host.attached_surfaces()[0].painted_pixels(), 9);
    }

    #[test]
    fn teardown_is_idempotent() {
        let host = host(100.0, 100.0, 1.0);
        let mut overlay = Overlay::mount(host.clone(), 1).unwrap();

        overlay.teardown();
        assert!(!overlay.is_mounted());
        assert_eq!(host.attached_count(), 0);
        assert_eq!(host.listener_count(), 0);
        assert!(overlay.with_context(|_, _| ()).is_none());

        overlay.teardown();
        assert_eq!(host.attached_count(), 0);
    }

    #[test]
    fn teardown_tolerates_external_detach() {
        let host = host(100.0, 100.0, 1.0);
        let mut overlay = Overlay::mount(host.clone(), 1).unwrap();

        let surface = host.attached_surfaces().remove(0);
        host.detach(&surface).unwrap();
        overlay.teardown();
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn drop_cleans_up() {
        let host = host(100.0, 100.0, 1.0);
        {
            let _overlay = Overlay::mount(host.clone(), 1).unwrap();
            assert_eq!(host.attached_count(), 1);
        }
        assert_eq!(host.attached_count(), 0);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn resize_after_teardown_is_harmless() {
        let host = host(100.0, 100.0, 1.0);
        let mut overlay = Overlay::mount(host.clone(), 1).unwrap();
        overlay.teardown();
        host.resize(Viewport::new(10.0, 10.0, 1.0));
        assert_eq!(host.attached_count(), 0);
    }

    #[test]
    fn missing_document_is_environment_unavailable() {
        let host = Rc::new(HeadlessHost::without_document());
        let result = Overlay::mount(host.clone(), 1);
        assert!(matches!(result, Err(ConfettiError::EnvironmentUnavailable)));
        assert_eq!(host.attached_count(), 0);
    }

    #[test]
    fn missing_context_leaves_nothing_attached() {
        let host = Rc::new(HeadlessHost::without_context(Viewport::default()));
        let result = Overlay::mount(host.clone(), 1);
        assert!(matches!(result, Err(ConfettiError::ContextUnavailable)));
        assert_eq!(host.created_count(), 1);
        assert_eq!(host.attached_count(), 0);
        assert_eq!(host.listener_count(), 0);
    }
}
