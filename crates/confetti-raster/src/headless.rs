//! Headless rendering environment: a simulated document and viewport

use crate::surface::RasterSurface;
use confetti_core::{
    ConfettiError, Host, HostSurface, ListenerId, OverlayStyle, ResizeListener, Result, Viewport,
};
use std::cell::RefCell;
use tracing::debug;

struct Document {
    viewport: Option<Viewport>,
    contexts_supported: bool,
    next_surface_id: u64,
    next_listener_id: u64,
    created: usize,
    attached: Vec<(RasterSurface, OverlayStyle)>,
    listeners: Vec<(ListenerId, ResizeListener)>,
}

/// A [`Host`] backed by [`RasterSurface`]s.
///
/// Keeps track of attached surfaces and registered resize listeners so tools
/// and tests can inspect what a burst left behind.
pub struct HeadlessHost {
    doc: RefCell<Document>,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            doc: RefCell::new(Document {
                viewport: Some(viewport),
                contexts_supported: true,
                next_surface_id: 1,
                next_listener_id: 1,
                created: 0,
                attached: Vec::new(),
                listeners: Vec::new(),
            }),
        }
    }

    /// An environment with no document: nothing can be rendered
    pub fn without_document() -> Self {
        let host = Self::new(Viewport::default());
        host.doc.borrow_mut().viewport = None;
        host
    }

    /// A document whose surfaces never yield a 2D context
    pub fn without_context(viewport: Viewport) -> Self {
        let host = Self::new(viewport);
        host.doc.borrow_mut().contexts_supported = false;
        host
    }

    /// Change the viewport and notify every registered resize listener
    pub fn resize(&self, viewport: Viewport) {
        let listeners: Vec<ResizeListener> = {
            let mut doc = self.doc.borrow_mut();
            doc.viewport = Some(viewport);
            doc.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        debug!(
            width = viewport.width,
            height = viewport.height,
            listeners = listeners.len(),
            "viewport resized"
        );
        // Listeners run with the document unborrowed so they may call back into the host
        for listener in listeners {
            listener(viewport);
        }
    }

    pub fn attached_count(&self) -> usize {
        self.doc.borrow().attached.len()
    }

    pub fn listener_count(&self) -> usize {
        self.doc.borrow().listeners.len()
    }

    /// Total surfaces ever created
    pub fn created_count(&self) -> usize {
        self.doc.borrow().created
    }

    pub fn attached_surfaces(&self) -> Vec<RasterSurface> {
        self.doc
            .borrow()
            .attached
            .iter()
            .map(|(s, _)| s.clone())
            .collect()
    }

    pub fn attached_styles(&self) -> Vec<OverlayStyle> {
        self.doc
            .borrow()
            .attached
            .iter()
            .map(|(_, style)| style.clone())
            .collect()
    }
}

impl Host for HeadlessHost {
    type Surface = RasterSurface;

    fn viewport(&self) -> Option<Viewport> {
        self.doc.borrow().viewport
    }

    fn create_surface(&self) -> Option<RasterSurface> {
        let mut doc = self.doc.borrow_mut();
        doc.viewport?;

        let id = doc.next_surface_id;
        doc.next_surface_id += 1;
        doc.created += 1;

        Some(if doc.contexts_supported {
            RasterSurface::new(id, 0, 0)
        } else {
            RasterSurface::without_context(id)
        })
    }

    fn attach(&self, surface: &RasterSurface, style: &OverlayStyle) -> Result<()> {
        let mut doc = self.doc.borrow_mut();
        if doc.viewport.is_none() {
            return Err(ConfettiError::EnvironmentUnavailable);
        }
        doc.attached.retain(|(s, _)| s.id() != surface.id());
        doc.attached.push((surface.clone(), style.clone()));
        Ok(())
    }

    fn detach(&self, surface: &RasterSurface) -> Result<()> {
        let mut doc = self.doc.borrow_mut();
        let index = doc
            .attached
            .iter()
            .position(|(s, _)| s.id() == surface.id())
            .ok_or(ConfettiError::SurfaceNotAttached(surface.id()))?;
        doc.attached.remove(index);
        Ok(())
    }

    fn add_resize_listener(&self, listener: ResizeListener) -> ListenerId {
        let mut doc = self.doc.borrow_mut();
        let id = ListenerId(doc.next_listener_id);
        doc.next_listener_id += 1;
        doc.listeners.push((id, listener));
        id
    }

    fn remove_resize_listener(&self, id: ListenerId) -> Result<()> {
        let mut doc = self.doc.borrow_mut();
        let index = doc
            .listeners
            .iter()
            .position(|(lid, _)| *lid == id)
            .ok_or(ConfettiError::ListenerNotFound(id.0))?;
        doc.listeners.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn attach_detach_tracks_document() {
        let host = HeadlessHost::new(Viewport::new(100.0, 100.0, 1.0));
        let surface = host.create_surface().unwrap();
        host.attach(&surface, &OverlayStyle::overlay(5)).unwrap();
        assert_eq!(host.attached_count(), 1);
        assert_eq!(host.attached_styles()[0].z_index, 5);

        host.detach(&surface).unwrap();
        assert_eq!(host.attached_count(), 0);
        assert!(matches!(
            host.detach(&surface),
            Err(ConfettiError::SurfaceNotAttached(_))
        ));
    }

    #[test]
    fn resize_notifies_listeners() {
        let host = HeadlessHost::new(Viewport::new(100.0, 100.0, 1.0));
        let seen = Rc::new(Cell::new(0.0));
        let sink = seen.clone();
        let id = host.add_resize_listener(Rc::new(move |vp: Viewport| sink.set(vp.width)));

        host.resize(Viewport::new(320.0, 200.0, 1.0));
        assert_eq!(seen.get(), 320.0);
        assert_eq!(host.viewport().unwrap().width, 320.0);

        host.remove_resize_listener(id).unwrap();
        assert!(host.remove_resize_listener(id).is_err());
        host.resize(Viewport::new(10.0, 10.0, 1.0));
        assert_eq!(seen.get(), 320.0);
    }

    #[test]
    fn no_document_creates_nothing() {
        let host = HeadlessHost::without_document();
        assert!(host.viewport().is_none());
        assert!(host.create_surface().is_none());
        assert_eq!(host.created_count(), 0);
    }

    #[test]
    fn listener_may_query_host() {
        let host = Rc::new(HeadlessHost::new(Viewport::new(50.0, 50.0, 1.0)));
        let weak = Rc::downgrade(&host);
        let seen = Rc::new(Cell::new(0.0));
        let sink = seen.clone();
        host.add_resize_listener(Rc::new(move |_| {
            if let Some(h) = weak.upgrade() {
                sink.set(h.viewport().map(|v| v.height).unwrap_or(0.0));
            }
        }));
        host.resize(Viewport::new(50.0, 75.0, 1.0));
        assert_eq!(seen.get(), 75.0);
    }
}
