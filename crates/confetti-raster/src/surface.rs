//! Resizable RGBA backing store

use crate::canvas::RasterContext;
use confetti_core::HostSurface;
use image::RgbaImage;
use std::cell::RefCell;
use std::rc::Rc;

/// Pixel storage shared between a surface and its contexts
pub(crate) struct Backing {
    pub image: RgbaImage,
    /// Bumped on every resize so contexts know to reset their state
    pub generation: u64,
}

/// An offscreen surface. Clones share the same pixels.
#[derive(Clone)]
pub struct RasterSurface {
    id: u64,
    backing: Rc<RefCell<Backing>>,
    context_available: bool,
}

impl RasterSurface {
    pub fn new(id: u64, width: u32, height: u32) -> Self {
        Self {
            id,
            backing: Rc::new(RefCell::new(Backing {
                image: RgbaImage::new(width, height),
                generation: 0,
            })),
            context_available: true,
        }
    }

    /// A surface whose `context_2d` always fails
    pub fn without_context(id: u64) -> Self {
        Self {
            context_available: false,
            ..Self::new(id, 0, 0)
        }
    }

    /// Copy of the current pixels
    pub fn snapshot(&self) -> RgbaImage {
        self.backing.borrow().image.clone()
    }

    /// Number of pixels with non-zero alpha
    pub fn painted_pixels(&self) -> usize {
        self.backing
            .borrow()
            .image
            .pixels()
            .filter(|p| p.0[3] > 0)
            .count()
    }
}

impl HostSurface for RasterSurface {
    type Context = RasterContext;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_pixel_size(&mut self, width: u32, height: u32) {
        let mut backing = self.backing.borrow_mut();
        backing.image = RgbaImage::new(width, height);
        backing.generation += 1;
    }

    fn pixel_size(&self) -> (u32, u32) {
        self.backing.borrow().image.dimensions()
    }

    fn context_2d(&mut self) -> Option<RasterContext> {
        self.context_available
            .then(|| RasterContext::new(Rc::clone(&self.backing)))
    }
}
