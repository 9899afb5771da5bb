//! Confetti Raster - CPU rendering environment
//!
//! Provides a headless host so bursts can run without a window:
//! - `RasterContext` - `DrawContext` over an RGBA8 buffer with an affine transform stack
//! - `RasterSurface` - a resizable backing store handing out contexts
//! - `HeadlessHost` - simulated document, viewport and resize events
//! - `save_png` - write a surface to disk

mod canvas;
mod export;
mod headless;
mod surface;

pub use canvas::RasterContext;
pub use export::save_png;
pub use headless::HeadlessHost;
pub use surface::RasterSurface;
