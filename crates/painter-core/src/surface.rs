//! The drawing surface seam.
//!
//! `Painter` only ever talks to a `DrawSurface`. The browser bridge backs it
//! with a `CanvasRenderingContext2d`; headless code and tests use
//! [`crate::raster::RasterSurface`].

use crate::model::{PencilState, Segment};

pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Set the pixel dimensions. Existing content may be discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Paint `fill` over the whole surface.
    fn fill_background(&mut self, fill: &str);

    /// Erase every pixel to transparent.
    fn clear(&mut self);

    /// Stroke one straight segment with round caps using the pencil's
    /// color, width and opacity.
    fn stroke_segment(&mut self, segment: Segment, pencil: &PencilState);
}
