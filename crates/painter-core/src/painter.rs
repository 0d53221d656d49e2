//! The surface controller.
//!
//! `Painter` owns the pencil settings, the pointer track and the surface.
//! Hosts feed it normalized pointer events and control values; it turns
//! them into stroke segments.

use crate::config::BACKGROUND_FILL;
use crate::error::PencilError;
use crate::input::{PointerEvent, PointerKind, SurfaceOrigin};
use crate::model::{PencilState, Point, PointerTrack, Segment};
use crate::surface::DrawSurface;

pub struct Painter<S: DrawSurface> {
    surface: S,
    width: u32,
    height: u32,
    pencil: PencilState,
    track: PointerTrack,
}

impl<S: DrawSurface> Painter<S> {
    /// Size the surface and paint the initial background.
    pub fn new(mut surface: S, width: u32, height: u32) -> Self {
        surface.resize(width, height);
        surface.fill_background(BACKGROUND_FILL);
        log::debug!("painter ready on {width}x{height} surface");
        Self {
            surface,
            width,
            height,
            pencil: PencilState::default(),
            track: PointerTrack::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pencil(&self) -> &PencilState {
        &self.pencil
    }

    pub fn last_point(&self) -> Option<Point> {
        self.track.last()
    }

    /// True between a stroke's first segment and its finish.
    pub fn is_drawing(&self) -> bool {
        self.track.is_set()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    // ─── Pointer handling ────────────────────────────────────────────────

    /// Dispatch one pointer event. Returns `true` if a segment was drawn.
    pub fn handle_pointer(&mut self, event: &PointerEvent, origin: SurfaceOrigin) -> bool {
        match event.kind {
            PointerKind::Down | PointerKind::Move => {
                if !event.starts_or_continues_stroke() {
                    return false;
                }
                self.draw(event.local_point(origin));
                true
            }
            PointerKind::Up | PointerKind::Leave => {
                self.finish();
                false
            }
        }
    }

    /// Stroke from the tracked point (or `to` itself) to `to`.
    pub fn draw(&mut self, to: Point) {
        let segment: Segment = self.track.advance(to);
        log::trace!(
            "SEGMENT ({}, {}) -> ({}, {}) {} w={} a={}",
            segment.from.x,
            segment.from.y,
            segment.to.x,
            segment.to.y,
            self.pencil.color,
            self.pencil.size,
            self.pencil.opacity
        );
        self.surface.stroke_segment(segment, &self.pencil);
    }

    /// End the current stroke so the next draw starts fresh.
    pub fn finish(&mut self) {
        self.track.reset();
    }

    // ─── Side actions ────────────────────────────────────────────────────

    /// Erase all content and repaint the background.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.surface.fill_background(BACKGROUND_FILL);
        log::debug!("surface cleared");
    }

    // ─── Pencil settings ─────────────────────────────────────────────────

    /// Replace the pencil color verbatim.
    pub fn set_color(&mut self, color: &str) {
        self.pencil.color = color.to_string();
    }

    /// Apply a size control value. Rejected values leave the size as is.
    pub fn set_size(&mut self, raw: &str) -> Result<(), PencilError> {
        match parse_number(raw) {
            Some(size) if size > 0.0 => {
                self.pencil.size = size;
                Ok(())
            }
            _ => {
                log::warn!("rejecting pencil size `{raw}`");
                Err(PencilError::InvalidSize(raw.to_string()))
            }
        }
    }

    /// Apply an opacity control value. Rejected values leave the opacity as is.
    pub fn set_opacity(&mut self, raw: &str) -> Result<(), PencilError> {
        match parse_number(raw) {
            Some(opacity) if (0.0..=1.0).contains(&opacity) => {
                self.pencil.opacity = opacity;
                Ok(())
            }
            _ => {
                log::warn!("rejecting pencil opacity `{raw}`");
                Err(PencilError::InvalidOpacity(raw.to_string()))
            }
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterSurface;
    use pretty_assertions::assert_eq;

    fn painter() -> Painter<RasterSurface> {
        Painter::new(RasterSurface::default(), 40, 30)
    }

    #[test]
    fn new_sizes_the_surface() {
        let p = painter();
        assert_eq!(p.surface().width(), 40);
        assert_eq!(p.surface().height(), 30);
        assert_eq!(p.surface().pixel(0, 0), Some([245, 245, 245, 255]));
    }

    #[test]
    fn size_accepts_numeric_strings() {
        let mut p = painter();
        p.set_size(" 12.5 ").unwrap();
        assert_eq!(p.pencil().size, 12.5);
    }

    #[test]
    fn size_rejects_garbage_and_non_positive() {
        let mut p = painter();
        for raw in ["", "abc", "0", "-3", "NaN", "inf"] {
            assert_eq!(
                p.set_size(raw),
                Err(PencilError::InvalidSize(raw.to_string()))
            );
        }
        assert_eq!(p.pencil().size, 3.0);
    }

    #[test]
    fn opacity_must_be_unit_interval() {
        let mut p = painter();
        p.set_opacity("0").unwrap();
        assert_eq!(p.pencil().opacity, 0.0);
        p.set_opacity("0.4").unwrap();
        assert!(p.set_opacity("1.5").is_err());
        assert!(p.set_opacity("-0.1").is_err());
        assert_eq!(p.pencil().opacity, 0.4);
    }

    #[test]
    fn color_is_taken_verbatim() {
        let mut p = painter();
        p.set_color("rebeccapurple");
        assert_eq!(p.pencil().color, "rebeccapurple");
    }

    #[test]
    fn leave_finishes_the_stroke() {
        let mut p = painter();
        let origin = SurfaceOrigin::default();
        assert!(p.handle_pointer(&PointerEvent::down(5.0, 5.0, 0), origin));
        assert!(p.is_drawing());
        assert!(!p.handle_pointer(&PointerEvent::leave(50.0, 5.0), origin));
        assert!(!p.is_drawing());
    }
}
