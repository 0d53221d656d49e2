//! Integration tests: pointer sessions driven through `Painter` onto a
//! `RasterSurface`, checking track state and the pixels that change.

use painter_core::{
    DrawSurface, Painter, Point, PointerEvent, RasterSurface, SurfaceOrigin, resolve_coordinates,
};
use pretty_assertions::assert_eq;

const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;
const BACKGROUND: [u8; 4] = [245, 245, 245, 255];

const ORIGIN: SurfaceOrigin = SurfaceOrigin {
    left: 120.0,
    top: 80.0,
};

fn make_painter() -> Painter<RasterSurface> {
    let _ = env_logger::builder().is_test(true).try_init();
    Painter::new(RasterSurface::default(), WIDTH, HEIGHT)
}

fn client(x: f64, y: f64) -> (f64, f64) {
    (ORIGIN.left + x, ORIGIN.top + y)
}

fn changed_pixels(painter: &Painter<RasterSurface>) -> Vec<(u32, u32)> {
    let surface = painter.surface();
    let mut out = Vec::new();
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if surface.pixel(x, y) != Some(BACKGROUND) {
                out.push((x, y));
            }
        }
    }
    out
}

// ─── Track lifecycle ─────────────────────────────────────────────────────

#[test]
fn track_is_unset_before_and_after_a_stroke() {
    let mut painter = make_painter();
    assert_eq!(painter.last_point(), None);

    let (x, y) = client(10.0, 10.0);
    painter.handle_pointer(&PointerEvent::down(x, y, 0), ORIGIN);
    assert_eq!(painter.last_point(), Some(Point::new(10, 10)));

    for step in 1..=5 {
        let (x, y) = client(10.0 + step as f64 * 4.0, 10.0);
        painter.handle_pointer(&PointerEvent::moved(x, y, Some(1)), ORIGIN);
    }
    assert_eq!(painter.last_point(), Some(Point::new(30, 10)));

    let (x, y) = client(30.0, 10.0);
    painter.handle_pointer(&PointerEvent::up(x, y), ORIGIN);
    assert_eq!(painter.last_point(), None);
}

#[test]
fn next_stroke_does_not_connect_to_previous() {
    let mut painter = make_painter();

    let (x, y) = client(5.0, 5.0);
    painter.handle_pointer(&PointerEvent::down(x, y, 0), ORIGIN);
    painter.handle_pointer(&PointerEvent::up(x, y), ORIGIN);

    let (x, y) = client(50.0, 40.0);
    painter.handle_pointer(&PointerEvent::down(x, y, 0), ORIGIN);

    // Midpoint between the two dots stays untouched.
    assert_eq!(painter.surface().pixel(27, 22), Some(BACKGROUND));
}

#[test]
fn moves_without_primary_mask_are_ignored() {
    let mut painter = make_painter();
    for buttons in [None, Some(0), Some(2), Some(3), Some(4)] {
        let (x, y) = client(20.0, 20.0);
        assert!(!painter.handle_pointer(&PointerEvent::moved(x, y, buttons), ORIGIN));
    }
    assert_eq!(painter.last_point(), None);
    assert!(changed_pixels(&painter).is_empty());
}

// ─── Button filtering ────────────────────────────────────────────────────

#[test]
fn non_primary_down_never_starts_a_stroke() {
    let mut painter = make_painter();
    for button in [1, 2, 3, 4] {
        let (x, y) = client(20.0, 20.0);
        assert!(!painter.handle_pointer(&PointerEvent::down(x, y, button), ORIGIN));
        assert_eq!(painter.last_point(), None);
    }
    assert!(changed_pixels(&painter).is_empty());
}

// ─── Pixels ──────────────────────────────────────────────────────────────

#[test]
fn segment_only_touches_its_footprint() {
    let mut painter = make_painter();
    painter.set_color("#ff0000");
    painter.set_size("4").unwrap();
    painter.set_opacity("1").unwrap();

    painter.draw(Point::new(10, 20));
    painter.draw(Point::new(40, 20));

    let changed = changed_pixels(&painter);
    assert!(!changed.is_empty());
    for (x, y) in &changed {
        let (px, py) = (*x as f64 + 0.5, *y as f64 + 0.5);
        let cx = px.clamp(10.0, 40.0);
        let dist = ((px - cx).powi(2) + (py - 20.0).powi(2)).sqrt();
        assert!(dist <= 2.0, "pixel ({x}, {y}) is outside the stroke");
        assert_eq!(painter.surface().pixel(*x, *y), Some([255, 0, 0, 255]));
    }

    // Round caps reach past both endpoints along the axis.
    assert!(changed.contains(&(8, 19)));
    assert!(changed.contains(&(41, 20)));
}

#[test]
fn translucent_stroke_blends_with_background() {
    let mut painter = make_painter();
    painter.set_color("#000000");
    painter.set_opacity("0.5").unwrap();
    painter.draw(Point::new(30, 30));

    let [r, g, b, a] = painter.surface().pixel(30, 30).unwrap();
    assert_eq!(a, 255);
    assert!((r as i32 - 123).abs() <= 1, "got {r}");
    assert_eq!((r, g), (g, b));
}

#[test]
fn single_click_draws_a_dot() {
    let mut painter = make_painter();
    let (x, y) = client(32.9, 24.2);
    painter.handle_pointer(&PointerEvent::down(x, y, 0), ORIGIN);
    assert_eq!(painter.surface().pixel(32, 24), Some([0, 0, 0, 255]));
}

// ─── Clear / preview ─────────────────────────────────────────────────────

#[test]
fn clear_restores_pristine_surface() {
    let fresh = make_painter().surface().snapshot();

    let mut painter = make_painter();
    painter.set_size("9").unwrap();
    painter.draw(Point::new(3, 3));
    painter.draw(Point::new(60, 44));
    assert_ne!(painter.surface().snapshot(), fresh);

    painter.clear();
    assert_eq!(painter.surface().snapshot(), fresh);
    assert_eq!(
        painter.surface().encode_png().unwrap(),
        make_painter().surface().encode_png().unwrap()
    );
}

// ─── Coordinates ─────────────────────────────────────────────────────────

#[test]
fn coordinates_truncate() {
    let (x, y) = client(12.7, 5.4);
    assert_eq!(resolve_coordinates(x, y, ORIGIN), Point::new(12, 5));
}
