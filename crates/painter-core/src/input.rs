//! Input abstraction layer.
//!
//! Normalizes browser mouse events into a `PointerEvent` the painter can
//! consume without touching the DOM.

use crate::model::Point;

/// `MouseEvent.button` value of the primary (usually left) button.
pub const PRIMARY_BUTTON: i16 = 0;

/// `MouseEvent.buttons` mask while only the primary button is held.
pub const PRIMARY_BUTTON_MASK: u16 = 1;

/// Screen-space top-left of the surface (`getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceOrigin {
    pub left: f64,
    pub top: f64,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

/// A normalized pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub client_x: f64,
    pub client_y: f64,
    /// Button that changed state (meaningful for `Down`).
    pub button: i16,
    /// Buttons currently held. `None` when the host did not report a mask.
    pub buttons: Option<u16>,
}

impl PointerEvent {
    pub fn down(client_x: f64, client_y: f64, button: i16) -> Self {
        Self {
            kind: PointerKind::Down,
            client_x,
            client_y,
            button,
            buttons: Some(button_mask(button)),
        }
    }

    pub fn moved(client_x: f64, client_y: f64, buttons: Option<u16>) -> Self {
        Self {
            kind: PointerKind::Move,
            client_x,
            client_y,
            button: PRIMARY_BUTTON,
            buttons,
        }
    }

    pub fn up(client_x: f64, client_y: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            client_x,
            client_y,
            button: PRIMARY_BUTTON,
            buttons: Some(0),
        }
    }

    pub fn leave(client_x: f64, client_y: f64) -> Self {
        Self {
            kind: PointerKind::Leave,
            client_x,
            client_y,
            button: PRIMARY_BUTTON,
            buttons: None,
        }
    }

    /// Whether this event should produce a segment.
    pub fn starts_or_continues_stroke(&self) -> bool {
        match self.kind {
            PointerKind::Down => self.button == PRIMARY_BUTTON,
            PointerKind::Move => self.buttons == Some(PRIMARY_BUTTON_MASK),
            PointerKind::Up | PointerKind::Leave => false,
        }
    }

    /// Surface-local position, truncated toward zero.
    pub fn local_point(&self, origin: SurfaceOrigin) -> Point {
        resolve_coordinates(self.client_x, self.client_y, origin)
    }
}

/// `buttons` bit for a `button` index. Secondary and auxiliary swap places.
fn button_mask(button: i16) -> u16 {
    match button {
        0 => 1,
        1 => 4,
        2 => 2,
        3 => 8,
        4 => 16,
        _ => 0,
    }
}

/// Subtract the surface origin and truncate (not round) to integer pixels.
pub fn resolve_coordinates(client_x: f64, client_y: f64, origin: SurfaceOrigin) -> Point {
    Point::new(
        truncate(client_x - origin.left),
        truncate(client_y - origin.top),
    )
}

fn truncate(v: f64) -> i32 {
    // `as` saturates and maps NaN to 0.
    v.trunc() as i32
}
