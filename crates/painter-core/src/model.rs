//! Drawing state: colors, points, pencil settings and the pointer track.
//!
//! Everything here is plain data owned by a single [`crate::Painter`].
//! Surfaces read it; only the painter mutates it.

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Named colors the pencil input is likely to produce by hand.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("green", "#008000"),
    ("lime", "#00ff00"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("cyan", "#00ffff"),
    ("magenta", "#ff00ff"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("whitesmoke", "#f5f5f5"),
    ("lightslategray", "#778899"),
    ("transparent", "#00000000"),
];

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Parse the CSS color forms a text input realistically holds:
    /// hex, `rgb(...)`/`rgba(...)` and a handful of named colors.
    pub fn from_css(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            return Self::from_hex(value);
        }

        let lower = value.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::from_rgb_args(args);
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .and_then(|(_, hex)| Self::from_hex(hex))
    }

    fn from_rgb_args(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args
            .split([',', ' ', '/'])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }

        let channel = |s: &str| -> Option<f32> {
            let v = match s.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? / 100.0 * 255.0,
                None => s.parse::<f32>().ok()?,
            };
            Some(v.clamp(0.0, 255.0) / 255.0)
        };
        let alpha = |s: &str| -> Option<f32> {
            let v = match s.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? / 100.0,
                None => s.parse::<f32>().ok()?,
            };
            Some(v.clamp(0.0, 1.0))
        };

        let a = match parts.get(3) {
            Some(s) => alpha(s)?,
            None => 1.0,
        };
        Some(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            a,
        ))
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Emit as `#RRGGBB` or `#RRGGBBAA` when alpha is not opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// An integer position in surface-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One straight stroke between two points. `from == to` renders as a dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn is_dot(&self) -> bool {
        self.from == self.to
    }
}

// ─── Pencil ──────────────────────────────────────────────────────────────

pub const DEFAULT_PENCIL_COLOR: &str = "#000000";
pub const DEFAULT_PENCIL_SIZE: f64 = 3.0;
pub const DEFAULT_PENCIL_OPACITY: f64 = 1.0;

/// The settings applied to every new segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PencilState {
    /// CSS color value, stored exactly as the control delivered it.
    pub color: String,
    /// Stroke width in pixels.
    pub size: f64,
    /// Global alpha in [0, 1].
    pub opacity: f64,
}

impl Default for PencilState {
    fn default() -> Self {
        Self {
            color: DEFAULT_PENCIL_COLOR.to_string(),
            size: DEFAULT_PENCIL_SIZE,
            opacity: DEFAULT_PENCIL_OPACITY,
        }
    }
}

// ─── Pointer track ───────────────────────────────────────────────────────

/// The last drawn point. `None` between strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerTrack {
    last: Option<Point>,
}

impl PointerTrack {
    pub fn last(&self) -> Option<Point> {
        self.last
    }

    pub fn is_set(&self) -> bool {
        self.last.is_some()
    }

    /// Build the segment ending at `to` and advance the track to it.
    pub fn advance(&mut self, to: Point) -> Segment {
        let from = self.last.unwrap_or(to);
        self.last = Some(to);
        Segment { from, to }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_forms_parse() {
        assert_eq!(Color::from_hex("#000").unwrap().to_hex(), "#000000");
        assert_eq!(Color::from_hex("#6C5CE7").unwrap().to_hex(), "#6c5ce7");
        let half = Color::from_hex("#FF000080").unwrap();
        assert!((half.a - 128.0 / 255.0).abs() < 0.01);
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#zzz").is_none());
    }

    #[test]
    fn css_functional_and_named() {
        assert_eq!(
            Color::from_css("rgb(255, 0, 0)").unwrap().to_rgba8(),
            [255, 0, 0, 255]
        );
        assert_eq!(
            Color::from_css("rgba(0 0 255 / 50%)").unwrap().to_rgba8(),
            [0, 0, 255, 128]
        );
        assert_eq!(Color::from_css("WhiteSmoke").unwrap().to_hex(), "#f5f5f5");
        assert!(Color::from_css("not-a-color").is_none());
        assert!(Color::from_css("rgb(1, 2)").is_none());
    }

    #[test]
    fn first_advance_is_a_dot() {
        let mut track = PointerTrack::default();
        let seg = track.advance(Point::new(4, 9));
        assert!(seg.is_dot());
        assert_eq!(track.last(), Some(Point::new(4, 9)));

        let seg = track.advance(Point::new(10, 9));
        assert_eq!(seg.from, Point::new(4, 9));
        assert_eq!(seg.to, Point::new(10, 9));
    }

    #[test]
    fn reset_unsets_track() {
        let mut track = PointerTrack::default();
        track.advance(Point::new(1, 1));
        track.reset();
        assert!(!track.is_set());
    }

    #[test]
    fn origin_is_a_real_point() {
        // (0, 0) must connect like any other tracked point.
        let mut track = PointerTrack::default();
        track.advance(Point::new(0, 0));
        let seg = track.advance(Point::new(5, 5));
        assert_eq!(seg.from, Point::new(0, 0));
    }

    #[test]
    fn pencil_defaults() {
        let pencil = PencilState::default();
        assert_eq!(pencil.color, "#000000");
        assert_eq!(pencil.size, 3.0);
        assert_eq!(pencil.opacity, 1.0);
    }
}
