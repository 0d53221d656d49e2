//! Software RGBA surface.
//!
//! Renders segments the way a 2D canvas does (round caps, one blend per
//! stroke, `globalAlpha` applied on top of the color alpha) but with
//! hard-edged coverage: a pixel is painted when its center lies within
//! `size / 2` of the segment.

use crate::error::Result;
use crate::model::{Color, PencilState, Segment};
use crate::surface::DrawSurface;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// A copy of the surface pixels, row-major RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSnapshot {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    /// Color used when the pencil holds something unparseable; a canvas
    /// keeps its previous `strokeStyle` in that case.
    stroke_color: Color,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            stroke_color: Color::BLACK,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    pub fn snapshot(&self) -> RasterSnapshot {
        RasterSnapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }

    /// Encode the current pixels as a PNG file.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let image = RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or_else(
            || {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            },
        )?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn blend(&mut self, x: u32, y: u32, src: [f32; 4]) {
        let i = self.offset(x, y);
        let dst = &mut self.pixels[i..i + 4];
        let sa = src[3];
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            dst.copy_from_slice(&[0, 0, 0, 0]);
            return;
        }
        for c in 0..3 {
            let dc = dst[c] as f32 / 255.0;
            let out = (src[c] * sa + dc * da * (1.0 - sa)) / out_a;
            dst[c] = (out.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        dst[3] = (out_a.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

impl DrawSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize * 4];
    }

    fn fill_background(&mut self, fill: &str) {
        let Some(color) = Color::from_css(fill) else {
            log::warn!("ignoring unparseable background fill `{fill}`");
            return;
        };
        let src = [color.r, color.g, color.b, color.a];
        for y in 0..self.height {
            for x in 0..self.width {
                self.blend(x, y, src);
            }
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn stroke_segment(&mut self, segment: Segment, pencil: &PencilState) {
        match Color::from_css(&pencil.color) {
            Some(color) => self.stroke_color = color,
            None => log::warn!(
                "unparseable pencil color `{}`, keeping {}",
                pencil.color,
                self.stroke_color.to_hex()
            ),
        }
        if !(pencil.size.is_finite() && pencil.size > 0.0) {
            return;
        }
        if !(0.0..=1.0).contains(&pencil.opacity) {
            return;
        }

        let c = self.stroke_color;
        let src = [c.r, c.g, c.b, c.a * pencil.opacity as f32];
        let radius = pencil.size / 2.0;
        let (ax, ay) = (segment.from.x as f64, segment.from.y as f64);
        let (bx, by) = (segment.to.x as f64, segment.to.y as f64);

        let min_x = (ax.min(bx) - radius).floor().max(0.0);
        let min_y = (ay.min(by) - radius).floor().max(0.0);
        let max_x = (ax.max(bx) + radius).ceil().min(self.width as f64 - 1.0);
        let max_y = (ay.max(by) + radius).ceil().min(self.height as f64 - 1.0);
        if max_x < min_x || max_y < min_y {
            return;
        }

        for y in min_y as u32..=max_y as u32 {
            for x in min_x as u32..=max_x as u32 {
                let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                if distance_to_segment(px, py, ax, ay, bx, by) <= radius {
                    self.blend(x, y, src);
                }
            }
        }
    }
}

fn distance_to_segment(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}
