//! Canvas2D surface.
//!
//! Forwards `DrawSurface` calls to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`.

use painter_core::{ConfigurationError, DrawSurface, PencilState, Segment};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2d context of `canvas`.
    pub fn new(canvas: HtmlCanvasElement, id: &str) -> Result<Self, ConfigurationError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| ConfigurationError::ContextUnavailable { id: id.to_string() })?;
        Ok(Self { canvas, ctx })
    }
}

impl DrawSurface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn fill_background(&mut self, fill: &str) {
        // Isolated so a translucent pencil never bleeds into the fill.
        self.ctx.save();
        self.ctx.set_global_alpha(1.0);
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(fill);
        self.ctx
            .fill_rect(0.0, 0.0, self.width() as f64, self.height() as f64);
        self.ctx.restore();
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width() as f64, self.height() as f64);
    }

    fn stroke_segment(&mut self, segment: Segment, pencil: &PencilState) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.set_global_alpha(pencil.opacity);
        ctx.move_to(segment.from.x as f64, segment.from.y as f64);
        ctx.line_to(segment.to.x as f64, segment.to.y as f64);
        ctx.set_line_cap("round");
        ctx.set_line_width(pencil.size);
        ctx.set_stroke_style_str(&pencil.color);
        ctx.stroke();
    }
}
