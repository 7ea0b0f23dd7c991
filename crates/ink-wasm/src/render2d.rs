//! Canvas2D drawing backend.
//!
//! Implements the renderer's `Surface` over an HTML `<canvas>` context.
//! Text is measured with the same context so hit boxes match the glyphs
//! actually drawn.

use ink_render::bounds::{ApproxMeasure, font_spec};
use ink_render::{LineCap, Surface, TextMeasure};
use kurbo::{Point, Rect};
use web_sys::CanvasRenderingContext2d;

/// Borrowed context for one frame.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for CanvasSurface<'_> {
    fn text_width(&self, text: &str, font_size: f64, family: &str) -> f64 {
        measure(self.ctx, text, font_size, family)
    }
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64, background: &str) {
        let ctx = self.ctx;
        ctx.clear_rect(0.0, 0.0, width, height);
        ctx.set_fill_style_str(background);
        ctx.fill_rect(0.0, 0.0, width, height);
        let _ = ctx.set_line_dash(&js_sys::Array::new());
    }

    fn draw_line(&mut self, from: Point, to: Point, color: &str, width: f64, cap: LineCap) {
        let ctx = self.ctx;
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width);
        ctx.set_line_cap(cap.as_css());
        ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Point, font_px: f64, family: &str, color: &str) {
        let ctx = self.ctx;
        ctx.set_fill_style_str(color);
        ctx.set_font(&font_spec(font_px, family));
        ctx.set_text_baseline("alphabetic");
        let _ = ctx.fill_text(text, at.x, at.y);
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, width: f64) {
        let ctx = self.ctx;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width);
        ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }
}

/// Owned context handle used by the editor for hit testing between frames.
pub struct CanvasMeasure {
    ctx: CanvasRenderingContext2d,
}

impl CanvasMeasure {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for CanvasMeasure {
    fn text_width(&self, text: &str, font_size: f64, family: &str) -> f64 {
        measure(&self.ctx, text, font_size, family)
    }
}

fn measure(ctx: &CanvasRenderingContext2d, text: &str, font_size: f64, family: &str) -> f64 {
    ctx.set_font(&font_spec(font_size, family));
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => {
            log::warn!("measureText failed, estimating width");
            ApproxMeasure::default().text_width(text, font_size, family)
        }
    }
}
