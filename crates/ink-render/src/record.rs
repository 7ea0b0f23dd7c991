//! A surface that records draw calls instead of rasterizing them.
//!
//! Lets headless hosts and tests inspect exactly what a frame would draw.

use kurbo::{Point, Rect};

use crate::bounds::{ApproxMeasure, TextMeasure};
use crate::surface::{LineCap, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear {
        width: f64,
        height: f64,
        background: String,
    },
    Line {
        from: Point,
        to: Point,
        color: String,
        width: f64,
        cap: LineCap,
    },
    Text {
        text: String,
        at: Point,
        font_px: f64,
        family: String,
        color: String,
    },
    Outline {
        rect: Rect,
        color: String,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    measure: ApproxMeasure,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measure(measure: ApproxMeasure) -> Self {
        Self {
            ops: Vec::new(),
            measure,
        }
    }

    /// Lines drawn with the given cap (ruling uses butt caps, ink round).
    pub fn lines(&self, cap: LineCap) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { cap: c, .. } if *c == cap))
            .collect()
    }

    pub fn texts(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
            .collect()
    }

    pub fn outlines(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Outline { .. }))
            .collect()
    }
}

impl TextMeasure for RecordingSurface {
    fn text_width(&self, text: &str, font_size: f64, family: &str) -> f64 {
        self.measure.text_width(text, font_size, family)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64, background: &str) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear {
            width,
            height,
            background: background.to_string(),
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: &str, width: f64, cap: LineCap) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color: color.to_string(),
            width,
            cap,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, font_px: f64, family: &str, color: &str) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            font_px,
            family: family.to_string(),
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, _width: f64) {
        self.ops.push(DrawOp::Outline {
            rect,
            color: color.to_string(),
        });
    }
}
