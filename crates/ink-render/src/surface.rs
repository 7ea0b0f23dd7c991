//! Drawing backend abstraction.
//!
//! The renderer only needs a handful of immediate-mode primitives, all in
//! screen pixels. The browser bridge implements this over
//! `CanvasRenderingContext2d`; [`crate::record::RecordingSurface`] keeps
//! the calls for inspection.

use kurbo::{Point, Rect};

use crate::bounds::TextMeasure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

impl LineCap {
    pub fn as_css(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

pub trait Surface: TextMeasure {
    /// Wipe the whole surface and paint the background.
    fn clear(&mut self, width: f64, height: f64, background: &str);

    fn draw_line(&mut self, from: Point, to: Point, color: &str, width: f64, cap: LineCap);

    /// Fill `text` with its alphabetic baseline starting at `at`.
    fn fill_text(&mut self, text: &str, at: Point, font_px: f64, family: &str, color: &str);

    fn stroke_rect(&mut self, rect: Rect, color: &str, width: f64);
}
