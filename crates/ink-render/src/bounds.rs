//! Text measurement and the one bounding-box formula shared by hit
//! testing and outline rendering.

use ink_core::model::TextItem;
use kurbo::{Point, Rect};

/// Measures rendered text width with the same metrics the renderer uses.
pub trait TextMeasure {
    /// Advance width of `text` set at `font_size` pixels in `family`.
    fn text_width(&self, text: &str, font_size: f64, family: &str) -> f64;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, font_size: f64, family: &str) -> f64 {
        (**self).text_width(text, font_size, family)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for Box<T> {
    fn text_width(&self, text: &str, font_size: f64, family: &str) -> f64 {
        (**self).text_width(text, font_size, family)
    }
}

/// Font-free estimate: every character advances `advance × font_size`.
///
/// Used when no real font backend is available (headless sessions, tests).
#[derive(Debug, Clone, Copy)]
pub struct ApproxMeasure {
    pub advance: f64,
}

impl Default for ApproxMeasure {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for ApproxMeasure {
    fn text_width(&self, text: &str, font_size: f64, _family: &str) -> f64 {
        text.chars().count() as f64 * font_size * self.advance
    }
}

/// CSS font shorthand, e.g. `16px Arial`.
pub fn font_spec(size_px: f64, family: &str) -> String {
    format!("{size_px}px {family}")
}

/// World-space box of a text item.
///
/// Starts at the anchor and extends right by the measured width and up
/// by `line_height_factor × font_size` (the anchor is the baseline).
pub fn text_bounds(item: &TextItem, measure: &dyn TextMeasure, line_height_factor: f64) -> Rect {
    let width = measure
        .text_width(&item.text, item.font_size, &item.font_family)
        .max(0.0);
    let height = item.font_size * line_height_factor;
    Rect::new(item.x, item.y - height, item.x + width, item.y)
}

/// Edge-inclusive containment (kurbo's `Rect::contains` is half-open).
pub fn contains_inclusive(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}
