//! Hit testing: world point → text item lookup.
//!
//! Walks the text sequence in insertion order; the first item whose
//! bounds contain the point wins, so earlier labels take precedence
//! where boxes overlap.

use ink_core::model::{Scene, TextRef};
use kurbo::Point;

use crate::bounds::{TextMeasure, contains_inclusive, text_bounds};

/// Find the first text item at world position `p`.
/// Returns `None` if the point is over empty canvas or ink only.
pub fn find_text_at(
    scene: &Scene,
    p: Point,
    measure: &dyn TextMeasure,
    line_height_factor: f64,
) -> Option<TextRef> {
    scene
        .texts
        .iter()
        .position(|item| contains_inclusive(text_bounds(item, measure, line_height_factor), p))
        .map(TextRef::new)
}
