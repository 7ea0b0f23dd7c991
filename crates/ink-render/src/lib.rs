//! Surface-agnostic rendering for Inkboard scenes.
//!
//! Text bounds live here rather than in the editor so that hit testing
//! and outline drawing share one formula.

pub mod bounds;
pub mod hit;
pub mod paint;
pub mod record;
pub mod surface;

pub use bounds::{ApproxMeasure, TextMeasure, text_bounds};
pub use hit::find_text_at;
pub use paint::{CanvasTheme, RenderOptions, render_scene};
pub use surface::{LineCap, Surface};
