//! Editor tuning knobs and persisted view toggles.

use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_FONT_FAMILY;

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for an editor session.
///
/// Every field has a default, so a host may deserialize a partial JSON
/// object (`{"zoomIncrement":0.25}`) and get sensible values for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Zoom step; one step multiplies the scale by `1 ± zoom_increment`.
    /// Default: **0.1**.
    pub zoom_increment: f64,

    /// Lower bound on the view scale. Default: **0.1**.
    pub min_scale: f64,

    /// Maximum number of undo entries kept. Default: **200**.
    pub history_depth: usize,

    /// World-space distance between ruling lines. Default: **35**.
    pub ruling_interval: f64,

    /// Text box height as a multiple of font size. Default: **1.2**.
    pub line_height_factor: f64,

    /// Family given to newly placed text. Default: **Arial**.
    pub default_font_family: String,

    pub default_stroke_width: f64,
    pub default_font_size: f64,
    pub default_eraser_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom_increment: 0.1,
            min_scale: 0.1,
            history_depth: 200,
            ruling_interval: 35.0,
            line_height_factor: 1.2,
            default_font_family: DEFAULT_FONT_FAMILY.to_string(),
            default_stroke_width: 2.0,
            default_font_size: 16.0,
            default_eraser_size: 10.0,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config, falling back to defaults on malformed input.
    /// Out-of-range fields fall back individually.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(config) => config.validated(),
            Err(e) => {
                log::warn!("invalid editor config, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Replace every out-of-range field with its default.
    ///
    /// Sizes must be positive so that new strokes and labels are well
    /// formed; `zoom_increment` must lie in `(0, 1)` so both zoom
    /// directions change the scale.
    pub fn validated(self) -> Self {
        let fallback = Self::default();
        Self {
            zoom_increment: in_unit_interval("zoomIncrement", self.zoom_increment)
                .unwrap_or(fallback.zoom_increment),
            min_scale: positive("minScale", self.min_scale).unwrap_or(fallback.min_scale),
            history_depth: if self.history_depth == 0 {
                log::warn!("config historyDepth 0 out of range, using default");
                fallback.history_depth
            } else {
                self.history_depth
            },
            ruling_interval: positive("rulingInterval", self.ruling_interval)
                .unwrap_or(fallback.ruling_interval),
            line_height_factor: positive("lineHeightFactor", self.line_height_factor)
                .unwrap_or(fallback.line_height_factor),
            default_font_family: if self.default_font_family.trim().is_empty() {
                log::warn!("config defaultFontFamily is blank, using default");
                fallback.default_font_family
            } else {
                self.default_font_family
            },
            default_stroke_width: positive("defaultStrokeWidth", self.default_stroke_width)
                .unwrap_or(fallback.default_stroke_width),
            default_font_size: positive("defaultFontSize", self.default_font_size)
                .unwrap_or(fallback.default_font_size),
            default_eraser_size: positive("defaultEraserSize", self.default_eraser_size)
                .unwrap_or(fallback.default_eraser_size),
        }
    }
}

fn positive(field: &str, value: f64) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        log::warn!("config {field} {value} out of range, using default");
        None
    }
}

fn in_unit_interval(field: &str, value: f64) -> Option<f64> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Some(value)
    } else {
        log::warn!("config {field} {value} out of range, using default");
        None
    }
}

// ─── View settings ────────────────────────────────────────────────────────

/// Presentation toggles persisted outside the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewSettings {
    /// Draw notebook ruling behind the scene.
    pub notebook: bool,
    pub dark_mode: bool,
}

impl ViewSettings {
    /// Ink color matching the theme: light ink on dark paper and vice versa.
    pub fn default_ink(&self) -> &'static str {
        if self.dark_mode { "#ffffff" } else { "#000000" }
    }
}
