//! Core scene data model for Inkboard.
//!
//! A scene is two flat, ordered sequences in world space: ink strokes
//! (one short segment each) and text labels. Field names follow the
//! persisted JSON layout (`startX`, `fontSize`, ...), so the same types
//! are used in memory and in storage.

use kurbo::Point;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Font family used when a text item does not carry one.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

// ─── Stroke ──────────────────────────────────────────────────────────────

/// One straight ink segment recorded between two pointer samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    #[serde(deserialize_with = "lenient_f64")]
    pub start_x: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub start_y: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub end_x: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub end_y: f64,
    pub color: String,
    /// Line width in world units. Older saves call this `size`.
    #[serde(alias = "size", deserialize_with = "lenient_f64")]
    pub width: f64,
}

impl Stroke {
    pub fn new(start: Point, end: Point, color: impl Into<String>, width: f64) -> Self {
        Self {
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
            color: color.into(),
            width,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    /// Finite coordinates and a positive width.
    pub fn is_well_formed(&self) -> bool {
        [self.start_x, self.start_y, self.end_x, self.end_y]
            .iter()
            .all(|v| v.is_finite())
            && self.width.is_finite()
            && self.width > 0.0
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

/// A text label anchored at its baseline-left origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextItem {
    pub text: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub y: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub font_size: f64,
    pub font_color: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl TextItem {
    pub fn new(
        text: impl Into<String>,
        anchor: Point,
        font_size: f64,
        font_color: impl Into<String>,
        font_family: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            x: anchor.x,
            y: anchor.y,
            font_size,
            font_color: font_color.into(),
            font_family: font_family.into(),
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Non-blank content, finite anchor, positive font size.
    pub fn is_well_formed(&self) -> bool {
        !self.text.trim().is_empty()
            && self.x.is_finite()
            && self.y.is_finite()
            && self.font_size.is_finite()
            && self.font_size > 0.0
    }
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

/// Non-owning handle to a text item: its position in `Scene::texts`.
///
/// Only valid until the text sequence is reordered, shrunk, or replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRef(usize);

impl TextRef {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// Everything that was drawn, in world coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub strokes: Vec<Stroke>,
    pub texts: Vec<TextItem>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.texts.is_empty()
    }

    pub fn text(&self, r: TextRef) -> Option<&TextItem> {
        self.texts.get(r.index())
    }

    /// Drop entries that break the well-formedness invariant.
    /// Returns how many were removed.
    pub fn retain_well_formed(&mut self) -> usize {
        let before = self.strokes.len() + self.texts.len();
        self.strokes.retain(Stroke::is_well_formed);
        self.texts.retain(TextItem::is_well_formed);
        before - (self.strokes.len() + self.texts.len())
    }
}

// ─── Lenient numbers ─────────────────────────────────────────────────────

/// Form inputs hand sizes over as strings (`"2"`), so saved data may hold
/// either a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| de::Error::custom(format!("invalid number {s:?}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_json_uses_camel_case_fields() {
        let stroke = Stroke::new(Point::new(10.0, 10.0), Point::new(20.0, 20.0), "#000000", 2.0);
        let json = serde_json::to_string(&stroke).unwrap();
        assert_eq!(
            json,
            r##"{"startX":10.0,"startY":10.0,"endX":20.0,"endY":20.0,"color":"#000000","width":2.0}"##
        );
    }

    #[test]
    fn legacy_stroke_with_string_size() {
        let json = r##"{"startX":1,"startY":2,"endX":3,"endY":4,"color":"#ff0000","size":"5"}"##;
        let stroke: Stroke = serde_json::from_str(json).unwrap();
        assert_eq!(stroke.width, 5.0);
        assert_eq!(stroke.start(), Point::new(1.0, 2.0));
        assert_eq!(stroke.end(), Point::new(3.0, 4.0));
    }

    #[test]
    fn text_without_family_defaults_to_arial() {
        let json = r##"{"text":"hi","x":5,"y":6,"fontSize":"16","fontColor":"#000000"}"##;
        let item: TextItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.font_family, DEFAULT_FONT_FAMILY);
        assert_eq!(item.font_size, 16.0);
    }

    #[test]
    fn garbage_number_is_rejected() {
        let json = r##"{"text":"hi","x":"abc","y":6,"fontSize":16,"fontColor":"#000"}"##;
        assert!(serde_json::from_str::<TextItem>(json).is_err());
    }

    #[test]
    fn retain_well_formed_drops_blank_text_and_nan() {
        let mut scene = Scene::new();
        scene.texts.push(TextItem::new("  ", Point::ZERO, 16.0, "#000", "Arial"));
        scene.texts.push(TextItem::new("ok", Point::ZERO, 16.0, "#000", "Arial"));
        scene.strokes.push(Stroke::new(
            Point::new(f64::NAN, 0.0),
            Point::ZERO,
            "#000",
            2.0,
        ));
        assert_eq!(scene.retain_well_formed(), 2);
        assert_eq!(scene.texts.len(), 1);
        assert!(scene.strokes.is_empty());
    }
}
