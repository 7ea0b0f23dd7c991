//! Scene edits: the only way tools and the editor change the scene.
//!
//! Each edit can report whether it would change anything before it is
//! applied, so the history never records a checkpoint for a no-op.

use ink_core::model::{Scene, Stroke, TextItem, TextRef};
use ink_core::store::SceneStore;
use kurbo::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneEdit {
    AddStroke(Stroke),
    /// Remove every stroke whose start point lies strictly inside the
    /// axis-aligned box of half-width `radius` around `center`.
    EraseNear { center: Point, radius: f64 },
    AddText(TextItem),
    UpdateText { target: TextRef, text: String },
    RemoveText(TextRef),
    Clear,
}

impl SceneEdit {
    pub fn description(&self) -> &'static str {
        match self {
            SceneEdit::AddStroke(_) => "draw",
            SceneEdit::EraseNear { .. } => "erase",
            SceneEdit::AddText(_) => "add text",
            SceneEdit::UpdateText { .. } => "edit text",
            SceneEdit::RemoveText(_) => "delete text",
            SceneEdit::Clear => "clear",
        }
    }

    /// Whether applying this edit to `scene` would change it.
    pub fn changes(&self, scene: &Scene) -> bool {
        match self {
            SceneEdit::AddStroke(_) | SceneEdit::AddText(_) => true,
            SceneEdit::EraseNear { center, radius } => scene
                .strokes
                .iter()
                .any(|s| erases(s, *center, *radius)),
            SceneEdit::UpdateText { target, text } => {
                scene.text(*target).is_some_and(|item| item.text != *text)
            }
            SceneEdit::RemoveText(target) => scene.text(*target).is_some(),
            SceneEdit::Clear => !scene.is_empty(),
        }
    }

    /// Apply to the store. Returns whether the scene changed.
    pub fn apply(self, store: &mut SceneStore) -> bool {
        match self {
            SceneEdit::AddStroke(stroke) => {
                store.add_stroke(stroke);
                true
            }
            SceneEdit::EraseNear { center, radius } => {
                store.remove_strokes_where(|s| erases(s, center, radius)) > 0
            }
            SceneEdit::AddText(item) => {
                store.add_text(item);
                true
            }
            SceneEdit::UpdateText { target, text } => store.update_text(target, text),
            SceneEdit::RemoveText(target) => store.remove_text(target).is_some(),
            SceneEdit::Clear => {
                let had_content = !store.scene().is_empty();
                store.clear();
                had_content
            }
        }
    }
}

/// Eraser test: only the stroke's start point counts.
pub fn erases(stroke: &Stroke, center: Point, radius: f64) -> bool {
    (stroke.start_x - center.x).abs() < radius && (stroke.start_y - center.y).abs() < radius
}
