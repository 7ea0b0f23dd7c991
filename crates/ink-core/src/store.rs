//! Owner of the authoritative scene.
//!
//! Every entry point is a synchronous, total mutation. Checkpointing and
//! persisting around a mutation is the caller's job; the store never
//! touches history or storage itself.

use crate::model::{Scene, Stroke, TextItem, TextRef};

#[derive(Debug, Default)]
pub struct SceneStore {
    scene: Scene,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scene(scene: Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Deep copy for a history checkpoint.
    pub fn snapshot(&self) -> Scene {
        self.scene.clone()
    }

    /// Replace the whole scene, returning the previous one.
    pub fn restore(&mut self, scene: Scene) -> Scene {
        std::mem::replace(&mut self.scene, scene)
    }

    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.scene.strokes.push(stroke);
    }

    /// Remove every stroke matching `pred`, keeping the order of the rest.
    pub fn remove_strokes_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&Stroke) -> bool,
    {
        let before = self.scene.strokes.len();
        self.scene.strokes.retain(|s| !pred(s));
        before - self.scene.strokes.len()
    }

    pub fn add_text(&mut self, item: TextItem) -> TextRef {
        self.scene.texts.push(item);
        TextRef::new(self.scene.texts.len() - 1)
    }

    /// Replace the content of an existing item. Returns `false` for a
    /// stale reference.
    pub fn update_text(&mut self, r: TextRef, new_text: impl Into<String>) -> bool {
        match self.scene.texts.get_mut(r.index()) {
            Some(item) => {
                item.text = new_text.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_text(&mut self, r: TextRef) -> Option<TextItem> {
        if r.index() < self.scene.texts.len() {
            Some(self.scene.texts.remove(r.index()))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.scene.strokes.clear();
        self.scene.texts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn stroke_at(x: f64) -> Stroke {
        Stroke::new(Point::new(x, 0.0), Point::new(x + 1.0, 1.0), "#000000", 2.0)
    }

    #[test]
    fn remove_strokes_keeps_order() {
        let mut store = SceneStore::new();
        for x in [0.0, 10.0, 20.0, 30.0] {
            store.add_stroke(stroke_at(x));
        }
        let removed = store.remove_strokes_where(|s| s.start_x == 10.0 || s.start_x == 30.0);
        assert_eq!(removed, 2);
        let xs: Vec<f64> = store.scene().strokes.iter().map(|s| s.start_x).collect();
        assert_eq!(xs, vec![0.0, 20.0]);
    }

    #[test]
    fn text_refs_address_items() {
        let mut store = SceneStore::new();
        let a = store.add_text(TextItem::new("a", Point::ZERO, 16.0, "#000", "Arial"));
        let b = store.add_text(TextItem::new("b", Point::ZERO, 16.0, "#000", "Arial"));
        assert!(store.update_text(b, "bee"));
        assert_eq!(store.scene().text(b).map(|t| t.text.as_str()), Some("bee"));
        assert_eq!(store.remove_text(a).map(|t| t.text), Some("a".to_string()));
        // `b` shifted down; the old handle is now stale.
        assert!(!store.update_text(b, "x"));
        assert!(store.remove_text(b).is_none());
    }

    #[test]
    fn restore_swaps_scene() {
        let mut store = SceneStore::new();
        store.add_stroke(stroke_at(0.0));
        let snap = store.snapshot();
        store.clear();
        assert!(store.scene().is_empty());
        let cleared = store.restore(snap.clone());
        assert!(cleared.is_empty());
        assert_eq!(store.scene(), &snap);
    }
}
