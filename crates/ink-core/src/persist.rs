//! Persistence through a flat string key-value store.
//!
//! The scene is saved as two JSON arrays under `"texts"` and
//! `"drawingPaths"`; view toggles live under `"isnotebook"` and
//! `"darkMode"`. Reading never fails: a missing or corrupt entry
//! hydrates as empty, and ill-formed items are filtered out.

use std::collections::HashMap;

use crate::config::ViewSettings;
use crate::model::{Scene, Stroke, TextItem};

pub const TEXTS_KEY: &str = "texts";
pub const STROKES_KEY: &str = "drawingPaths";
pub const NOTEBOOK_KEY: &str = "isnotebook";
pub const DARK_MODE_KEY: &str = "darkMode";

const DARK_MODE_ENABLED: &str = "enabled";
const DARK_MODE_DISABLED: &str = "disabled";

/// A string-keyed store such as browser `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value. Errors are reported as text (quota exceeded,
    /// storage disabled, ...).
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
}

/// In-memory store for headless sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

// ─── Codec ───────────────────────────────────────────────────────────────

pub fn encode_strokes(strokes: &[Stroke]) -> Result<String, serde_json::Error> {
    serde_json::to_string(strokes)
}

pub fn decode_strokes(json: &str) -> Result<Vec<Stroke>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn encode_texts(texts: &[TextItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(texts)
}

pub fn decode_texts(json: &str) -> Result<Vec<TextItem>, serde_json::Error> {
    serde_json::from_str(json)
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// Hydrate the scene from storage, recovering from any corruption.
pub fn load_scene<S: KeyValueStore + ?Sized>(store: &S) -> Scene {
    let strokes = load_sequence(store, STROKES_KEY, decode_strokes);
    let texts = load_sequence(store, TEXTS_KEY, decode_texts);
    let mut scene = Scene { strokes, texts };
    let dropped = scene.retain_well_formed();
    if dropped > 0 {
        log::warn!("dropped {dropped} ill-formed item(s) from saved scene");
    }
    log::debug!(
        "loaded scene: {} stroke(s), {} text(s)",
        scene.strokes.len(),
        scene.texts.len()
    );
    scene
}

fn load_sequence<S, T>(
    store: &S,
    key: &str,
    decode: fn(&str) -> Result<Vec<T>, serde_json::Error>,
) -> Vec<T>
where
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key) else {
        return Vec::new();
    };
    match decode(&raw) {
        Ok(items) => items,
        Err(e) => {
            log::warn!("corrupt {key:?} entry, starting empty: {e}");
            Vec::new()
        }
    }
}

/// Write both scene sequences. Failures are logged and otherwise ignored.
pub fn save_scene<S: KeyValueStore + ?Sized>(store: &mut S, scene: &Scene) {
    write(store, TEXTS_KEY, encode_texts(&scene.texts));
    write(store, STROKES_KEY, encode_strokes(&scene.strokes));
}

fn write<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    encoded: Result<String, serde_json::Error>,
) {
    let result = encoded
        .map_err(|e| e.to_string())
        .and_then(|json| store.set(key, &json));
    if let Err(e) = result {
        log::warn!("failed to persist {key:?}: {e}");
    }
}

// ─── View settings ───────────────────────────────────────────────────────

pub fn load_settings<S: KeyValueStore + ?Sized>(store: &S) -> ViewSettings {
    ViewSettings {
        notebook: store.get(NOTEBOOK_KEY).as_deref() == Some("true"),
        dark_mode: store.get(DARK_MODE_KEY).as_deref() == Some(DARK_MODE_ENABLED),
    }
}

pub fn save_settings<S: KeyValueStore + ?Sized>(store: &mut S, settings: ViewSettings) {
    let notebook = if settings.notebook { "true" } else { "false" };
    let dark = if settings.dark_mode {
        DARK_MODE_ENABLED
    } else {
        DARK_MODE_DISABLED
    };
    for (key, value) in [(NOTEBOOK_KEY, notebook), (DARK_MODE_KEY, dark)] {
        if let Err(e) = store.set(key, value) {
            log::warn!("failed to persist {key:?}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn missing_keys_load_empty() {
        let store = MemoryStore::new();
        assert!(load_scene(&store).is_empty());
        assert_eq!(load_settings(&store), ViewSettings::default());
    }

    #[test]
    fn corrupt_texts_do_not_affect_strokes() {
        let mut store = MemoryStore::new();
        store.set(TEXTS_KEY, "{not json").unwrap();
        store
            .set(
                STROKES_KEY,
                r##"[{"startX":1,"startY":1,"endX":2,"endY":2,"color":"#000","width":2}]"##,
            )
            .unwrap();
        let scene = load_scene(&store);
        assert!(scene.texts.is_empty());
        assert_eq!(scene.strokes.len(), 1);
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        let mut scene = Scene::new();
        scene.strokes.push(Stroke::new(
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0),
            "#000000",
            2.0,
        ));
        scene
            .texts
            .push(TextItem::new("hi", Point::new(50.0, 50.0), 16.0, "#111111", "Arial"));
        save_scene(&mut store, &scene);
        assert_eq!(store.write_count(), 2);
        assert_eq!(load_scene(&store), scene);
    }

    #[test]
    fn settings_use_legacy_string_values() {
        let mut store = MemoryStore::new();
        save_settings(
            &mut store,
            ViewSettings {
                notebook: true,
                dark_mode: false,
            },
        );
        assert_eq!(store.get(NOTEBOOK_KEY).as_deref(), Some("true"));
        assert_eq!(store.get(DARK_MODE_KEY).as_deref(), Some("disabled"));

        store.set(DARK_MODE_KEY, "enabled").unwrap();
        store.set(NOTEBOOK_KEY, "false").unwrap();
        assert_eq!(
            load_settings(&store),
            ViewSettings {
                notebook: false,
                dark_mode: true,
            }
        );
    }
}
