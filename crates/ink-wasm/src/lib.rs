//! WASM bridge for Inkboard: exposes the annotation editor to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM
//! (toolbar, pickers, the text `<input>` overlay) and forwards canvas and
//! window events here. Every handler returns an outcome as JSON:
//! `{"redraw":bool,"cursor":"pointer"?,"overlay":{...}?,"preventDefault":bool}`.

mod console;
mod render2d;
mod storage;

use ink_core::config::EditorConfig;
use ink_core::view::ZoomDirection;
use ink_editor::{Editor, InputEvent, Modifiers, Outcome, ToolKind};
use kurbo::Point;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::render2d::{CanvasMeasure, CanvasSurface};
use crate::storage::BrowserStore;

/// The main WASM-facing canvas controller.
///
/// Holds the editor, which in turn owns the scene, view and history. All
/// interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct InkCanvas {
    editor: Editor<BrowserStore>,
}

#[wasm_bindgen]
impl InkCanvas {
    /// Create a controller drawing to `ctx`. `config_json` may hold a
    /// partial `EditorConfig`; anything missing or malformed uses defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
        config_json: Option<String>,
    ) -> Self {
        console_error_panic_hook_setup();
        console::init();

        let config = config_json
            .as_deref()
            .map(EditorConfig::from_json)
            .unwrap_or_default();
        let store = BrowserStore::open();
        let mut editor = Editor::new(store, config, Box::new(CanvasMeasure::new(ctx)));
        editor.resize(width, height);
        Self { editor }
    }

    /// Paint the current frame.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        self.editor.render(&mut CanvasSurface::new(ctx));
    }

    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.editor.resize(width, height).redraw
    }

    /// Whether changes survive a reload (false when `localStorage` is blocked).
    pub fn is_persistent(&self) -> bool {
        self.editor.storage().is_persistent()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> String {
        outcome_json(self.editor.handle(InputEvent::PointerDown { x, y }))
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> String {
        outcome_json(self.editor.handle(InputEvent::PointerMove { x, y }))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> String {
        outcome_json(self.editor.handle(InputEvent::PointerUp { x, y }))
    }

    /// `mouseout`: ends a gesture like pointer up.
    pub fn handle_pointer_leave(&mut self) -> String {
        outcome_json(self.editor.handle(InputEvent::PointerLeave))
    }

    pub fn handle_click(&mut self, x: f64, y: f64) -> String {
        outcome_json(self.editor.handle(InputEvent::Click { x, y }))
    }

    pub fn handle_double_click(&mut self, x: f64, y: f64) -> String {
        outcome_json(self.editor.handle(InputEvent::DoubleClick { x, y }))
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a window `keydown`. The page must call `preventDefault()`
    /// when the returned outcome asks for it.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        outcome_json(self.editor.handle(InputEvent::key(key, modifiers)))
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    /// Press a toolbar button: `"pencil"`, `"eraser"` or `"text"`.
    pub fn set_tool(&mut self, name: &str) -> String {
        match ToolKind::from_name(name) {
            Some(tool) => outcome_json(self.editor.activate_tool(tool)),
            None => {
                log::warn!("unknown tool {name:?}");
                outcome_json(Outcome::none())
            }
        }
    }

    /// Active mode: `"idle"`, `"pencil"`, `"eraser"` or `"text"`.
    pub fn get_tool_name(&self) -> String {
        self.editor.mode().name().to_string()
    }

    pub fn zoom_in(&mut self) -> String {
        outcome_json(self.editor.zoom(ZoomDirection::In))
    }

    pub fn zoom_out(&mut self) -> String {
        outcome_json(self.editor.zoom(ZoomDirection::Out))
    }

    pub fn get_scale(&self) -> f64 {
        self.editor.view().scale
    }

    pub fn undo(&mut self) -> String {
        outcome_json(self.editor.undo())
    }

    pub fn redo(&mut self) -> String {
        outcome_json(self.editor.redo())
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    pub fn delete_selected(&mut self) -> String {
        outcome_json(self.editor.delete_selected())
    }

    pub fn clear(&mut self) -> String {
        outcome_json(self.editor.clear())
    }

    pub fn toggle_notebook(&mut self) -> String {
        outcome_json(self.editor.toggle_notebook())
    }

    pub fn toggle_dark_mode(&mut self) -> String {
        outcome_json(self.editor.toggle_dark_mode())
    }

    pub fn is_notebook(&self) -> bool {
        self.editor.settings().notebook
    }

    pub fn is_dark_mode(&self) -> bool {
        self.editor.settings().dark_mode
    }

    // ─── Text overlay ────────────────────────────────────────────────────

    /// Enter or blur on the overlay input.
    pub fn commit_text(&mut self, content: &str) -> String {
        outcome_json(self.editor.commit_text(content))
    }

    pub fn cancel_text(&mut self) {
        self.editor.cancel_text();
    }

    // ─── Inputs ──────────────────────────────────────────────────────────

    pub fn set_stroke_color(&mut self, color: &str) {
        self.editor.set_stroke_color(color);
    }

    /// Current stroke color; the page re-reads it after a theme toggle.
    pub fn get_stroke_color(&self) -> String {
        self.editor.inputs().stroke_color.clone()
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.editor.set_stroke_width(width);
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.editor.set_font_size(size);
    }

    pub fn set_text_color(&mut self, color: &str) {
        self.editor.set_text_color(color);
    }

    pub fn set_eraser_size(&mut self, size: f64) {
        self.editor.set_eraser_size(size);
    }

    /// Eraser ring diameter in screen pixels, for the page's cursor.
    pub fn eraser_cursor_px(&self) -> f64 {
        self.editor.inputs().eraser_size * self.editor.view().scale
    }

    /// Is there a label under this screen point?
    pub fn hit_test_text(&self, x: f64, y: f64) -> bool {
        self.editor.text_at_screen(Point::new(x, y)).is_some()
    }
}

fn outcome_json(outcome: Outcome) -> String {
    serde_json::to_string(&outcome).unwrap_or_else(|e| {
        log::warn!("failed to encode outcome: {e}");
        r#"{"redraw":true,"preventDefault":false}"#.to_string()
    })
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Inkboard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink_editor::{Cursor, TextOverlay};
    use pretty_assertions::assert_eq;

    #[test]
    fn overlay_outcome_json() {
        let outcome = Outcome {
            overlay: Some(TextOverlay {
                x: 10.0,
                y: 20.0,
                text: String::new(),
                font_px: 16.0,
                color: "#000000".into(),
                editing: false,
            }),
            ..Outcome::none()
        }
        .with_cursor(Cursor::Default);
        assert_eq!(
            outcome_json(outcome),
            r##"{"redraw":false,"cursor":"default","overlay":{"x":10.0,"y":20.0,"text":"","fontPx":16.0,"color":"#000000","editing":false},"preventDefault":false}"##
        );
    }
}
