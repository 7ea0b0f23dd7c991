//! The interaction controller.
//!
//! `Editor` owns the whole session state: scene, view, history, tool mode,
//! gesture phase, selection, hover, the pending text overlay and the
//! current tool inputs. Every public handler returns an [`Outcome`] and
//! persists the scene after any committed change.

use ink_core::config::{EditorConfig, ViewSettings};
use ink_core::model::{Scene, TextItem, TextRef};
use ink_core::persist::{KeyValueStore, load_scene, load_settings, save_scene, save_settings};
use ink_core::store::SceneStore;
use ink_core::view::{ViewState, ZoomDirection};
use ink_render::{CanvasTheme, RenderOptions, Surface, TextMeasure, find_text_at, render_scene};
use kurbo::{Point, Size, Vec2};

use crate::edit::SceneEdit;
use crate::history::History;
use crate::input::{InputEvent, Modifiers};
use crate::outcome::{Cursor, Outcome, TextOverlay};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{Brush, EraserTool, PencilTool, Tool, ToolKind, ToolMode};

const DEFAULT_VIEWPORT: Size = Size::new(800.0, 600.0);

/// Gesture phase, derived from the tools and the pan state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    None,
    Drawing,
    Erasing,
    Panning { last: Point },
}

/// Current values of the host's pickers and sliders.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInputs {
    pub stroke_color: String,
    pub stroke_width: f64,
    pub font_size: f64,
    pub text_color: String,
    pub eraser_size: f64,
}

/// A text overlay the host is showing, waiting for commit or cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingText {
    pub anchor: Point,
    /// The label being edited and its content when the overlay opened.
    pub target: Option<(TextRef, String)>,
}

pub struct Editor<S: KeyValueStore> {
    store: SceneStore,
    history: History,
    view: ViewState,
    settings: ViewSettings,
    config: EditorConfig,
    mode: ToolMode,
    pencil: PencilTool,
    eraser: EraserTool,
    /// Last screen position while panning.
    panning: Option<Point>,
    selection: Option<TextRef>,
    hovered: Option<TextRef>,
    pending: Option<PendingText>,
    inputs: ToolInputs,
    viewport: Size,
    storage: S,
    measure: Box<dyn TextMeasure>,
}

impl<S: KeyValueStore> Editor<S> {
    /// Hydrate a session from `storage`. Corrupt entries start empty and
    /// out-of-range config fields use their defaults.
    pub fn new(storage: S, config: EditorConfig, measure: Box<dyn TextMeasure>) -> Self {
        let config = config.validated();
        let scene = load_scene(&storage);
        let settings = load_settings(&storage);
        let ink = settings.default_ink();
        log::debug!(
            "editor ready: {} stroke(s), {} text(s), notebook={}, dark={}",
            scene.strokes.len(),
            scene.texts.len(),
            settings.notebook,
            settings.dark_mode
        );
        Self {
            store: SceneStore::from_scene(scene),
            history: History::new(config.history_depth),
            view: ViewState::default(),
            settings,
            inputs: ToolInputs {
                stroke_color: ink.to_string(),
                stroke_width: config.default_stroke_width,
                font_size: config.default_font_size,
                text_color: ink.to_string(),
                eraser_size: config.default_eraser_size,
            },
            config,
            mode: ToolMode::Idle,
            pencil: PencilTool::new(),
            eraser: EraserTool::new(),
            panning: None,
            selection: None,
            hovered: None,
            pending: None,
            viewport: DEFAULT_VIEWPORT,
            storage,
            measure,
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn scene(&self) -> &Scene {
        self.store.scene()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn gesture(&self) -> Gesture {
        if let Some(last) = self.panning {
            Gesture::Panning { last }
        } else if self.pencil.is_active() {
            Gesture::Drawing
        } else if self.eraser.is_active() {
            Gesture::Erasing
        } else {
            Gesture::None
        }
    }

    pub fn selection(&self) -> Option<TextRef> {
        self.selection
    }

    pub fn hovered(&self) -> Option<TextRef> {
        self.hovered
    }

    pub fn pending_text(&self) -> Option<&PendingText> {
        self.pending.as_ref()
    }

    pub fn settings(&self) -> ViewSettings {
        self.settings
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn inputs(&self) -> &ToolInputs {
        &self.inputs
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Text at a screen position, if any.
    pub fn text_at_screen(&self, screen: Point) -> Option<TextRef> {
        self.text_at(self.view.to_world(screen))
    }

    fn text_at(&self, world: Point) -> Option<TextRef> {
        find_text_at(
            self.store.scene(),
            world,
            self.measure.as_ref(),
            self.config.line_height_factor,
        )
    }

    // ─── Input dispatch ──────────────────────────────────────────────────

    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => self.pointer_up(),
            InputEvent::Click { x, y } => self.click(Point::new(x, y)),
            InputEvent::DoubleClick { x, y } => self.double_click(Point::new(x, y)),
            InputEvent::Key { key, modifiers } => self.key(&key, modifiers),
        }
    }

    pub fn pointer_down(&mut self, screen: Point) -> Outcome {
        let world = self.view.to_world(screen);
        let event = InputEvent::PointerDown {
            x: screen.x,
            y: screen.y,
        };
        match self.mode {
            ToolMode::Idle => {
                self.panning = Some(screen);
                Outcome::none().with_cursor(Cursor::Grabbing)
            }
            ToolMode::Pencil => {
                // Pushed on the first segment; a bare click leaves both stacks alone.
                self.history.begin_batch(&self.store);
                self.run_tool(&event, Some(world));
                Outcome::none()
            }
            ToolMode::Eraser => {
                self.run_tool(&event, Some(world));
                Outcome::none()
            }
            ToolMode::TextPlacement => Outcome::none(),
        }
    }

    pub fn pointer_move(&mut self, screen: Point) -> Outcome {
        let world = self.view.to_world(screen);
        match self.mode {
            ToolMode::Idle => match self.panning {
                Some(last) => {
                    self.view.pan(screen - last);
                    self.panning = Some(screen);
                    Outcome::redraw()
                }
                None => self.update_hover(world),
            },
            ToolMode::Pencil | ToolMode::Eraser => {
                let event = InputEvent::PointerMove {
                    x: screen.x,
                    y: screen.y,
                };
                Outcome::redraw_if(self.run_tool(&event, Some(world)))
            }
            ToolMode::TextPlacement => Outcome::none(),
        }
    }

    /// Release or leave: ends whatever gesture is in progress.
    pub fn pointer_up(&mut self) -> Outcome {
        let was_panning = self.panning.take().is_some();
        if matches!(self.mode, ToolMode::Pencil | ToolMode::Eraser) {
            self.run_tool(&InputEvent::PointerLeave, None);
        }
        self.history.end_batch();
        match (was_panning, self.hovered) {
            (false, _) => Outcome::none(),
            (true, Some(_)) => Outcome::none().with_cursor(Cursor::Pointer),
            (true, None) => Outcome::none().with_cursor(Cursor::Default),
        }
    }

    pub fn click(&mut self, screen: Point) -> Outcome {
        let world = self.view.to_world(screen);
        match self.mode {
            ToolMode::TextPlacement => {
                self.mode = ToolMode::Idle;
                log::debug!("text placement at ({:.1}, {:.1})", world.x, world.y);
                self.open_overlay(world, None).with_cursor(Cursor::Default)
            }
            ToolMode::Idle => {
                let hit = self.text_at(world);
                if hit == self.selection {
                    return Outcome::none();
                }
                self.selection = hit;
                Outcome::redraw()
            }
            ToolMode::Pencil | ToolMode::Eraser => Outcome::none(),
        }
    }

    /// Double-click on a label in Idle opens it for editing.
    pub fn double_click(&mut self, screen: Point) -> Outcome {
        if self.mode != ToolMode::Idle {
            return Outcome::none();
        }
        let Some(target) = self.text_at(self.view.to_world(screen)) else {
            return Outcome::none();
        };
        let Some(item) = self.store.scene().text(target) else {
            return Outcome::none();
        };
        let (anchor, original) = (item.anchor(), item.text.clone());
        self.open_overlay(anchor, Some((target, original)))
    }

    pub fn key(&mut self, key: &str, modifiers: Modifiers) -> Outcome {
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return Outcome::none();
        };
        // Keys typed into an open overlay belong to the overlay.
        if self.pending.is_some() && !action.prevents_default() {
            return Outcome::none();
        }
        log::trace!("shortcut {}", action.name());
        let mut outcome = match action {
            ShortcutAction::ZoomIn => self.zoom(ZoomDirection::In),
            ShortcutAction::ZoomOut => self.zoom(ZoomDirection::Out),
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Delete => self.delete_selected(),
        };
        outcome.prevent_default = action.prevents_default();
        outcome
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Toolbar button press.
    pub fn activate_tool(&mut self, tool: ToolKind) -> Outcome {
        let next = self.mode.activate(tool);
        self.end_gesture();
        let had_hover = self.hovered.take().is_some();
        log::debug!("tool mode {} -> {}", self.mode.name(), next.name());
        self.mode = next;
        let cursor = match next {
            ToolMode::Idle => Cursor::Default,
            ToolMode::Pencil | ToolMode::Eraser => Cursor::Crosshair,
            ToolMode::TextPlacement => Cursor::Text,
        };
        Outcome::redraw_if(had_hover).with_cursor(cursor)
    }

    fn run_tool(&mut self, event: &InputEvent, world: Option<Point>) -> bool {
        let brush = Brush {
            stroke_color: &self.inputs.stroke_color,
            stroke_width: self.inputs.stroke_width,
            eraser_size: self.inputs.eraser_size,
        };
        let tool: &mut dyn Tool = match self.mode {
            ToolMode::Pencil => &mut self.pencil,
            ToolMode::Eraser => &mut self.eraser,
            ToolMode::Idle | ToolMode::TextPlacement => return false,
        };
        let edits = tool.handle(event, world, &brush);
        if !edits.is_empty() {
            log::trace!("{} produced {} edit(s)", tool.mode().name(), edits.len());
        }
        self.commit(edits)
    }

    fn end_gesture(&mut self) {
        self.pencil.reset();
        self.eraser.reset();
        self.panning = None;
        self.history.end_batch();
    }

    fn update_hover(&mut self, world: Point) -> Outcome {
        let hit = self.text_at(world);
        if hit == self.hovered {
            return Outcome::none();
        }
        self.hovered = hit;
        let cursor = if hit.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        };
        Outcome::redraw().with_cursor(cursor)
    }

    // ─── Text overlay ────────────────────────────────────────────────────

    fn open_overlay(&mut self, anchor: Point, target: Option<(TextRef, String)>) -> Outcome {
        let existing = target
            .as_ref()
            .and_then(|(r, _)| self.store.scene().text(*r));
        let (text, font_size, color) = match existing {
            Some(item) => (item.text.clone(), item.font_size, item.font_color.clone()),
            None => (
                String::new(),
                self.inputs.font_size,
                self.inputs.text_color.clone(),
            ),
        };
        let screen = self.view.to_screen(anchor);
        let overlay = TextOverlay {
            x: screen.x,
            y: screen.y,
            text,
            font_px: font_size * self.view.scale,
            color,
            editing: target.is_some(),
        };
        if self.pending.is_some() {
            log::debug!("replacing pending text overlay");
        }
        self.pending = Some(PendingText { anchor, target });
        Outcome {
            overlay: Some(overlay),
            ..Outcome::none()
        }
    }

    /// Commit the overlay's content. Blank content is discarded; for an
    /// edited label it keeps the old text.
    pub fn commit_text(&mut self, content: &str) -> Outcome {
        let Some(PendingText { anchor, target }) = self.pending.take() else {
            return Outcome::none();
        };
        if content.trim().is_empty() {
            log::debug!("blank text discarded");
            return Outcome::none();
        }
        let edit = match target {
            None => SceneEdit::AddText(TextItem::new(
                content,
                anchor,
                self.inputs.font_size,
                self.inputs.text_color.clone(),
                self.config.default_font_family.clone(),
            )),
            Some((r, original)) => {
                let current = self.store.scene().text(r).map(|item| item.text.as_str());
                if current != Some(original.as_str()) {
                    log::warn!("edited label changed underneath the overlay, commit dropped");
                    return Outcome::none();
                }
                SceneEdit::UpdateText {
                    target: r,
                    text: content.to_string(),
                }
            }
        };

        // A commit that lands mid-stroke gets its own undo entry.
        let resume_batch = self.history.in_batch();
        self.history.end_batch();
        let changed = self.commit(vec![edit]);
        if resume_batch {
            self.history.begin_batch(&self.store);
        }
        Outcome::redraw_if(changed)
    }

    pub fn cancel_text(&mut self) -> Outcome {
        self.pending = None;
        Outcome::none()
    }

    // ─── Commands ────────────────────────────────────────────────────────

    pub fn zoom(&mut self, direction: ZoomDirection) -> Outcome {
        let factor = direction.factor(self.config.zoom_increment);
        let changed = self.view.apply_zoom(factor, self.config.min_scale);
        log::trace!("zoom {direction:?} -> scale {}", self.view.scale);
        Outcome::redraw_if(changed)
    }

    /// Pan by raw screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) -> Outcome {
        self.view.pan(delta);
        Outcome::redraw()
    }

    pub fn undo(&mut self) -> Outcome {
        self.end_gesture();
        let Some(description) = self.history.undo(&mut self.store) else {
            return Outcome::none();
        };
        log::debug!("undo {description}");
        self.scene_replaced()
    }

    pub fn redo(&mut self) -> Outcome {
        self.end_gesture();
        let Some(description) = self.history.redo(&mut self.store) else {
            return Outcome::none();
        };
        log::debug!("redo {description}");
        self.scene_replaced()
    }

    pub fn delete_selected(&mut self) -> Outcome {
        let Some(target) = self.selection.take() else {
            return Outcome::none();
        };
        self.hovered = None;
        let changed = self.commit(vec![SceneEdit::RemoveText(target)]);
        if changed {
            self.retarget_pending(target);
        }
        Outcome::redraw_if(changed).with_cursor(Cursor::Default)
    }

    /// Remove everything. Undoable.
    pub fn clear(&mut self) -> Outcome {
        self.end_gesture();
        let outcome = self.forget_references();
        self.commit(vec![SceneEdit::Clear]);
        // Ruling is redrawn even when there was nothing to remove.
        outcome
    }

    pub fn toggle_notebook(&mut self) -> Outcome {
        self.settings.notebook = !self.settings.notebook;
        save_settings(&mut self.storage, self.settings);
        Outcome::redraw()
    }

    /// Flip the theme and reset both ink colors to the new theme's default.
    pub fn toggle_dark_mode(&mut self) -> Outcome {
        self.settings.dark_mode = !self.settings.dark_mode;
        let ink = self.settings.default_ink();
        self.inputs.stroke_color = ink.to_string();
        self.inputs.text_color = ink.to_string();
        save_settings(&mut self.storage, self.settings);
        Outcome::redraw()
    }

    fn commit(&mut self, edits: Vec<SceneEdit>) -> bool {
        let mut changed = false;
        for edit in edits {
            changed |= self.history.execute(&mut self.store, edit);
        }
        if changed {
            save_scene(&mut self.storage, self.store.scene());
        }
        changed
    }

    fn scene_replaced(&mut self) -> Outcome {
        let outcome = self.forget_references();
        save_scene(&mut self.storage, self.store.scene());
        outcome
    }

    /// Drop every `TextRef` held into the scene. Returns a redraw, with a
    /// default cursor when a hover was cleared.
    fn forget_references(&mut self) -> Outcome {
        self.selection = None;
        if self.pending.as_ref().is_some_and(|p| p.target.is_some()) {
            log::debug!("scene replaced under an open edit, overlay dropped");
            self.pending = None;
        }
        if self.hovered.take().is_some() {
            Outcome::redraw().with_cursor(Cursor::Default)
        } else {
            Outcome::redraw()
        }
    }

    /// Keep an open edit pointing at its label after `removed` is deleted.
    fn retarget_pending(&mut self, removed: TextRef) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some((target, _)) = pending.target.as_mut() else {
            return;
        };
        if *target == removed {
            log::debug!("edited label deleted, overlay dropped");
            self.pending = None;
        } else if target.index() > removed.index() {
            *target = TextRef::new(target.index() - 1);
        }
    }

    // ─── Inputs ──────────────────────────────────────────────────────────

    pub fn set_stroke_color(&mut self, color: &str) {
        self.inputs.stroke_color = self.color_or_ink(color);
    }

    pub fn set_text_color(&mut self, color: &str) {
        self.inputs.text_color = self.color_or_ink(color);
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        if let Some(w) = positive("stroke width", width) {
            self.inputs.stroke_width = w;
        }
    }

    pub fn set_font_size(&mut self, size: f64) {
        if let Some(s) = positive("font size", size) {
            self.inputs.font_size = s;
        }
    }

    pub fn set_eraser_size(&mut self, size: f64) {
        if let Some(s) = positive("eraser size", size) {
            self.inputs.eraser_size = s;
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Outcome {
        if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
            self.viewport = Size::new(width, height);
            Outcome::redraw()
        } else {
            log::warn!("ignoring viewport {width}x{height}");
            Outcome::none()
        }
    }

    fn color_or_ink(&self, color: &str) -> String {
        let color = color.trim();
        if color.is_empty() {
            self.settings.default_ink().to_string()
        } else {
            color.to_string()
        }
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            viewport: self.viewport,
            ruling: self.settings.notebook,
            ruling_interval: self.config.ruling_interval,
            line_height_factor: self.config.line_height_factor,
            theme: CanvasTheme::for_mode(self.settings.dark_mode),
            hovered: self.hovered,
            selected: self.selection,
        }
    }

    pub fn render<Sf: Surface>(&self, surface: &mut Sf) {
        render_scene(surface, self.store.scene(), &self.view, &self.render_options());
    }
}

fn positive(what: &str, value: f64) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        log::warn!("ignoring {what} {value}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink_core::persist::MemoryStore;
    use ink_render::ApproxMeasure;

    fn editor() -> Editor<MemoryStore> {
        Editor::new(
            MemoryStore::new(),
            EditorConfig::default(),
            Box::new(ApproxMeasure::default()),
        )
    }

    #[test]
    fn invalid_config_still_produces_well_formed_items() {
        let config = EditorConfig::from_json(
            r#"{"defaultStrokeWidth":-3,"defaultFontSize":0,"lineHeightFactor":-1.2}"#,
        );
        let mut ed = Editor::new(MemoryStore::new(), config, Box::new(ApproxMeasure::default()));

        ed.activate_tool(ToolKind::Pencil);
        ed.pointer_down(Point::new(0.0, 0.0));
        ed.pointer_move(Point::new(10.0, 10.0));
        ed.pointer_up();
        ed.activate_tool(ToolKind::Text);
        ed.click(Point::new(50.0, 50.0));
        ed.commit_text("hi");

        assert!(ed.scene().strokes[0].is_well_formed());
        assert!(ed.scene().texts[0].is_well_formed());
        assert_eq!(load_scene(ed.storage()), *ed.scene());
        assert_eq!(ed.text_at_screen(Point::new(52.0, 45.0)), Some(TextRef::new(0)));
    }

    #[test]
    fn idle_drag_pans_without_history() {
        let mut ed = editor();
        ed.pointer_down(Point::new(10.0, 10.0));
        assert!(matches!(ed.gesture(), Gesture::Panning { .. }));
        let out = ed.pointer_move(Point::new(40.0, 30.0));
        assert!(out.redraw);
        ed.pointer_up();
        assert_eq!(ed.view().offset, Vec2::new(30.0, 20.0));
        assert_eq!(ed.gesture(), Gesture::None);
        assert!(!ed.can_undo());
    }

    #[test]
    fn hover_enter_and_leave() {
        let mut ed = editor();
        ed.activate_tool(ToolKind::Text);
        ed.click(Point::new(50.0, 50.0));
        ed.commit_text("hi");

        let enter = ed.pointer_move(Point::new(52.0, 45.0));
        assert_eq!(enter.cursor, Some(Cursor::Pointer));
        assert!(enter.redraw);
        assert_eq!(ed.hovered(), Some(TextRef::new(0)));

        // Staying inside changes nothing.
        assert_eq!(ed.pointer_move(Point::new(53.0, 45.0)), Outcome::none());

        let leave = ed.pointer_move(Point::new(500.0, 500.0));
        assert_eq!(leave.cursor, Some(Cursor::Default));
        assert_eq!(ed.hovered(), None);
    }

    #[test]
    fn text_placement_is_single_shot() {
        let mut ed = editor();
        let out = ed.activate_tool(ToolKind::Text);
        assert_eq!(out.cursor, Some(Cursor::Text));
        let out = ed.click(Point::new(20.0, 30.0));
        assert_eq!(ed.mode(), ToolMode::Idle);
        let overlay = out.overlay.expect("overlay requested");
        assert_eq!((overlay.x, overlay.y), (20.0, 30.0));
        assert!(!overlay.editing);
    }

    #[test]
    fn blank_commit_discards() {
        let mut ed = editor();
        ed.activate_tool(ToolKind::Text);
        ed.click(Point::new(20.0, 30.0));
        assert_eq!(ed.commit_text("   "), Outcome::none());
        assert!(ed.scene().texts.is_empty());
        assert!(ed.pending_text().is_none());
        assert!(!ed.can_undo());
    }

    #[test]
    fn overlay_swallows_character_shortcuts() {
        let mut ed = editor();
        ed.activate_tool(ToolKind::Text);
        ed.click(Point::new(20.0, 30.0));
        ed.key("-", Modifiers::NONE);
        assert_eq!(ed.view().scale, 1.0);
    }

    #[test]
    fn bad_inputs_are_ignored() {
        let mut ed = editor();
        ed.set_stroke_width(f64::NAN);
        ed.set_font_size(-3.0);
        ed.set_stroke_color("  ");
        assert_eq!(ed.inputs().stroke_width, 2.0);
        assert_eq!(ed.inputs().font_size, 16.0);
        assert_eq!(ed.inputs().stroke_color, "#000000");
    }

    #[test]
    fn dark_mode_resets_ink_and_persists() {
        let mut ed = editor();
        ed.set_stroke_color("#ff0000");
        ed.toggle_dark_mode();
        assert_eq!(ed.inputs().stroke_color, "#ffffff");
        assert_eq!(ed.storage().get("darkMode").as_deref(), Some("enabled"));
        assert_eq!(ed.render_options().theme, CanvasTheme::dark());
    }
}
