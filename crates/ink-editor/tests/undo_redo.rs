//! Integration tests: undo/redo through the editor (ink-editor).
//!
//! Verifies the snapshot history as seen from user gestures: which
//! gestures create entries, that undo and redo are exact inverses, and
//! that every history move is persisted.

use ink_core::config::EditorConfig;
use ink_core::model::Scene;
use ink_core::persist::{MemoryStore, load_scene};
use ink_editor::{Editor, Modifiers, ToolKind, ToolMode};
use ink_render::ApproxMeasure;
use kurbo::Point;
use pretty_assertions::assert_eq;

fn editor() -> Editor<MemoryStore> {
    let _ = env_logger::builder().is_test(true).try_init();
    Editor::new(
        MemoryStore::new(),
        EditorConfig::default(),
        Box::new(ApproxMeasure::default()),
    )
}

fn draw(ed: &mut Editor<MemoryStore>, points: &[(f64, f64)]) {
    if ed.mode() != ToolMode::Pencil {
        ed.activate_tool(ToolKind::Pencil);
    }
    let (x, y) = points[0];
    ed.pointer_down(Point::new(x, y));
    for &(x, y) in &points[1..] {
        ed.pointer_move(Point::new(x, y));
    }
    ed.pointer_up();
}

fn add_label(ed: &mut Editor<MemoryStore>, x: f64, y: f64, text: &str) {
    ed.activate_tool(ToolKind::Text);
    ed.click(Point::new(x, y));
    ed.commit_text(text);
}

fn undo_key(ed: &mut Editor<MemoryStore>) -> bool {
    let out = ed.key("z", Modifiers::CTRL);
    assert!(out.prevent_default);
    out.redraw
}

// ─── Scenario 3: stroke undo/redo ───────────────────────────────────────

#[test]
fn stroke_undo_and_redo() {
    let mut ed = editor();
    draw(&mut ed, &[(10.0, 10.0), (20.0, 20.0)]);
    let drawn = ed.scene().strokes.clone();

    assert!(undo_key(&mut ed));
    assert!(ed.scene().strokes.is_empty());

    let out = ed.key("y", Modifiers::CTRL);
    assert!(out.redraw);
    assert_eq!(ed.scene().strokes, drawn);
}

#[test]
fn whole_trail_is_one_step() {
    let mut ed = editor();
    draw(&mut ed, &[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0), (15.0, 5.0)]);
    assert_eq!(ed.scene().strokes.len(), 3);
    undo_key(&mut ed);
    assert!(ed.scene().strokes.is_empty());
    assert!(!ed.can_undo());
}

#[test]
fn bare_click_with_pencil_leaves_no_entry() {
    let mut ed = editor();
    draw(&mut ed, &[(0.0, 0.0)]);
    assert!(!ed.can_undo());
}

#[test]
fn bare_click_with_pencil_keeps_redo() {
    let mut ed = editor();
    draw(&mut ed, &[(0.0, 0.0), (5.0, 5.0)]);
    ed.undo();
    draw(&mut ed, &[(20.0, 20.0)]);
    assert!(ed.can_redo());
    ed.redo();
    assert_eq!(ed.scene().strokes.len(), 1);
}

// ─── Inverse law ────────────────────────────────────────────────────────

#[test]
fn undo_then_redo_walks_every_state() {
    let mut ed = editor();
    let mut states = vec![ed.scene().clone()];

    draw(&mut ed, &[(0.0, 0.0), (10.0, 10.0)]);
    states.push(ed.scene().clone());
    add_label(&mut ed, 100.0, 100.0, "a");
    states.push(ed.scene().clone());
    draw(&mut ed, &[(50.0, 50.0), (60.0, 60.0), (70.0, 50.0)]);
    states.push(ed.scene().clone());
    ed.activate_tool(ToolKind::Pencil);
    ed.click(Point::new(102.0, 95.0));
    ed.delete_selected();
    states.push(ed.scene().clone());

    for expected in states.iter().rev().skip(1) {
        ed.undo();
        assert_eq!(ed.scene(), expected);
    }
    assert!(!ed.can_undo());

    for expected in states.iter().skip(1) {
        ed.redo();
        assert_eq!(ed.scene(), expected);
    }
    assert!(!ed.can_redo());
}

#[test]
fn empty_stacks_are_noops() {
    let mut ed = editor();
    assert!(!ed.undo().redraw);
    assert!(!ed.redo().redraw);
    assert_eq!(ed.scene(), &Scene::new());
}

// ─── Redo invalidation ──────────────────────────────────────────────────

#[test]
fn new_gesture_drops_redo() {
    let mut ed = editor();
    draw(&mut ed, &[(0.0, 0.0), (10.0, 10.0)]);
    ed.undo();
    assert!(ed.can_redo());

    add_label(&mut ed, 5.0, 5.0, "fork");
    assert!(!ed.can_redo());
    assert!(!ed.redo().redraw);
}

// ─── Eraser ─────────────────────────────────────────────────────────────

#[test]
fn erasing_nothing_is_not_recorded() {
    let mut ed = editor();
    draw(&mut ed, &[(100.0, 100.0), (110.0, 110.0)]);
    ed.activate_tool(ToolKind::Eraser);
    ed.pointer_down(Point::new(400.0, 400.0));
    let out = ed.pointer_move(Point::new(401.0, 401.0));
    ed.pointer_up();

    assert!(!out.redraw);
    undo_key(&mut ed);
    assert!(ed.scene().strokes.is_empty(), "only the stroke entry existed");
}

#[test]
fn erase_then_undo_restores_stroke() {
    let mut ed = editor();
    draw(&mut ed, &[(100.0, 100.0), (110.0, 110.0)]);
    let before = ed.scene().clone();

    ed.activate_tool(ToolKind::Eraser);
    ed.pointer_down(Point::new(90.0, 90.0));
    // Not yet within range of the start point.
    assert!(!ed.pointer_move(Point::new(90.0, 90.0)).redraw);
    assert!(ed.pointer_move(Point::new(95.0, 95.0)).redraw);
    ed.pointer_up();
    assert!(ed.scene().strokes.is_empty());

    ed.undo();
    assert_eq!(ed.scene(), &before);
}

#[test]
fn each_erasing_move_is_its_own_entry() {
    let mut ed = editor();
    draw(&mut ed, &[(100.0, 100.0), (110.0, 110.0)]);
    draw(&mut ed, &[(300.0, 300.0), (310.0, 310.0)]);
    assert_eq!(ed.undo_depth(), 2);

    ed.activate_tool(ToolKind::Eraser);
    ed.pointer_down(Point::new(100.0, 100.0));
    assert!(ed.pointer_move(Point::new(101.0, 101.0)).redraw);
    assert!(ed.pointer_move(Point::new(301.0, 301.0)).redraw);
    ed.pointer_up();
    assert!(ed.scene().strokes.is_empty());
    assert_eq!(ed.undo_depth(), 4);

    ed.undo();
    assert_eq!(ed.scene().strokes.len(), 1);
    assert_eq!(ed.scene().strokes[0].start(), Point::new(300.0, 300.0));
    ed.undo();
    assert_eq!(ed.scene().strokes.len(), 2);
}

// ─── Other committed mutations ──────────────────────────────────────────

#[test]
fn clear_is_undoable() {
    let mut ed = editor();
    draw(&mut ed, &[(0.0, 0.0), (10.0, 10.0)]);
    add_label(&mut ed, 20.0, 20.0, "x");
    let before = ed.scene().clone();

    ed.clear();
    assert!(ed.scene().is_empty());
    ed.undo();
    assert_eq!(ed.scene(), &before);

    // Clearing an empty scene records nothing.
    ed.clear();
    ed.clear();
    ed.undo();
    assert_eq!(ed.scene(), &before);
}

#[test]
fn text_edit_is_undoable() {
    let mut ed = editor();
    add_label(&mut ed, 50.0, 50.0, "one");
    ed.double_click(Point::new(52.0, 45.0));
    ed.commit_text("two");
    ed.undo();
    assert_eq!(ed.scene().texts[0].text, "one");
}

#[test]
fn undo_drops_selection_and_persists() {
    let mut ed = editor();
    add_label(&mut ed, 50.0, 50.0, "sel");
    ed.click(Point::new(52.0, 45.0));
    assert!(ed.selection().is_some());

    ed.undo();
    assert_eq!(ed.selection(), None);
    assert_eq!(load_scene(ed.storage()), Scene::new());

    ed.redo();
    assert_eq!(&load_scene(ed.storage()), ed.scene());
}

#[test]
fn history_depth_is_bounded() {
    let mut ed = Editor::new(
        MemoryStore::new(),
        EditorConfig {
            history_depth: 2,
            ..EditorConfig::default()
        },
        Box::new(ApproxMeasure::default()),
    );
    for i in 0..4 {
        let x = i as f64 * 20.0;
        draw(&mut ed, &[(x, 0.0), (x + 5.0, 5.0)]);
    }
    while ed.can_undo() {
        ed.undo();
    }
    assert_eq!(ed.scene().strokes.len(), 2);
}
