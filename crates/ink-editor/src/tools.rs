//! Tool system for canvas interactions.
//!
//! The toolbar arms one mode at a time. Pencil and eraser translate
//! pointer gestures into `SceneEdit`s; text placement and the idle
//! pan/select behavior are handled by the editor itself because they
//! produce overlays and view changes rather than edits.
//!
//! | Button | From same mode | From any other mode |
//! |--------|----------------|---------------------|
//! | Pencil | back to Idle   | Pencil              |
//! | Eraser | back to Idle   | Eraser              |
//! | Text   | TextPlacement  | TextPlacement       |

use ink_core::model::Stroke;
use kurbo::Point;

use crate::edit::SceneEdit;
use crate::input::InputEvent;

/// Toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Pencil,
    Eraser,
    Text,
}

impl ToolKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pencil" => Some(ToolKind::Pencil),
            "eraser" => Some(ToolKind::Eraser),
            "text" => Some(ToolKind::Text),
            _ => None,
        }
    }
}

/// How pointer input is currently interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolMode {
    /// Pan by dragging, hover and select labels.
    #[default]
    Idle,
    Pencil,
    Eraser,
    /// The next click opens a text overlay, then the mode returns to Idle.
    TextPlacement,
}

impl ToolMode {
    /// The mode after pressing a toolbar button.
    pub fn activate(self, tool: ToolKind) -> ToolMode {
        match (self, tool) {
            (ToolMode::Pencil, ToolKind::Pencil) => ToolMode::Idle,
            (ToolMode::Eraser, ToolKind::Eraser) => ToolMode::Idle,
            (_, ToolKind::Pencil) => ToolMode::Pencil,
            (_, ToolKind::Eraser) => ToolMode::Eraser,
            (_, ToolKind::Text) => ToolMode::TextPlacement,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolMode::Idle => "idle",
            ToolMode::Pencil => "pencil",
            ToolMode::Eraser => "eraser",
            ToolMode::TextPlacement => "text",
        }
    }
}

/// Current tool parameters, in world units.
#[derive(Debug, Clone, Copy)]
pub struct Brush<'a> {
    pub stroke_color: &'a str,
    pub stroke_width: f64,
    pub eraser_size: f64,
}

/// Trait for tools that turn pointer gestures into scene edits.
pub trait Tool {
    fn mode(&self) -> ToolMode;

    /// Handle an input event. `world` is the event position in world
    /// coordinates, `None` for events without one.
    fn handle(&mut self, event: &InputEvent, world: Option<Point>, brush: &Brush) -> Vec<SceneEdit>;

    /// Whether a gesture is in progress.
    fn is_active(&self) -> bool;

    /// Abandon any gesture in progress.
    fn reset(&mut self);
}

// ─── Pencil Tool ─────────────────────────────────────────────────────────

/// Freehand drawing: every move while pressed emits one segment from the
/// previous point.
#[derive(Debug, Default)]
pub struct PencilTool {
    last: Option<Point>,
}

impl PencilTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for PencilTool {
    fn mode(&self) -> ToolMode {
        ToolMode::Pencil
    }

    fn handle(&mut self, event: &InputEvent, world: Option<Point>, brush: &Brush) -> Vec<SceneEdit> {
        match event {
            InputEvent::PointerDown { .. } => {
                self.last = world;
                vec![]
            }
            InputEvent::PointerMove { .. } => {
                let (Some(from), Some(to)) = (self.last, world) else {
                    return vec![];
                };
                self.last = Some(to);
                vec![SceneEdit::AddStroke(Stroke::new(
                    from,
                    to,
                    brush.stroke_color,
                    brush.stroke_width,
                ))]
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
                self.last = None;
                vec![]
            }
            _ => vec![],
        }
    }

    fn is_active(&self) -> bool {
        self.last.is_some()
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

// ─── Eraser Tool ─────────────────────────────────────────────────────────

/// Removes strokes whose start point is near the pointer while pressed.
#[derive(Debug, Default)]
pub struct EraserTool {
    pressed: bool,
}

impl EraserTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for EraserTool {
    fn mode(&self) -> ToolMode {
        ToolMode::Eraser
    }

    fn handle(&mut self, event: &InputEvent, world: Option<Point>, brush: &Brush) -> Vec<SceneEdit> {
        match event {
            InputEvent::PointerDown { .. } => {
                self.pressed = true;
                vec![]
            }
            InputEvent::PointerMove { .. } if self.pressed => match world {
                Some(center) => vec![SceneEdit::EraseNear {
                    center,
                    radius: brush.eraser_size,
                }],
                None => vec![],
            },
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
                self.pressed = false;
                vec![]
            }
            _ => vec![],
        }
    }

    fn is_active(&self) -> bool {
        self.pressed
    }

    fn reset(&mut self) {
        self.pressed = false;
    }
}
