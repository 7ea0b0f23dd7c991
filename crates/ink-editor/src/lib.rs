//! Interaction layer for Inkboard: tools, shortcuts, undo/redo and the
//! `Editor` state machine that ties them to the scene and the view.

pub mod edit;
pub mod editor;
pub mod history;
pub mod input;
pub mod outcome;
pub mod shortcuts;
pub mod tools;

pub use edit::SceneEdit;
pub use editor::{Editor, Gesture, PendingText, ToolInputs};
pub use history::History;
pub use input::{InputEvent, Modifiers};
pub use outcome::{Cursor, Outcome, TextOverlay};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use tools::{ToolKind, ToolMode};
