//! Keyboard shortcut mapping.
//!
//! Bindings are window-level, not canvas-scoped:
//! - `+` / `=` zoom in, `-` zoom out
//! - ⌘Z / Ctrl+Z undo, ⌘Y / Ctrl+Y / ⌘⇧Z redo
//! - Delete / Backspace remove the selected label

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ZoomIn,
    ZoomOut,
    Undo,
    Redo,
    Delete,
}

impl ShortcutAction {
    /// Whether the browser's own handling must be suppressed
    /// (history navigation on ⌘Z/⌘Y).
    pub fn prevents_default(self) -> bool {
        matches!(self, ShortcutAction::Undo | ShortcutAction::Redo)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::ZoomIn => "zoomIn",
            ShortcutAction::ZoomOut => "zoomOut",
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::Delete => "delete",
        }
    }
}

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                "z" | "Z" if modifiers.shift => Some(ShortcutAction::Redo),
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        match key {
            "+" | "=" => Some(ShortcutAction::ZoomIn),
            "-" => Some(ShortcutAction::ZoomOut),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            _ => None,
        }
    }
}
