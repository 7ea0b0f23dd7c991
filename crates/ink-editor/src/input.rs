//! Input abstraction layer.
//!
//! Normalizes mouse and keyboard events from the host into a unified
//! `InputEvent` enum. Pointer coordinates are always in screen pixels
//! relative to the canvas; the editor converts them to world space.

/// Modifier key state at the time of the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Platform command modifier: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Button pressed over the canvas.
    PointerDown { x: f64, y: f64 },

    /// Pointer moved, pressed or not.
    PointerMove { x: f64, y: f64 },

    /// Button released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the canvas. Ends a gesture exactly like `PointerUp`.
    PointerLeave,

    /// Press and release without leaving the canvas.
    Click { x: f64, y: f64 },

    DoubleClick { x: f64, y: f64 },

    /// Window-level key press; `key` is the `KeyboardEvent.key` value.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
        }
    }
}
