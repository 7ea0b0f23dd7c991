//! What the host should do after the editor handled an event.

use serde::Serialize;

/// CSS cursor requested for the canvas element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    Default,
    Pointer,
    Crosshair,
    Text,
    Grabbing,
}

/// A text-entry box the host should show over the canvas.
///
/// Position and font size are in screen pixels. The host calls
/// `Editor::commit_text` on Enter or blur.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_px: f64,
    pub color: String,
    /// `true` when editing an existing label.
    pub editing: bool,
}

/// Requests for the host. Serialized to JSON by the browser bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub redraw: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<TextOverlay>,
    pub prevent_default: bool,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    /// Redraw only if `changed`.
    pub fn redraw_if(changed: bool) -> Self {
        Self {
            redraw: changed,
            ..Self::default()
        }
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_for_the_host() {
        let json = serde_json::to_string(&Outcome::redraw().with_cursor(Cursor::Pointer)).unwrap();
        assert_eq!(
            json,
            r#"{"redraw":true,"cursor":"pointer","preventDefault":false}"#
        );
    }
}
