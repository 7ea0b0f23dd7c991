//! Scene → surface drawing commands.
//!
//! Stateless: every call repaints the whole frame from the scene and the
//! view. Layer order is ruling (background), strokes, texts, then the
//! hover and selection outlines on top.

use ink_core::model::{Scene, TextRef};
use ink_core::view::ViewState;
use kurbo::{Point, Rect, Size};

use crate::bounds::text_bounds;
use crate::surface::{LineCap, Surface};

const MAX_RULING_LINES: i64 = 10_000;

/// Theme-dependent colors for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasTheme {
    pub bg: &'static str,
    pub ruling: &'static str,
    pub hover_outline: &'static str,
    pub selection_outline: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            bg: "#DDE4E6",
            ruling: "#374151",
            hover_outline: "blue",
            selection_outline: "red",
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: "#374151",
            ruling: "#ffffff",
            hover_outline: "blue",
            selection_outline: "red",
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }
}

/// Per-frame inputs besides the scene and the view.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub viewport: Size,
    pub ruling: bool,
    pub ruling_interval: f64,
    pub line_height_factor: f64,
    pub theme: CanvasTheme,
    pub hovered: Option<TextRef>,
    pub selected: Option<TextRef>,
}

/// Paint the full frame.
pub fn render_scene<S: Surface>(
    surface: &mut S,
    scene: &Scene,
    view: &ViewState,
    opts: &RenderOptions,
) {
    let (w, h) = (opts.viewport.width, opts.viewport.height);
    surface.clear(w, h, opts.theme.bg);

    if opts.ruling {
        let line_width = view.scale;
        for y in ruling_lines(view, h, opts.ruling_interval) {
            surface.draw_line(
                Point::new(0.0, y),
                Point::new(w, y),
                opts.theme.ruling,
                line_width,
                LineCap::Butt,
            );
        }
    }

    for stroke in &scene.strokes {
        surface.draw_line(
            view.to_screen(stroke.start()),
            view.to_screen(stroke.end()),
            &stroke.color,
            stroke.width,
            LineCap::Round,
        );
    }

    for item in &scene.texts {
        surface.fill_text(
            &item.text,
            view.to_screen(item.anchor()),
            item.font_size * view.scale,
            &item.font_family,
            &item.font_color,
        );
    }

    let outlines = [
        (opts.hovered, opts.theme.hover_outline),
        (opts.selected, opts.theme.selection_outline),
    ];
    for (target, color) in outlines {
        let Some(item) = target.and_then(|r| scene.text(r)) else {
            continue;
        };
        let world = text_bounds(item, &*surface, opts.line_height_factor);
        surface.stroke_rect(screen_rect(view, world), color, 1.0);
    }

    log::trace!(
        "rendered {} stroke(s), {} text(s) at scale {}",
        scene.strokes.len(),
        scene.texts.len(),
        view.scale
    );
}

/// Screen y of every ruling line visible in a viewport of `height` px.
///
/// The visible world range is the inverse transform of the viewport's top
/// and bottom edges, snapped outward to the ruling interval.
pub fn ruling_lines(view: &ViewState, height: f64, interval: f64) -> Vec<f64> {
    if !interval.is_finite() || interval <= 0.0 || view.scale <= 0.0 {
        return Vec::new();
    }
    let step = interval;
    let first = (-view.offset.y / view.scale / step).floor() as i64;
    let last = ((height - view.offset.y) / view.scale / step).ceil() as i64;
    if last.saturating_sub(first) > MAX_RULING_LINES {
        log::warn!("ruling too dense at scale {}, skipped", view.scale);
        return Vec::new();
    }
    (first..=last)
        .map(|row| row as f64 * step * view.scale + view.offset.y)
        .collect()
}

fn screen_rect(view: &ViewState, world: Rect) -> Rect {
    let p0 = view.to_screen(Point::new(world.x0, world.y0));
    let p1 = view.to_screen(Point::new(world.x1, world.y1));
    Rect::from_points(p0, p1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[test]
    fn ruling_covers_viewport_at_identity() {
        let ys = ruling_lines(&ViewState::default(), 100.0, 35.0);
        assert_eq!(ys, vec![0.0, 35.0, 70.0, 105.0]);
    }

    #[test]
    fn ruling_follows_pan_and_zoom() {
        let view = ViewState {
            scale: 2.0,
            offset: Vec2::new(0.0, 50.0),
        };
        let ys = ruling_lines(&view, 200.0, 35.0);
        // World rows -35 through 105, each 70 px apart on screen.
        assert_eq!(ys, vec![-20.0, 50.0, 120.0, 190.0, 260.0]);
    }

    #[test]
    fn ruling_rejects_bad_interval() {
        assert!(ruling_lines(&ViewState::default(), 100.0, 0.0).is_empty());
        assert!(ruling_lines(&ViewState::default(), 100.0, f64::NAN).is_empty());
    }
}
