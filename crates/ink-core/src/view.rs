//! Screen ↔ world coordinate transform under pan and zoom.
//!
//! `screen = world * scale + offset`. Zoom is anchored at the world
//! origin, so zooming and panning compose linearly: offsets are always
//! raw screen pixels and are never rescaled by a zoom step.

use kurbo::{Point, Vec2};

/// Presentation-only view state. Not part of undo history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub scale: f64,
    pub offset: Vec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl ViewState {
    /// Convert a pointer position to world space.
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    /// Exact inverse of [`ViewState::to_world`].
    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset.x,
            world.y * self.scale + self.offset.y,
        )
    }

    /// Multiply the scale by `factor`, keeping offsets unchanged.
    ///
    /// The result never drops below `min_scale`. Non-finite or
    /// non-positive factors leave the view untouched.
    pub fn apply_zoom(&mut self, factor: f64, min_scale: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("ignoring degenerate zoom factor {factor}");
            return false;
        }
        let floor = if min_scale.is_finite() && min_scale > 0.0 {
            min_scale
        } else {
            f64::MIN_POSITIVE
        };
        let next = (self.scale * factor).max(floor);
        if !next.is_finite() {
            return false;
        }
        let changed = next != self.scale;
        self.scale = next;
        changed
    }

    /// Translate by a raw screen-pixel delta.
    pub fn pan(&mut self, delta: Vec2) {
        if delta.x.is_finite() && delta.y.is_finite() {
            self.offset += delta;
        }
    }
}

/// Zoom step direction; the factor is `1 ± increment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    pub fn factor(self, increment: f64) -> f64 {
        match self {
            ZoomDirection::In => 1.0 + increment,
            ZoomDirection::Out => 1.0 - increment,
        }
    }
}
