//! Movement and map clamping
//!
//! Raw input deltas are clamped per axis so the moved box never leaves
//! the map. The player's facing comes from the raw intent, so walking into
//! a wall still turns the player toward it.

use super::collision::Collider;
use super::entities::{Direction, Player};
use super::geometry::Bounds;
use macroquad::math::Vec2;

/// Region entities may occupy: the canvas minus a margin on every side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapLimits {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl MapLimits {
    pub fn from_canvas(width: f32, height: f32, margin: f32) -> Self {
        Self {
            left: margin,
            top: margin,
            right: width - margin,
            bottom: height - margin,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn as_bounds(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.width(), self.height())
    }

    /// True if `bounds` lies fully inside the limits
    pub fn contains(&self, bounds: &Bounds) -> bool {
        self.as_bounds().contains_bounds(bounds)
    }
}

/// New start coordinate of a `size`-long span at `pos` moved by `raw`
/// inside `[lo, hi]`.
///
/// The result is clamped as a position, not as a delta, so it lands
/// exactly on `lo` or `hi - size` when the move is cut short. A span
/// already past a boundary is never pushed further out. Never panics.
fn clamp_axis(pos: f32, raw: f32, size: f32, lo: f32, hi: f32) -> f32 {
    let max = hi - size;
    if raw < 0.0 {
        if pos < lo {
            pos
        } else {
            (pos + raw).max(lo)
        }
    } else if raw > 0.0 {
        if pos > max {
            pos
        } else {
            (pos + raw).min(max)
        }
    } else {
        pos
    }
}

/// Top-left corner of `bounds` after moving it by at most
/// `(raw_dx, raw_dy)` without leaving `limits`, per axis
pub fn clamped_position(bounds: &Bounds, raw_dx: f32, raw_dy: f32, limits: &MapLimits) -> (f32, f32) {
    (
        clamp_axis(bounds.x, raw_dx, bounds.w, limits.left, limits.right),
        clamp_axis(bounds.y, raw_dy, bounds.h, limits.top, limits.bottom),
    )
}

/// Largest displacement not exceeding `(raw_dx, raw_dy)` that keeps
/// `bounds` inside `limits`, computed independently per axis
pub fn clamped_delta(bounds: &Bounds, raw_dx: f32, raw_dy: f32, limits: &MapLimits) -> (f32, f32) {
    let (x, y) = clamped_position(bounds, raw_dx, raw_dy, limits);
    (x - bounds.x, y - bounds.y)
}

/// Facing implied by an input intent.
///
/// Priority: left, right, up, down. `None` when there is no intent.
pub fn intended_direction(raw_dx: f32, raw_dy: f32) -> Option<Direction> {
    if raw_dx < 0.0 {
        Some(Direction::Left)
    } else if raw_dx > 0.0 {
        Some(Direction::Right)
    } else if raw_dy < 0.0 {
        Some(Direction::Up)
    } else if raw_dy > 0.0 {
        Some(Direction::Down)
    } else {
        None
    }
}

impl Player {
    /// Move by the clamped version of `(raw_dx, raw_dy)` and update facing
    /// and the `moving` flag. Returns the delta actually applied.
    pub fn apply_movement(&mut self, raw_dx: f32, raw_dy: f32, limits: &MapLimits) -> (f32, f32) {
        if let Some(direction) = intended_direction(raw_dx, raw_dy) {
            self.pose.direction = direction;
        }

        let old = self.body.position;
        let (x, y) = clamped_position(&self.bounds(), raw_dx, raw_dy, limits);
        self.body.position = Vec2::new(x, y);
        let (dx, dy) = (x - old.x, y - old.y);
        self.pose.moving = dx != 0.0 || dy != 0.0;
        (dx, dy)
    }
}
