// File: crates/linegraph-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }
    pub fn is_finite(&self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self { Self { x, y } }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    /// Inclusive containment with a small tolerance for float rounding.
    pub fn contains(&self, p: Point) -> bool {
        const EPS: f32 = 1e-3;
        p.x >= self.left - EPS && p.x <= self.right + EPS && p.y >= self.top - EPS && p.y <= self.bottom + EPS
    }
}
