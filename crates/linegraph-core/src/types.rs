// File: crates/linegraph-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings).

use serde::{Deserialize, Serialize};

/// Default graph width in pixels.
pub const WIDTH: f32 = 320.0;
/// Default graph height in pixels.
pub const HEIGHT: f32 = 200.0;

/// Space between the surface edge and the chart area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }
    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::new(40.0, 16.0, 16.0, 28.0)
    }
}
