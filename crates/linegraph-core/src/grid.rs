// File: crates/linegraph-core/src/grid.rs
// Summary: Gridline layout helpers: stroke patterns and per-tick perpendicular lines.

use serde::{Deserialize, Serialize};

use crate::axis::AxisOrient;
use crate::geometry::{Point, Rect};
use crate::scale::ScalePair;
use crate::scene::{Color, LineShape, Stroke};
use crate::series::DataValue;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    Solid,
    Dashed,
    Dotted,
    #[default]
    None,
}

impl StrokeStyle {
    /// Dash intervals for a stroke of `width`; `None` when nothing should be drawn.
    pub fn pattern(self, width: f32) -> Option<Vec<f32>> {
        let w = width.max(0.5);
        match self {
            StrokeStyle::Solid => Some(Vec::new()),
            StrokeStyle::Dashed => Some(vec![4.0 * w, 4.0 * w]),
            StrokeStyle::Dotted => Some(vec![w, 2.0 * w]),
            StrokeStyle::None => None,
        }
    }
}

/// Pixels a gridline runs past the chart area at its start and end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridExtend {
    pub start: f32,
    pub end: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub style: StrokeStyle,
    pub extend: GridExtend,
    pub width: f32,
    /// Theme grid color when unset.
    pub color: Option<Color>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { style: StrokeStyle::None, extend: GridExtend::default(), width: 1.0, color: None }
    }
}

/// One end of a gridline in both coordinate systems.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GridPoint {
    pub domain: (DataValue, DataValue),
    pub pixel: Point,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridLine {
    pub start: GridPoint,
    pub end: GridPoint,
    pub stroke: Stroke,
}

impl GridLine {
    pub fn to_shape(&self) -> LineShape {
        LineShape { from: self.start.pixel, to: self.end.pixel, stroke: self.stroke.clone() }
    }
}

/// Line through a tick at `value` (pixel `position`), perpendicular to its axis.
/// X ticks produce vertical lines from the bottom edge up; Y ticks horizontal lines left to right.
pub fn gridline(
    orient: AxisOrient,
    value: DataValue,
    position: f32,
    plot: &Rect,
    scales: &ScalePair,
    config: &GridConfig,
    default_color: Color,
) -> Option<GridLine> {
    let dash = config.style.pattern(config.width)?;
    let stroke = Stroke { color: config.color.unwrap_or(default_color), width: config.width, dash };
    let ext = config.extend;
    let (start, end) = match orient {
        AxisOrient::X => {
            let y0 = plot.bottom + ext.start;
            let y1 = plot.top - ext.end;
            (
                GridPoint { domain: (value, scales.y.invert_value(y0)), pixel: Point::new(position, y0) },
                GridPoint { domain: (value, scales.y.invert_value(y1)), pixel: Point::new(position, y1) },
            )
        }
        AxisOrient::Y => {
            let x0 = plot.left - ext.start;
            let x1 = plot.right + ext.end;
            (
                GridPoint { domain: (scales.x.invert_value(x0), value), pixel: Point::new(x0, position) },
                GridPoint { domain: (scales.x.invert_value(x1), value), pixel: Point::new(x1, position) },
            )
        }
    };
    Some(GridLine { start, end, stroke })
}
