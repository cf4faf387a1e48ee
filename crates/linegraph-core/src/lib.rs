// File: crates/linegraph-core/src/lib.rs
// Summary: Core library entry point; exports the LineGraph props, scales, ticks and scene types.

pub mod axis;
pub mod config;
pub mod curve;
pub mod error;
pub mod format;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod plugin;
pub mod point;
pub mod scale;
pub mod scene;
pub mod series;
pub mod text;
pub mod theme;
pub mod time;
pub mod types;

pub use axis::{AxisConfig, AxisLabel, AxisOrient, AxisTick, LabelOffset, TickSource};
pub use config::GraphConfig;
pub use curve::{Curve, CurveChoice, CurveFactory};
pub use error::{GraphError, Result};
pub use format::{Locale, NumberFormat, TickFormat};
pub use geometry::{Point, Rect};
pub use graph::{Frame, LineGraph, TitleBlock};
pub use grid::{GridConfig, GridExtend, GridLine, StrokeStyle};
pub use plugin::{GuideLineOverlay, Overlay};
pub use point::{DotProps, DotStyle, LineProps, LineStyle, PlotPoint};
pub use scale::{AxisScale, LinearScale, ScaleKind, ScalePair, ScaleTransform, TimeScale};
pub use scene::{Color, GraphScene, Path, PathCommand, Shape, Stroke};
pub use series::{DataKind, DataValue, Datum};
pub use text::{ComposedText, TextAnchor, TextStyle, TextStyleOverride};
pub use theme::Theme;
pub use types::Padding;
