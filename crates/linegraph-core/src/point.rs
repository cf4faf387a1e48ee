// File: crates/linegraph-core/src/point.rs
// Summary: Per-point projection plus dot and line styling into scene shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::curve::CurveChoice;
use crate::geometry::Point;
use crate::grid::StrokeStyle;
use crate::scale::ScalePair;
use crate::scene::{CircleShape, Color, Path, PathShape, Shape, Stroke};
use crate::series::Datum;
use crate::theme::Theme;

/// A datum with its index and projected pixel position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlotPoint {
    pub index: usize,
    pub datum: Datum,
    pub pixel: Point,
}

/// Project every datum through the scale pair, keeping input order.
pub fn project(data: &[Datum], scales: &ScalePair) -> Vec<PlotPoint> {
    data.iter()
        .enumerate()
        .map(|(index, datum)| PlotPoint {
            index,
            datum: *datum,
            pixel: Point::new(scales.x.map(&datum.x), scales.y.map(&datum.y)),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DotProps {
    pub radius: f32,
    /// Theme dot color when unset.
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
}

impl Default for DotProps {
    fn default() -> Self { Self { radius: 3.0, fill: None, stroke: None, stroke_width: 1.0 } }
}

pub enum DotStyle {
    Hidden,
    Static(DotProps),
    Computed(Box<dyn Fn(&PlotPoint) -> DotProps>),
    /// Replaces the default circle; `None` skips the point.
    Element(Box<dyn Fn(&PlotPoint) -> Option<Shape>>),
}

impl DotStyle {
    pub fn computed(f: impl Fn(&PlotPoint) -> DotProps + 'static) -> Self {
        DotStyle::Computed(Box::new(f))
    }

    pub fn element(f: impl Fn(&PlotPoint) -> Option<Shape> + 'static) -> Self {
        DotStyle::Element(Box::new(f))
    }
}

impl Default for DotStyle {
    fn default() -> Self { DotStyle::Static(DotProps::default()) }
}

impl fmt::Debug for DotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DotStyle::Hidden => f.write_str("Hidden"),
            DotStyle::Static(p) => f.debug_tuple("Static").field(p).finish(),
            DotStyle::Computed(_) => f.write_str("Computed(..)"),
            DotStyle::Element(_) => f.write_str("Element(..)"),
        }
    }
}

fn circle(p: &PlotPoint, props: &DotProps, theme: &Theme) -> Shape {
    Shape::Circle(CircleShape {
        center: p.pixel,
        radius: props.radius,
        fill: Some(props.fill.unwrap_or(theme.dot_fill)),
        stroke: props.stroke.map(|c| Stroke::solid(c, props.stroke_width)),
    })
}

/// One shape per visible dot, in data order.
pub fn render_dots(points: &[PlotPoint], style: &DotStyle, theme: &Theme) -> Vec<Shape> {
    match style {
        DotStyle::Hidden => Vec::new(),
        DotStyle::Static(props) => points.iter().map(|p| circle(p, props, theme)).collect(),
        DotStyle::Computed(f) => points.iter().map(|p| circle(p, &f(p), theme)).collect(),
        DotStyle::Element(f) => points.iter().filter_map(|p| f(p)).collect(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineProps {
    /// Theme line color when unset.
    pub stroke: Option<Color>,
    pub width: f32,
    pub style: StrokeStyle,
    /// Area under the path is not closed; the fill follows the path as drawn.
    pub fill: Option<Color>,
}

impl Default for LineProps {
    fn default() -> Self { Self { stroke: None, width: 2.0, style: StrokeStyle::Solid, fill: None } }
}

pub enum LineStyle {
    Hidden,
    Static(LineProps),
    Computed(Box<dyn Fn(&[PlotPoint]) -> LineProps>),
    /// Replaces the default path shape; receives the interpolated path.
    Element(Box<dyn Fn(&[PlotPoint], &Path) -> Option<Shape>>),
}

impl LineStyle {
    pub fn computed(f: impl Fn(&[PlotPoint]) -> LineProps + 'static) -> Self {
        LineStyle::Computed(Box::new(f))
    }

    pub fn element(f: impl Fn(&[PlotPoint], &Path) -> Option<Shape> + 'static) -> Self {
        LineStyle::Element(Box::new(f))
    }
}

impl Default for LineStyle {
    fn default() -> Self { LineStyle::Static(LineProps::default()) }
}

impl fmt::Debug for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStyle::Hidden => f.write_str("Hidden"),
            LineStyle::Static(p) => f.debug_tuple("Static").field(p).finish(),
            LineStyle::Computed(_) => f.write_str("Computed(..)"),
            LineStyle::Element(_) => f.write_str("Element(..)"),
        }
    }
}

fn path_shape(path: Path, props: &LineProps, theme: &Theme) -> Shape {
    // StrokeStyle::None keeps the fill but drops the outline.
    let stroke = props.style.pattern(props.width).map(|dash| Stroke {
        color: props.stroke.unwrap_or(theme.line_stroke),
        width: props.width,
        dash,
    });
    Shape::Path(PathShape { path, stroke, fill: props.fill })
}

/// The connecting line through all points, or `None` when hidden or empty.
pub fn render_line(points: &[PlotPoint], style: &LineStyle, curve: &CurveChoice, theme: &Theme) -> Option<Shape> {
    if matches!(style, LineStyle::Hidden) || points.is_empty() {
        return None;
    }
    let pixels: Vec<Point> = points.iter().map(|p| p.pixel).collect();
    let path = curve.build(&pixels);
    match style {
        LineStyle::Hidden => None,
        LineStyle::Static(props) => Some(path_shape(path, props, theme)),
        LineStyle::Computed(f) => Some(path_shape(path, &f(points), theme)),
        LineStyle::Element(f) => f(points, &path),
    }
}
