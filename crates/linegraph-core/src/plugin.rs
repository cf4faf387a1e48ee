// File: crates/linegraph-core/src/plugin.rs
// Summary: Overlay trait (render callback) and a built-in horizontal guide line overlay.

use crate::geometry::Point;
use crate::graph::Frame;
use crate::grid::StrokeStyle;
use crate::scale::{ScalePair, ScaleTransform};
use crate::scene::{Color, LineShape, Shape, Stroke, TextShape};
use crate::series::DataValue;
use crate::text::{TextAnchor, TextStyle};

/// Extra drawing on top of a graph, computed from the scales of the current render.
pub trait Overlay {
    fn id(&self) -> &'static str;
    /// Shapes to draw after the graph's own shapes, in pixel space.
    fn compute(&self, scales: &ScalePair, frame: &Frame) -> Vec<Shape>;
}

impl<F> Overlay for F
where
    F: Fn(&ScalePair, &Frame) -> Vec<Shape>,
{
    fn id(&self) -> &'static str { "render_callback" }
    fn compute(&self, scales: &ScalePair, frame: &Frame) -> Vec<Shape> { self(scales, frame) }
}

/// Horizontal reference line at `y`, spanning the x domain.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideLineOverlay {
    pub y: DataValue,
    pub color: Color,
    pub width: f32,
    pub style: StrokeStyle,
    /// Drawn at the right end, just above the line.
    pub label: Option<String>,
}

impl GuideLineOverlay {
    pub fn new(y: impl Into<DataValue>) -> Self {
        Self { y: y.into(), color: Color::rgb(220, 80, 60), width: 1.0, style: StrokeStyle::Dashed, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }
}

impl Overlay for GuideLineOverlay {
    fn id(&self) -> &'static str { "guide_line" }

    fn compute(&self, scales: &ScalePair, _frame: &Frame) -> Vec<Shape> {
        let Some(dash) = self.style.pattern(self.width) else { return Vec::new() };
        let (x0, x1) = scales.x.domain();
        let y = scales.y.map(&self.y);
        let from = Point::new(scales.x.to_px(x0), y);
        let to = Point::new(scales.x.to_px(x1), y);
        let mut out = vec![Shape::Line(LineShape { from, to, stroke: Stroke { color: self.color, width: self.width, dash } })];
        if let Some(label) = &self.label {
            let style = TextStyle { color: self.color, anchor: TextAnchor::End, ..TextStyle::default() };
            out.push(Shape::Text(TextShape { text: label.clone(), origin: Point::new(from.x.max(to.x), y - 3.0), style }));
        }
        out
    }
}
