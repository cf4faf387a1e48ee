// File: crates/linegraph-core/src/graph.rs
// Summary: LineGraph props and the render pass producing a renderer-agnostic scene.

use tracing::{debug, trace};

use crate::axis::{build_ticks, AxisConfig, AxisOrient, AxisTick};
use crate::curve::CurveChoice;
use crate::error::{GraphError, Result};
use crate::format::Locale;
use crate::geometry::{Point, Rect};
use crate::plugin::Overlay;
use crate::point::{project, render_dots, render_line, DotStyle, LineStyle, PlotPoint};
use crate::scale::{infer_domain, AxisScale, Range, ScaleKind, ScalePair};
use crate::scene::{GraphScene, Shape};
use crate::series::{DataValue, Datum};
use crate::text::{ComposedText, TextAnchor, TextStyle, TextStyleOverride};
use crate::theme::Theme;
use crate::types::{Padding, HEIGHT, WIDTH};

/// Surface size and the chart area inside the padding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
    pub plot: Rect,
}

impl Frame {
    pub fn new(width: f32, height: f32, padding: Padding) -> Self {
        let plot = Rect::from_ltrb(padding.left, padding.top, width - padding.right, height - padding.bottom);
        Self { width, height, padding, plot }
    }

    /// Pixel range of the x scale: left to right.
    pub fn x_range(&self) -> Range { (self.plot.left, self.plot.right) }

    /// Pixel range of the y scale: bottom to top, so larger values sit higher.
    pub fn y_range(&self) -> Range { (self.plot.bottom, self.plot.top) }
}

/// Title and optional subtitle drawn inside the top padding.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleBlock {
    pub title: String,
    pub subtitle: Option<String>,
    pub anchor: TextAnchor,
    pub title_style: TextStyleOverride,
    pub subtitle_style: TextStyleOverride,
}

impl TitleBlock {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            anchor: TextAnchor::Start,
            title_style: TextStyleOverride::default(),
            subtitle_style: TextStyleOverride::default(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    fn compose(&self, frame: &Frame, theme: &Theme) -> ComposedText {
        let x = match self.anchor {
            TextAnchor::Start => frame.plot.left,
            TextAnchor::Middle => (frame.plot.left + frame.plot.right) / 2.0,
            TextAnchor::End => frame.plot.right,
        };
        let base = TextStyle { font_size: 11.0, color: theme.title, anchor: self.anchor, bold: false, mono_numeric: false };
        let title = TextStyleOverride { font_size: Some(14.0), bold: Some(true), ..TextStyleOverride::default() };
        let title = merge_override(title, self.title_style);
        let mut text = ComposedText::new(Point::new(x, 2.0), base).push(self.title.clone(), title);
        if let Some(sub) = &self.subtitle {
            text = text.push(sub.clone(), self.subtitle_style);
        }
        text
    }
}

fn merge_override(base: TextStyleOverride, top: TextStyleOverride) -> TextStyleOverride {
    TextStyleOverride {
        font_size: top.font_size.or(base.font_size),
        color: top.color.or(base.color),
        anchor: top.anchor.or(base.anchor),
        bold: top.bold.or(base.bold),
    }
}

/// Line graph props. Everything is recomputed on each `render`.
pub struct LineGraph {
    pub data: Vec<Datum>,
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub dots: DotStyle,
    pub line: LineStyle,
    pub curve: CurveChoice,
    pub title: Option<TitleBlock>,
    pub theme: Theme,
    pub locale: Locale,
    pub overlays: Vec<Box<dyn Overlay>>,
}

impl LineGraph {
    pub fn new(data: Vec<Datum>) -> Self {
        Self {
            data,
            width: WIDTH,
            height: HEIGHT,
            padding: Padding::default(),
            x_axis: AxisConfig::x(),
            y_axis: AxisConfig::y(),
            dots: DotStyle::default(),
            line: LineStyle::default(),
            curve: CurveChoice::default(),
            title: None,
            theme: Theme::default(),
            locale: Locale::default(),
            overlays: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    pub fn with_dots(mut self, dots: DotStyle) -> Self {
        self.dots = dots;
        self
    }

    pub fn with_line(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    pub fn with_curve(mut self, curve: CurveChoice) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_title(mut self, title: TitleBlock) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_overlay(mut self, overlay: impl Overlay + 'static) -> Self {
        self.overlays.push(Box::new(overlay));
        self
    }

    pub fn frame(&self) -> Frame { Frame::new(self.width, self.height, self.padding) }

    /// Build the x and y scales from data, visible ranges and nicing.
    pub fn scales(&self) -> Result<ScalePair> {
        let frame = self.frame();
        let x = axis_scale(&self.x_axis, self.data.first().map(|d| d.x), self.data.iter().map(|d| d.x), frame.x_range())?;
        let y = axis_scale(&self.y_axis, self.data.first().map(|d| d.y), self.data.iter().map(|d| d.y), frame.y_range())?;
        Ok(ScalePair { x, y })
    }

    /// Tick labels (and gridlines) for both axes.
    pub fn ticks(&self, scales: &ScalePair) -> (Vec<AxisTick>, Vec<AxisTick>) {
        let plot = self.frame().plot;
        (
            build_ticks(AxisOrient::X, &self.x_axis, scales, &plot, &self.locale, &self.theme),
            build_ticks(AxisOrient::Y, &self.y_axis, scales, &plot, &self.locale, &self.theme),
        )
    }

    /// Data projected to pixel space.
    pub fn points(&self, scales: &ScalePair) -> Vec<PlotPoint> { project(&self.data, scales) }

    /// Run the full pipeline. Paint order: gridlines, line, dots, tick labels, title, overlays.
    pub fn render(&self) -> Result<GraphScene> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(GraphError::InvalidSize { width: self.width, height: self.height });
        }
        let frame = self.frame();
        let scales = self.scales()?;
        let (x_ticks, y_ticks) = self.ticks(&scales);
        let points = self.points(&scales);
        trace!(points = points.len(), x_ticks = x_ticks.len(), y_ticks = y_ticks.len(), "projected");

        let mut shapes = Vec::new();
        let grid: Vec<Shape> = x_ticks
            .iter()
            .chain(&y_ticks)
            .filter_map(|t| t.gridline.as_ref().map(|g| Shape::Line(g.to_shape())))
            .collect();
        if !grid.is_empty() {
            shapes.push(Shape::Group(grid));
        }
        if let Some(line) = render_line(&points, &self.line, &self.curve, &self.theme) {
            shapes.push(line);
        }
        let dots = render_dots(&points, &self.dots, &self.theme);
        if !dots.is_empty() {
            shapes.push(Shape::Group(dots));
        }
        let mut labels = Vec::new();
        if self.x_axis.show_labels {
            labels.extend(x_ticks.iter().map(|t| Shape::Text(t.to_shape())));
        }
        if self.y_axis.show_labels {
            labels.extend(y_ticks.iter().map(|t| Shape::Text(t.to_shape())));
        }
        if !labels.is_empty() {
            shapes.push(Shape::Group(labels));
        }
        if let Some(title) = &self.title {
            shapes.push(Shape::Group(title.compose(&frame, &self.theme).layout().into_iter().map(Shape::Text).collect()));
        }
        for overlay in &self.overlays {
            let extra = overlay.compute(&scales, &frame);
            trace!(id = overlay.id(), shapes = extra.len(), "overlay");
            if !extra.is_empty() {
                shapes.push(Shape::Group(extra));
            }
        }

        Ok(GraphScene { width: self.width, height: self.height, background: self.theme.background, shapes })
    }
}

fn axis_scale(
    config: &AxisConfig,
    first: Option<DataValue>,
    values: impl Iterator<Item = DataValue>,
    range: Range,
) -> Result<AxisScale> {
    let kind: ScaleKind = match (first, &config.range) {
        (Some(v), _) => v.kind().into(),
        (None, Some((lo, _))) => lo.kind().into(),
        (None, None) => return Err(GraphError::EmptyData),
    };
    let domain = match &config.range {
        Some((lo, hi)) => (lo.as_f64(), hi.as_f64()),
        // All-NaN input keeps NaN bounds so coordinates degrade to NaN.
        None => infer_domain(values.map(|v| v.as_f64())).unwrap_or((f64::NAN, f64::NAN)),
    };
    let mut scale = AxisScale::new(kind, domain, range);
    if config.nice {
        scale = scale.nice(config.nice_count());
    }
    debug!(?kind, ?domain, nice = config.nice, "axis scale");
    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleTransform;
    use crate::series::from_pairs;

    #[test]
    fn frame_plot_rect() {
        let f = Frame::new(100.0, 80.0, Padding::new(10.0, 5.0, 4.0, 6.0));
        assert_eq!(f.plot, Rect::from_ltrb(10.0, 4.0, 95.0, 74.0));
        assert_eq!(f.y_range(), (74.0, 4.0));
    }

    #[test]
    fn empty_data_without_range_is_an_error() {
        assert!(matches!(LineGraph::new(Vec::new()).scales(), Err(GraphError::EmptyData)));
    }

    #[test]
    fn range_alone_builds_scales() {
        let g = LineGraph::new(Vec::new())
            .with_x_axis(AxisConfig::x().with_range(0.0, 1.0))
            .with_y_axis(AxisConfig::y().with_range(-1.0, 1.0));
        let s = g.scales().unwrap();
        assert_eq!(s.y.domain(), (-1.0, 1.0));
    }

    #[test]
    fn invalid_size_rejected() {
        let g = LineGraph::new(from_pairs(&[(0.0, 0.0)])).with_size(0.0, 10.0);
        assert!(matches!(g.render(), Err(GraphError::InvalidSize { .. })));
    }

    #[test]
    fn title_overrides_win() {
        let mut t = TitleBlock::new("T");
        t.title_style.font_size = Some(20.0);
        let frame = Frame::new(100.0, 100.0, Padding::uniform(0.0));
        let shapes = t.compose(&frame, &Theme::light()).layout();
        assert_eq!(shapes[0].style.font_size, 20.0);
        assert!(shapes[0].style.bold);
    }
}
