// File: crates/linegraph-core/src/config.rs
// Summary: Serde description of static graph props, loaded from JSON and validated into a LineGraph.

use serde::Deserialize;
use tracing::debug;

use crate::axis::{AxisConfig, AxisLabel, LabelOffset};
use crate::curve::CurveChoice;
use crate::error::{GraphError, Result};
use crate::format::{Locale, TickFormat};
use crate::graph::{LineGraph, TitleBlock};
use crate::grid::{GridExtend, StrokeStyle};
use crate::point::{DotProps, DotStyle, LineProps, LineStyle};
use crate::scene::Color;
use crate::series::{DataKind, DataValue, Datum};
use crate::text::{TextAnchor, TextStyleOverride};
use crate::theme;
use crate::types::{Padding, HEIGHT, WIDTH};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSpec {
    pub style: StrokeStyle,
    pub extend: GridExtend,
    pub width: Option<f32>,
    pub color: Option<Color>,
}

/// One axis. Unset fields keep the axis defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisSpec {
    /// Tick count; ignored when `labels` is given.
    pub ticks: Option<usize>,
    pub labels: Option<Vec<AxisLabel>>,
    /// Numeric or strftime specifier, by the axis' value kind.
    pub format: Option<String>,
    /// Static label offset `[dx, dy]`.
    pub offset: Option<[f32; 2]>,
    pub grid: GridSpec,
    pub range: Option<[DataValue; 2]>,
    pub nice: bool,
    pub text: TextStyleOverride,
    pub show_labels: bool,
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self {
            ticks: None,
            labels: None,
            format: None,
            offset: None,
            grid: GridSpec::default(),
            range: None,
            nice: false,
            text: TextStyleOverride::default(),
            show_labels: true,
        }
    }
}

impl AxisSpec {
    fn apply(self, mut axis: AxisConfig, kind: DataKind) -> Result<AxisConfig> {
        if let Some(labels) = self.labels {
            axis = axis.with_labels(labels);
        } else if let Some(n) = self.ticks {
            axis = axis.with_count(n);
        }
        if let Some(spec) = &self.format {
            axis.format = TickFormat::parse(spec, kind)?;
        }
        if let Some([dx, dy]) = self.offset {
            axis.offset = LabelOffset::Static { dx, dy };
        }
        axis.grid.style = self.grid.style;
        axis.grid.extend = self.grid.extend;
        if let Some(w) = self.grid.width {
            axis.grid.width = w;
        }
        axis.grid.color = self.grid.color;
        axis.range = self.range.map(|[lo, hi]| (lo, hi));
        axis.nice = self.nice;
        axis.text = self.text;
        axis.show_labels = self.show_labels;
        Ok(axis)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DotSpec {
    pub hidden: bool,
    #[serde(flatten)]
    pub props: DotProps,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineSpec {
    pub hidden: bool,
    /// Interpolation name, e.g. `monotoneX`.
    pub curve: String,
    #[serde(flatten)]
    pub props: LineProps,
}

impl Default for LineSpec {
    fn default() -> Self { Self { hidden: false, curve: "linear".into(), props: LineProps::default() } }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleSpec {
    pub title: String,
    pub subtitle: Option<String>,
    pub anchor: TextAnchor,
    pub title_style: TextStyleOverride,
    pub subtitle_style: TextStyleOverride,
}

/// Everything about a graph that can be written down without code.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
    pub data: Vec<Datum>,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub dots: DotSpec,
    pub line: LineSpec,
    pub title: Option<TitleSpec>,
    /// Theme preset name; unknown names fall back to `dark`.
    pub theme: Option<String>,
    pub locale: Locale,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            padding: Padding::default(),
            data: Vec::new(),
            x_axis: AxisSpec::default(),
            y_axis: AxisSpec::default(),
            dots: DotSpec::default(),
            line: LineSpec::default(),
            title: None,
            theme: None,
            locale: Locale::default(),
        }
    }
}

fn axis_kind(first: Option<DataValue>, spec: &AxisSpec) -> DataKind {
    first
        .or_else(|| spec.range.map(|[lo, _]| lo))
        .or_else(|| spec.labels.as_ref().and_then(|l| l.first()).map(|l| l.value))
        .map(|v| v.kind())
        .unwrap_or(DataKind::Number)
}

impl GraphConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Validate and build the graph props.
    pub fn into_graph(self) -> Result<LineGraph> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(GraphError::InvalidSize { width: self.width, height: self.height });
        }
        let curve = CurveChoice::named(&self.line.curve)?;
        let x_kind = axis_kind(self.data.first().map(|d| d.x), &self.x_axis);
        let y_kind = axis_kind(self.data.first().map(|d| d.y), &self.y_axis);
        let x_axis = self.x_axis.apply(AxisConfig::x(), x_kind)?;
        let y_axis = self.y_axis.apply(AxisConfig::y(), y_kind)?;
        let theme = self.theme.as_deref().map(theme::find).unwrap_or_default();
        debug!(points = self.data.len(), theme = theme.name, curve = %self.line.curve, "graph config");

        let mut graph = LineGraph::new(self.data)
            .with_size(self.width, self.height)
            .with_padding(self.padding)
            .with_x_axis(x_axis)
            .with_y_axis(y_axis)
            .with_curve(curve)
            .with_theme(theme)
            .with_locale(self.locale);
        graph.dots = if self.dots.hidden { DotStyle::Hidden } else { DotStyle::Static(self.dots.props) };
        graph.line = if self.line.hidden { LineStyle::Hidden } else { LineStyle::Static(self.line.props) };
        if let Some(t) = self.title {
            graph.title = Some(TitleBlock {
                title: t.title,
                subtitle: t.subtitle,
                anchor: t.anchor,
                title_style: t.title_style,
                subtitle_style: t.subtitle_style,
            });
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::TickSource;
    use crate::curve::Curve;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = GraphConfig::from_json_str(r#"{ "data": [{"x": 0, "y": 1}] }"#).unwrap();
        assert_eq!(cfg.width, WIDTH);
        let g = cfg.into_graph().unwrap();
        assert!(matches!(g.curve, CurveChoice::Named(Curve::Linear)));
        assert_eq!(g.x_axis.ticks, TickSource::Count(5));
    }

    #[test]
    fn date_axis_takes_strftime_format() {
        let json = r#"{
            "data": [{"x": "2024-01-01T00:00:00Z", "y": 1}, {"x": "2024-02-01T00:00:00Z", "y": 2}],
            "xAxis": { "format": "%b %d", "grid": { "style": "dashed", "extend": { "start": 4 } } },
            "yAxis": { "format": ",.1f", "range": [0, 10], "nice": true }
        }"#;
        let g = GraphConfig::from_json_str(json).unwrap().into_graph().unwrap();
        assert!(matches!(g.x_axis.format, TickFormat::Time(ref p) if p == "%b %d"));
        assert_eq!(g.x_axis.grid.style, StrokeStyle::Dashed);
        assert_eq!(g.x_axis.grid.extend.start, 4.0);
        assert!(g.y_axis.nice);
    }

    #[test]
    fn bad_inputs_are_reported() {
        let unknown = r#"{ "line": { "curve": "wiggly" } }"#;
        assert!(matches!(
            GraphConfig::from_json_str(unknown).unwrap().into_graph(),
            Err(GraphError::UnknownCurve(name)) if name == "wiggly"
        ));
        let bad_fmt = r#"{ "yAxis": { "format": ".q" } }"#;
        assert!(matches!(GraphConfig::from_json_str(bad_fmt).unwrap().into_graph(), Err(GraphError::Format { .. })));
        let size = r#"{ "width": -1 }"#;
        assert!(matches!(GraphConfig::from_json_str(size).unwrap().into_graph(), Err(GraphError::InvalidSize { .. })));
        assert!(matches!(GraphConfig::from_json_str("{"), Err(GraphError::Json(_))));
    }

    #[test]
    fn hidden_dots_and_line_styles() {
        let json = r#"{ "dots": { "hidden": true }, "line": { "curve": "monotone-x", "width": 3, "style": "dotted" } }"#;
        let g = GraphConfig::from_json_str(json).unwrap().into_graph().unwrap();
        assert!(matches!(g.dots, DotStyle::Hidden));
        match g.line {
            LineStyle::Static(p) => {
                assert_eq!(p.width, 3.0);
                assert_eq!(p.style, StrokeStyle::Dotted);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
