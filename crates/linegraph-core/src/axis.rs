// File: crates/linegraph-core/src/axis.rs
// Summary: Axis decoration model (labels or counts, formats, offsets) and tick generation.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::format::{format_time, Locale, NumberFormat, TickFormat};
use crate::geometry::{Point, Rect};
use crate::grid::{gridline, GridConfig, GridLine, StrokeStyle};
use crate::scale::{AxisScale, ScalePair, ScaleTransform};
use crate::scene::TextShape;
use crate::series::DataValue;
use crate::text::{TextAnchor, TextStyle, TextStyleOverride};
use crate::theme::Theme;
use crate::time;

/// Default number of ticks requested from a scale.
pub const DEFAULT_TICK_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AxisOrient {
    X,
    Y,
}

/// A domain value to mark, with optional display text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub value: DataValue,
    #[serde(default)]
    pub text: Option<String>,
}

impl AxisLabel {
    pub fn new(value: impl Into<DataValue>) -> Self {
        Self { value: value.into(), text: None }
    }

    pub fn with_text(value: impl Into<DataValue>, text: impl Into<String>) -> Self {
        Self { value: value.into(), text: Some(text.into()) }
    }
}

/// Where tick values come from.
#[derive(Clone, Debug, PartialEq)]
pub enum TickSource {
    /// Let the scale place about this many ticks.
    Count(usize),
    Labels(Vec<AxisLabel>),
}

impl Default for TickSource {
    fn default() -> Self { TickSource::Count(DEFAULT_TICK_COUNT) }
}

/// Pixel shift applied to a label's origin.
pub enum LabelOffset {
    Static { dx: f32, dy: f32 },
    /// Computed from the label and its index.
    Computed(Box<dyn Fn(&AxisLabel, usize) -> (f32, f32)>),
}

impl LabelOffset {
    pub fn computed(f: impl Fn(&AxisLabel, usize) -> (f32, f32) + 'static) -> Self {
        LabelOffset::Computed(Box::new(f))
    }

    pub fn resolve(&self, label: &AxisLabel, index: usize) -> (f32, f32) {
        match self {
            LabelOffset::Static { dx, dy } => (*dx, *dy),
            LabelOffset::Computed(f) => f(label, index),
        }
    }
}

impl fmt::Debug for LabelOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelOffset::Static { dx, dy } => f.debug_struct("Static").field("dx", dx).field("dy", dy).finish(),
            LabelOffset::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Decorations for one axis.
#[derive(Debug)]
pub struct AxisConfig {
    pub ticks: TickSource,
    pub format: TickFormat,
    pub offset: LabelOffset,
    pub grid: GridConfig,
    /// Visible range; overrides the range inferred from data.
    pub range: Option<(DataValue, DataValue)>,
    pub nice: bool,
    pub text: TextStyleOverride,
    pub show_labels: bool,
}

impl AxisConfig {
    /// Horizontal axis: labels centred below the chart area.
    pub fn x() -> Self {
        Self {
            ticks: TickSource::default(),
            format: TickFormat::Auto,
            offset: LabelOffset::Static { dx: 0.0, dy: 14.0 },
            grid: GridConfig::default(),
            range: None,
            nice: false,
            text: TextStyleOverride::default(),
            show_labels: true,
        }
    }

    /// Vertical axis: labels right-aligned left of the chart area.
    pub fn y() -> Self {
        Self { offset: LabelOffset::Static { dx: -6.0, dy: 3.5 }, ..Self::x() }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.ticks = TickSource::Count(count);
        self
    }

    pub fn with_labels(mut self, labels: Vec<AxisLabel>) -> Self {
        self.ticks = TickSource::Labels(labels);
        self
    }

    pub fn with_format(mut self, format: TickFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_offset(mut self, offset: LabelOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_grid(mut self, style: StrokeStyle) -> Self {
        self.grid.style = style;
        self
    }

    pub fn with_range(mut self, lo: impl Into<DataValue>, hi: impl Into<DataValue>) -> Self {
        self.range = Some((lo.into(), hi.into()));
        self
    }

    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Tick count used for placement, nicing and label precision.
    pub fn tick_count(&self) -> usize {
        match &self.ticks {
            TickSource::Count(n) => *n,
            TickSource::Labels(l) => l.len().max(2),
        }
    }

    /// Count used when nicing the domain.
    pub fn nice_count(&self) -> usize {
        match &self.ticks {
            TickSource::Count(n) => *n,
            TickSource::Labels(_) => 10,
        }
    }
}

impl Default for AxisConfig {
    fn default() -> Self { Self::x() }
}

/// A positioned, formatted tick label and its gridline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisTick {
    pub value: DataValue,
    pub text: String,
    /// Pixel coordinate along the axis (x for X ticks, y for Y ticks).
    pub position: f32,
    /// Label baseline anchor, offset applied.
    pub origin: Point,
    pub style: TextStyle,
    pub gridline: Option<GridLine>,
}

impl AxisTick {
    pub fn to_shape(&self) -> TextShape {
        TextShape { text: self.text.clone(), origin: self.origin, style: self.style }
    }
}

enum Formatter<'a> {
    Number(NumberFormat),
    TimeAuto,
    Time(&'a str),
    Custom(&'a dyn Fn(&DataValue) -> String),
}

impl Formatter<'_> {
    fn apply(&self, v: &DataValue, locale: &Locale) -> String {
        match self {
            Formatter::Number(f) => f.format(v.as_f64(), locale),
            Formatter::TimeAuto => time::format_auto(v.as_f64().floor() as i64),
            Formatter::Time(p) => format_time(v, p),
            Formatter::Custom(f) => f(v),
        }
    }
}

fn formatter<'a>(config: &'a AxisConfig, scale: &AxisScale) -> Formatter<'a> {
    let (d0, d1) = scale.domain();
    let step = scale.tick_step(config.tick_count());
    let max_abs = d0.abs().max(d1.abs());
    match (&config.format, scale) {
        (TickFormat::Auto, AxisScale::Linear(_)) => Formatter::Number(NumberFormat::auto().with_step_precision(step, max_abs)),
        (TickFormat::Auto, AxisScale::Time(_)) => Formatter::TimeAuto,
        (TickFormat::Number(f), _) => Formatter::Number(f.clone().with_step_precision(step, max_abs)),
        (TickFormat::Time(p), _) => Formatter::Time(p.as_str()),
        (TickFormat::Custom(f), _) => Formatter::Custom(f.as_ref()),
    }
}

/// Lay out the ticks of one axis: position, text, style, offset and gridline.
pub fn build_ticks(
    orient: AxisOrient,
    config: &AxisConfig,
    scales: &ScalePair,
    plot: &Rect,
    locale: &Locale,
    theme: &Theme,
) -> Vec<AxisTick> {
    let scale = match orient {
        AxisOrient::X => &scales.x,
        AxisOrient::Y => &scales.y,
    };
    let labels: Vec<AxisLabel> = match &config.ticks {
        TickSource::Labels(l) => l.clone(),
        TickSource::Count(n) => scale.tick_values(*n).into_iter().map(AxisLabel::new).collect(),
    };
    let fmt = formatter(config, scale);
    let base = TextStyle {
        font_size: 10.0,
        color: theme.axis_label,
        anchor: match orient {
            AxisOrient::X => TextAnchor::Middle,
            AxisOrient::Y => TextAnchor::End,
        },
        bold: false,
        mono_numeric: true,
    };
    let style = base.merged(&config.text);
    trace!(?orient, count = labels.len(), "axis ticks");

    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let position = scale.map(&label.value);
            let (dx, dy) = config.offset.resolve(label, i);
            let origin = match orient {
                AxisOrient::X => Point::new(position + dx, plot.bottom + dy),
                AxisOrient::Y => Point::new(plot.left + dx, position + dy),
            };
            let text = match &label.text {
                Some(t) => t.clone(),
                None => fmt.apply(&label.value, locale),
            };
            let gridline = gridline(orient, label.value, position, plot, scales, &config.grid, theme.grid);
            AxisTick { value: label.value, text, position, origin, style, gridline }
        })
        .collect()
}
