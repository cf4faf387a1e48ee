// File: crates/linegraph-core/src/scale.rs
// Summary: Linear (value) and time scales mapping domain to pixels, with ticks and nicing.

use serde::Serialize;
use tracing::warn;

use crate::series::{DataKind, DataValue};
use crate::time;

/// Domain endpoints; dates are epoch milliseconds.
pub type Domain = (f64, f64);
/// Pixel endpoints the domain maps onto.
pub type Range = (f32, f32);

/// General scale transform operations shared by every scale kind.
pub trait ScaleTransform {
    fn domain(&self) -> Domain;
    fn range(&self) -> Range;
    fn to_px(&self, v: f64) -> f32;
    fn from_px(&self, px: f32) -> f64;
    fn ticks(&self, count: usize) -> Vec<f64>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScaleKind {
    Linear,
    Time,
}

impl From<DataKind> for ScaleKind {
    fn from(k: DataKind) -> Self {
        match k {
            DataKind::Number => ScaleKind::Linear,
            DataKind::Date => ScaleKind::Time,
        }
    }
}

// ---- tick arithmetic ---------------------------------------------------------

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

#[inline]
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Integer tick bounds `(i1, i2)` and increment. A negative increment means "divide by -inc".
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 { 10.0 } else if error >= E5 { 5.0 } else if error >= E2 { 2.0 } else { 1.0 };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let f = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * f);
        i2 = round_half_up(stop * f);
        if i1 / f < start { i1 += 1.0; }
        if i2 / f > stop { i2 -= 1.0; }
        inc = -f;
    } else {
        let f = 10f64.powf(power) * factor;
        i1 = round_half_up(start / f);
        i2 = round_half_up(stop / f);
        if i1 * f < start { i1 += 1.0; }
        if i2 * f > stop { i2 -= 1.0; }
        inc = f;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Signed increment for roughly `count` ticks over `[start, stop]`.
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    tick_spec(start, stop, count).2
}

/// Distance between adjacent ticks; negative when `stop < start`.
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let inc = if reverse { tick_increment(stop, start, count) } else { tick_increment(start, stop, count) };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Round-number ticks within `[start, stop]` (either order), at most about `count` of them.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 { return Vec::new(); }
    if start == stop { return vec![start]; }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse { tick_spec(stop, start, count as f64) } else { tick_spec(start, stop, count as f64) };
    if !(i2 >= i1) { return Vec::new(); }
    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|i| {
            let k = if reverse { i2 - i as f64 } else { i1 + i as f64 };
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect()
}

/// Extend `[d0, d1]` outward to multiples of the tick increment until it stabilizes.
pub fn nice_linear(d0: f64, d1: f64, count: usize) -> Domain {
    if !d0.is_finite() || !d1.is_finite() || d0 == d1 || count == 0 { return (d0, d1); }
    let reverse = d1 < d0;
    let (mut start, mut stop) = if reverse { (d1, d0) } else { (d0, d1) };
    let mut prestep = f64::NAN;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count as f64);
        if step == prestep {
            break;
        } else if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        prestep = step;
    }
    if reverse { (stop, start) } else { (start, stop) }
}

/// Extent of the finite values, ignoring NaN.
pub fn infer_domain(values: impl IntoIterator<Item = f64>) -> Option<Domain> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        if v.is_nan() { continue; }
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi { None } else { Some((lo, hi)) }
}

#[inline]
fn interpolate(domain: Domain, range: Range, v: f64) -> f32 {
    let span = domain.1 - domain.0;
    let t = if span != 0.0 { (v - domain.0) / span } else { 0.5 };
    (range.0 as f64 + t * (range.1 as f64 - range.0 as f64)) as f32
}

#[inline]
fn invert(domain: Domain, range: Range, px: f32) -> f64 {
    let span = range.1 as f64 - range.0 as f64;
    let t = if span != 0.0 { (px as f64 - range.0 as f64) / span } else { 0.5 };
    domain.0 + t * (domain.1 - domain.0)
}

// ---- scales ------------------------------------------------------------------

/// Continuous numeric scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LinearScale {
    domain: Domain,
    range: Range,
}

impl LinearScale {
    pub fn new(domain: Domain, range: Range) -> Self {
        Self { domain, range }
    }

    /// Same scale with its domain rounded outward to round tick values.
    pub fn nice(self, count: usize) -> Self {
        let domain = nice_linear(self.domain.0, self.domain.1, count);
        Self { domain, ..self }
    }

    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain.0, self.domain.1, count as f64)
    }
}

impl ScaleTransform for LinearScale {
    fn domain(&self) -> Domain { self.domain }
    fn range(&self) -> Range { self.range }
    #[inline]
    fn to_px(&self, v: f64) -> f32 { interpolate(self.domain, self.range, v) }
    #[inline]
    fn from_px(&self, px: f32) -> f64 { invert(self.domain, self.range, px) }
    fn ticks(&self, count: usize) -> Vec<f64> { ticks(self.domain.0, self.domain.1, count) }
}

/// UTC time scale; the domain is stored as epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeScale {
    domain: Domain,
    range: Range,
}

impl TimeScale {
    pub fn new(domain: Domain, range: Range) -> Self {
        Self { domain, range }
    }

    pub fn nice(self, count: usize) -> Self {
        let domain = time::time_nice(self.domain.0, self.domain.1, count);
        Self { domain, ..self }
    }
}

impl ScaleTransform for TimeScale {
    fn domain(&self) -> Domain { self.domain }
    fn range(&self) -> Range { self.range }
    #[inline]
    fn to_px(&self, v: f64) -> f32 { interpolate(self.domain, self.range, v) }
    #[inline]
    fn from_px(&self, px: f32) -> f64 { invert(self.domain, self.range, px) }
    fn ticks(&self, count: usize) -> Vec<f64> { time::time_ticks(self.domain.0, self.domain.1, count) }
}

/// The scale used by one axis of a graph.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum AxisScale {
    Linear(LinearScale),
    Time(TimeScale),
}

impl AxisScale {
    pub fn new(kind: ScaleKind, domain: Domain, range: Range) -> Self {
        if domain.0 == domain.1 {
            warn!(value = domain.0, "zero-span domain; values map to the range midpoint");
        }
        match kind {
            ScaleKind::Linear => AxisScale::Linear(LinearScale::new(domain, range)),
            ScaleKind::Time => AxisScale::Time(TimeScale::new(domain, range)),
        }
    }

    pub fn kind(&self) -> ScaleKind {
        match self {
            AxisScale::Linear(_) => ScaleKind::Linear,
            AxisScale::Time(_) => ScaleKind::Time,
        }
    }

    fn data_kind(&self) -> DataKind {
        match self {
            AxisScale::Linear(_) => DataKind::Number,
            AxisScale::Time(_) => DataKind::Date,
        }
    }

    pub fn nice(self, count: usize) -> Self {
        match self {
            AxisScale::Linear(s) => AxisScale::Linear(s.nice(count)),
            AxisScale::Time(s) => AxisScale::Time(s.nice(count)),
        }
    }

    /// Project a data value to a pixel coordinate.
    #[inline]
    pub fn map(&self, v: &DataValue) -> f32 {
        self.to_px(v.as_f64())
    }

    /// Pixel back to a data value of this scale's kind.
    pub fn invert_value(&self, px: f32) -> DataValue {
        let v = self.from_px(px);
        DataValue::from_f64(self.data_kind(), v).unwrap_or(DataValue::Number(v))
    }

    /// Default tick values as data values of this scale's kind.
    pub fn tick_values(&self, count: usize) -> Vec<DataValue> {
        let kind = self.data_kind();
        self.ticks(count)
            .into_iter()
            .filter_map(|v| DataValue::from_f64(kind, v))
            .collect()
    }

    /// Tick step in domain units; only meaningful for linear scales.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.domain();
        tick_step(d0, d1, count as f64)
    }
}

impl ScaleTransform for AxisScale {
    fn domain(&self) -> Domain {
        match self {
            AxisScale::Linear(s) => s.domain(),
            AxisScale::Time(s) => s.domain(),
        }
    }
    fn range(&self) -> Range {
        match self {
            AxisScale::Linear(s) => s.range(),
            AxisScale::Time(s) => s.range(),
        }
    }
    #[inline]
    fn to_px(&self, v: f64) -> f32 {
        match self {
            AxisScale::Linear(s) => s.to_px(v),
            AxisScale::Time(s) => s.to_px(v),
        }
    }
    #[inline]
    fn from_px(&self, px: f32) -> f64 {
        match self {
            AxisScale::Linear(s) => s.from_px(px),
            AxisScale::Time(s) => s.from_px(px),
        }
    }
    fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            AxisScale::Linear(s) => s.ticks(count),
            AxisScale::Time(s) => s.ticks(count),
        }
    }
}

/// The x and y scales of one render pass; handed to overlays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScalePair {
    pub x: AxisScale,
    pub y: AxisScale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_unit_interval() {
        assert_eq!(ticks(0.0, 1.0, 10), vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]);
        assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn ticks_reversed_and_degenerate() {
        assert_eq!(ticks(10.0, 0.0, 5), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
        assert_eq!(ticks(3.0, 3.0, 5), vec![3.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn ticks_negative_span() {
        assert_eq!(ticks(-1.0, 1.0, 4), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn nice_rounds_outward() {
        assert_eq!(nice_linear(0.201479, 0.996679, 10), (0.2, 1.0));
        assert_eq!(nice_linear(1.1, 10.9, 10), (1.0, 11.0));
        assert_eq!(nice_linear(0.5, 123.0, 5), (0.0, 140.0));
        assert_eq!(nice_linear(10.9, 1.1, 10), (11.0, 1.0));
    }

    #[test]
    fn step_sign_follows_direction() {
        assert_eq!(tick_step(0.0, 10.0, 5.0), 2.0);
        assert_eq!(tick_step(10.0, 0.0, 5.0), -2.0);
        assert!((tick_step(0.0, 1.0, 10.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn zero_span_maps_to_midpoint() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.to_px(5.0), 50.0);
    }
}
