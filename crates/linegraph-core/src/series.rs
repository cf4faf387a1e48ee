// File: crates/linegraph-core/src/series.rs
// Summary: Plotted data model: scalar values (number or date) and (x, y) datums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which flavour of scalar an axis carries. Picks the scale kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataKind {
    Number,
    Date,
}

/// One scalar on an axis. Dates project to epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(f64),
    Date(DateTime<Utc>),
}

impl DataValue {
    pub fn kind(&self) -> DataKind {
        match self {
            DataValue::Number(_) => DataKind::Number,
            DataValue::Date(_) => DataKind::Date,
        }
    }

    /// Position of the value on a continuous axis.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match *self {
            DataValue::Number(v) => v,
            DataValue::Date(d) => d.timestamp_millis() as f64,
        }
    }

    /// Interpret `v` as a value of `kind`. Non-representable dates come back as `None`.
    pub fn from_f64(kind: DataKind, v: f64) -> Option<Self> {
        match kind {
            DataKind::Number => Some(DataValue::Number(v)),
            DataKind::Date => millis_to_date(v).map(DataValue::Date),
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match *self {
            DataValue::Number(v) => millis_to_date(v),
            DataValue::Date(d) => Some(d),
        }
    }
}

pub(crate) fn millis_to_date(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() { return None; }
    DateTime::from_timestamp_millis(ms.floor() as i64)
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self { DataValue::Number(v) }
}

impl From<i32> for DataValue {
    fn from(v: i32) -> Self { DataValue::Number(v as f64) }
}

impl From<DateTime<Utc>> for DataValue {
    fn from(d: DateTime<Utc>) -> Self { DataValue::Date(d) }
}

/// A single plotted point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    pub x: DataValue,
    pub y: DataValue,
}

impl Datum {
    pub fn new(x: impl Into<DataValue>, y: impl Into<DataValue>) -> Self {
        Self { x: x.into(), y: y.into() }
    }

    /// Numeric pair shorthand.
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x: DataValue::Number(x), y: DataValue::Number(y) }
    }
}

/// Build numeric datums from `(x, y)` tuples.
pub fn from_pairs(pairs: &[(f64, f64)]) -> Vec<Datum> {
    pairs.iter().map(|&(x, y)| Datum::xy(x, y)).collect()
}
