// File: crates/linegraph-core/src/time.rs
// Summary: UTC calendar intervals for time-scale ticks, nicing and default labels.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

use crate::scale::tick_step;

pub const SECOND_MS: i64 = 1_000;
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;
pub const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Upper bound on generated ticks; guards against runaway ranges.
const MAX_TICKS: usize = 10_000;
/// Upper bound on base-unit steps while searching for a filtered boundary.
const MAX_PROBE: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    /// Weeks start on Sunday.
    Week,
    Month,
    Year,
}

/// Candidate tick intervals, ordered by approximate duration.
const TICK_INTERVALS: [(TimeUnit, i64, i64); 18] = [
    (TimeUnit::Second, 1, SECOND_MS),
    (TimeUnit::Second, 5, 5 * SECOND_MS),
    (TimeUnit::Second, 15, 15 * SECOND_MS),
    (TimeUnit::Second, 30, 30 * SECOND_MS),
    (TimeUnit::Minute, 1, MINUTE_MS),
    (TimeUnit::Minute, 5, 5 * MINUTE_MS),
    (TimeUnit::Minute, 15, 15 * MINUTE_MS),
    (TimeUnit::Minute, 30, 30 * MINUTE_MS),
    (TimeUnit::Hour, 1, HOUR_MS),
    (TimeUnit::Hour, 3, 3 * HOUR_MS),
    (TimeUnit::Hour, 6, 6 * HOUR_MS),
    (TimeUnit::Hour, 12, 12 * HOUR_MS),
    (TimeUnit::Day, 1, DAY_MS),
    (TimeUnit::Day, 2, 2 * DAY_MS),
    (TimeUnit::Week, 1, WEEK_MS),
    (TimeUnit::Month, 1, MONTH_MS),
    (TimeUnit::Month, 3, 3 * MONTH_MS),
    (TimeUnit::Year, 1, YEAR_MS),
];

fn to_date(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

/// Whether `ms` lies within the calendar range chrono can represent.
pub fn representable(ms: f64) -> bool {
    let lo = DateTime::<Utc>::MIN_UTC.timestamp_millis() as f64;
    let hi = DateTime::<Utc>::MAX_UTC.timestamp_millis() as f64;
    ms >= lo && ms <= hi
}

fn midnight_ms(date: Option<NaiveDate>, fallback: i64) -> i64 {
    date.and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(fallback)
}

#[inline]
fn floor_to(ms: i64, unit: i64) -> i64 {
    ms.div_euclid(unit).saturating_mul(unit)
}

impl TimeUnit {
    /// Start of the unit containing `ms`.
    pub fn floor_ms(self, ms: i64) -> i64 {
        match self {
            TimeUnit::Millisecond => ms,
            TimeUnit::Second => floor_to(ms, SECOND_MS),
            TimeUnit::Minute => floor_to(ms, MINUTE_MS),
            TimeUnit::Hour => floor_to(ms, HOUR_MS),
            TimeUnit::Day => floor_to(ms, DAY_MS),
            TimeUnit::Week => {
                let day = floor_to(ms, DAY_MS);
                // 1970-01-01 was a Thursday, four days after Sunday.
                let dow = (day.div_euclid(DAY_MS) + 4).rem_euclid(7);
                day.saturating_sub(dow * DAY_MS)
            }
            TimeUnit::Month => {
                let d = to_date(ms).and_then(|d| NaiveDate::from_ymd_opt(d.year(), d.month(), 1));
                midnight_ms(d, ms)
            }
            TimeUnit::Year => {
                let d = to_date(ms).and_then(|d| NaiveDate::from_ymd_opt(d.year(), 1, 1));
                midnight_ms(d, ms)
            }
        }
    }

    /// Move `ms` by `n` whole units.
    pub fn offset_ms(self, ms: i64, n: i64) -> i64 {
        match self {
            TimeUnit::Millisecond => ms.saturating_add(n),
            TimeUnit::Second => ms.saturating_add(n.saturating_mul(SECOND_MS)),
            TimeUnit::Minute => ms.saturating_add(n.saturating_mul(MINUTE_MS)),
            TimeUnit::Hour => ms.saturating_add(n.saturating_mul(HOUR_MS)),
            TimeUnit::Day => ms.saturating_add(n.saturating_mul(DAY_MS)),
            TimeUnit::Week => ms.saturating_add(n.saturating_mul(WEEK_MS)),
            TimeUnit::Month => add_months(ms, n),
            TimeUnit::Year => add_months(ms, n.saturating_mul(12)),
        }
    }

    /// Calendar field used to filter `every(step)` boundaries.
    fn field(self, ms: i64) -> i64 {
        match self {
            TimeUnit::Millisecond => ms,
            TimeUnit::Second => ms.div_euclid(SECOND_MS).rem_euclid(60),
            TimeUnit::Minute => ms.div_euclid(MINUTE_MS).rem_euclid(60),
            TimeUnit::Hour => ms.div_euclid(HOUR_MS).rem_euclid(24),
            TimeUnit::Day => to_date(ms).map(|d| d.day0() as i64).unwrap_or(0),
            TimeUnit::Week => (self.floor_ms(ms) - TimeUnit::Week.floor_ms(0)).div_euclid(WEEK_MS),
            TimeUnit::Month => to_date(ms).map(|d| d.month0() as i64).unwrap_or(0),
            TimeUnit::Year => to_date(ms).map(|d| d.year() as i64).unwrap_or(0),
        }
    }
}

fn add_months(ms: i64, n: i64) -> i64 {
    let Some(d) = to_date(ms) else { return ms };
    let months = Months::new(n.unsigned_abs().min(u32::MAX as u64) as u32);
    let moved = if n >= 0 { d.checked_add_months(months) } else { d.checked_sub_months(months) };
    moved.map(|d| d.timestamp_millis()).unwrap_or(ms)
}

/// A unit repeated every `step` boundaries (e.g. every 15 minutes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub step: i64,
}

impl TimeInterval {
    pub fn new(unit: TimeUnit, step: i64) -> Self {
        Self { unit, step: step.max(1) }
    }

    /// Build from a fractional step; `None` when the step is not a positive finite number.
    pub fn every(unit: TimeUnit, step: f64) -> Option<Self> {
        let step = step.floor();
        if !step.is_finite() || step < 1.0 { return None; }
        Some(Self::new(unit, step as i64))
    }

    fn accepts(&self, ms: i64) -> bool {
        self.step <= 1 || self.unit.field(ms).rem_euclid(self.step) == 0
    }

    /// Latest boundary at or before `ms`.
    pub fn floor(&self, ms: i64) -> i64 {
        match self.unit {
            TimeUnit::Millisecond => floor_to(ms, self.step),
            TimeUnit::Year => {
                let year = to_date(ms).map(|d| d.year() as i64).unwrap_or(1970);
                let y = year.div_euclid(self.step) * self.step;
                let d = i32::try_from(y).ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
                midnight_ms(d, ms)
            }
            unit => {
                let mut t = unit.floor_ms(ms);
                for _ in 0..MAX_PROBE {
                    if self.accepts(t) { break; }
                    t = unit.floor_ms(t.saturating_sub(1));
                }
                t
            }
        }
    }

    /// First boundary strictly after the boundary `t`.
    fn next(&self, t: i64) -> i64 {
        match self.unit {
            TimeUnit::Millisecond => t.saturating_add(self.step),
            TimeUnit::Year => self.unit.offset_ms(t, self.step),
            unit => {
                let mut n = t;
                for _ in 0..MAX_PROBE {
                    n = unit.floor_ms(unit.offset_ms(n, 1));
                    if self.accepts(n) { break; }
                }
                n
            }
        }
    }

    /// Earliest boundary at or after `ms`.
    pub fn ceil(&self, ms: i64) -> i64 {
        let f = self.floor(ms.saturating_sub(1));
        self.next(f)
    }

    /// Boundaries in `[start, stop)`.
    pub fn range(&self, start: i64, stop: i64) -> Vec<i64> {
        let mut out = Vec::new();
        let mut t = self.ceil(start);
        while t < stop && out.len() < MAX_TICKS {
            out.push(t);
            let n = self.next(t);
            if n <= t { break; }
            t = n;
        }
        out
    }
}

/// Pick the interval whose duration best matches `count` ticks across `[start, stop]`.
pub fn tick_interval(start: f64, stop: f64, count: f64) -> Option<TimeInterval> {
    let target = (stop - start).abs() / count;
    let i = TICK_INTERVALS.partition_point(|&(_, _, d)| (d as f64) <= target);
    if i == TICK_INTERVALS.len() {
        let step = tick_step(start / YEAR_MS as f64, stop / YEAR_MS as f64, count);
        return TimeInterval::every(TimeUnit::Year, step);
    }
    if i == 0 {
        let step = tick_step(start, stop, count).max(1.0);
        return TimeInterval::every(TimeUnit::Millisecond, step);
    }
    let (lo, hi) = (TICK_INTERVALS[i - 1], TICK_INTERVALS[i]);
    let (unit, step, _) = if target / (lo.2 as f64) < (hi.2 as f64) / target { lo } else { hi };
    Some(TimeInterval::new(unit, step))
}

/// Tick positions (epoch ms) between `start` and `stop`, both inclusive.
/// Empty when either end falls outside the representable calendar.
pub fn time_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !representable(start) || !representable(stop) { return Vec::new(); }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some(interval) = tick_interval(lo, hi, count as f64) else { return Vec::new() };
    let mut ticks: Vec<f64> = interval
        .range(lo.ceil() as i64, (hi.floor() as i64).saturating_add(1))
        .into_iter()
        .map(|t| t as f64)
        .collect();
    if reverse { ticks.reverse(); }
    ticks
}

/// Round `[d0, d1]` outward to the tick interval chosen for `count`.
/// Domains outside the representable calendar come back unchanged.
pub fn time_nice(d0: f64, d1: f64, count: usize) -> (f64, f64) {
    if !representable(d0) || !representable(d1) || d0 == d1 { return (d0, d1); }
    let reverse = d1 < d0;
    let (lo, hi) = if reverse { (d1, d0) } else { (d0, d1) };
    let Some(interval) = tick_interval(lo, hi, count as f64) else { return (d0, d1) };
    let lo = interval.floor(lo.floor() as i64) as f64;
    let hi = interval.ceil(hi.ceil() as i64) as f64;
    if reverse { (hi, lo) } else { (lo, hi) }
}

/// Multi-scale label: the coarsest calendar field that is not at its boundary decides the pattern.
pub fn format_auto(ms: i64) -> String {
    let Some(date) = to_date(ms) else { return String::new() };
    let pattern = if TimeUnit::Second.floor_ms(ms) < ms {
        "%.3f"
    } else if TimeUnit::Minute.floor_ms(ms) < ms {
        ":%S"
    } else if TimeUnit::Hour.floor_ms(ms) < ms {
        "%I:%M"
    } else if TimeUnit::Day.floor_ms(ms) < ms {
        "%I %p"
    } else if TimeUnit::Month.floor_ms(ms) < ms {
        if TimeUnit::Week.floor_ms(ms) < ms { "%a %d" } else { "%b %d" }
    } else if TimeUnit::Year.floor_ms(ms) < ms {
        "%B"
    } else {
        "%Y"
    };
    date.format(pattern).to_string()
}
