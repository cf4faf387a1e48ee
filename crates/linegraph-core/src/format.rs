// File: crates/linegraph-core/src/format.rs
// Summary: Tick label formatting: locale, numeric format specifiers, strftime patterns.

use std::fmt;
use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::series::{DataKind, DataValue};

/// Number presentation conventions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    pub decimal: String,
    pub thousands: String,
    /// Digits per thousands group.
    pub grouping: usize,
    /// Currency prefix and suffix used by the `$` flag.
    pub currency: (String, String),
    pub minus: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            decimal: ".".into(),
            thousands: ",".into(),
            grouping: 3,
            currency: ("$".into(), String::new()),
            minus: "-".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sign {
    Minus,
    Plus,
    Space,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberKind {
    /// `f`: fixed point.
    Fixed,
    /// `d`: rounded integer.
    Integer,
    /// `e`: exponent notation.
    Exponent,
    /// `%`: multiply by 100, fixed point, percent sign.
    Percent,
    /// `s`: SI prefix with significant digits.
    Si,
    /// `r`: significant digits, fixed point.
    Significant,
    /// No type: `precision` significant digits (12 by default), switching to exponent
    /// notation for very small or large magnitudes; trailing zeros trimmed.
    General,
}

const SI_PREFIXES: [&str; 17] = ["y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y"];

/// Parsed numeric specifier of the form `[sign][$][,][.precision][~][type]`.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberFormat {
    sign: Sign,
    currency: bool,
    comma: bool,
    precision: Option<usize>,
    trim: bool,
    kind: NumberKind,
}

impl NumberFormat {
    pub fn parse(spec: &str) -> Result<Self> {
        let mut chars = spec.chars().peekable();
        let mut fmt = NumberFormat {
            sign: Sign::Minus,
            currency: false,
            comma: false,
            precision: None,
            trim: false,
            kind: NumberKind::General,
        };
        match chars.peek() {
            Some('+') => { fmt.sign = Sign::Plus; chars.next(); }
            Some('-') => { chars.next(); }
            Some(' ') => { fmt.sign = Sign::Space; chars.next(); }
            _ => {}
        }
        if chars.peek() == Some(&'$') { fmt.currency = true; chars.next(); }
        if chars.peek() == Some(&',') { fmt.comma = true; chars.next(); }
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut digits = String::new();
            while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
                digits.push(c);
                chars.next();
            }
            let p = digits.parse::<usize>().map_err(|_| GraphError::format(spec, "missing precision digits"))?;
            fmt.precision = Some(p.min(20));
        }
        if chars.peek() == Some(&'~') { fmt.trim = true; chars.next(); }
        if let Some(c) = chars.next() {
            fmt.kind = match c {
                'f' => NumberKind::Fixed,
                'd' => NumberKind::Integer,
                'e' => NumberKind::Exponent,
                '%' => NumberKind::Percent,
                's' => NumberKind::Si,
                'r' => NumberKind::Significant,
                other => return Err(GraphError::format(spec, format!("unsupported type `{other}`"))),
            };
        }
        if let Some(rest) = chars.next() {
            return Err(GraphError::format(spec, format!("unexpected `{rest}`")));
        }
        Ok(fmt)
    }

    /// Grouped fixed-point with precision taken from the tick step (`,f`).
    pub fn auto() -> Self {
        NumberFormat {
            sign: Sign::Minus,
            currency: false,
            comma: true,
            precision: None,
            trim: false,
            kind: NumberKind::Fixed,
        }
    }

    pub fn kind(&self) -> NumberKind { self.kind }
    pub fn precision(&self) -> Option<usize> { self.precision }

    /// Fill a missing precision from the distance between ticks.
    pub fn with_step_precision(mut self, step: f64, max_abs: f64) -> Self {
        if self.precision.is_some() || !step.is_finite() || step == 0.0 { return self; }
        let step = step.abs();
        self.precision = match self.kind {
            NumberKind::Fixed => Some((-exponent(step)).max(0) as usize),
            NumberKind::Percent => Some((-exponent(step) - 2).max(0) as usize),
            NumberKind::Exponent | NumberKind::Significant => {
                let span = (max_abs.abs() - step).max(step);
                Some(((exponent(span) - exponent(step)).max(0) + 1) as usize)
            }
            _ => None,
        };
        self
    }

    pub fn format(&self, v: f64, locale: &Locale) -> String {
        if v.is_nan() { return "NaN".into(); }
        let a = v.abs();
        let (mut number, suffix) = match self.kind {
            NumberKind::Fixed => (format!("{:.*}", self.precision.unwrap_or(6), a), String::new()),
            NumberKind::Integer => (format!("{:.0}", a.round()), String::new()),
            NumberKind::Percent => (format!("{:.*}", self.precision.unwrap_or(6), a * 100.0), "%".to_string()),
            NumberKind::Exponent => (exponent_notation(a, self.precision.unwrap_or(6)), String::new()),
            NumberKind::Significant => (significant(a, self.precision.unwrap_or(6)), String::new()),
            NumberKind::Si => si_prefixed(a, self.precision),
            NumberKind::General => match self.precision {
                Some(p) => (to_precision(a, p), String::new()),
                None => (to_precision(a, 12), String::new()),
            },
        };
        let trim = self.trim || self.kind == NumberKind::General || (self.kind == NumberKind::Si && self.precision.is_none());
        if trim { number = trim_zeros(&number); }
        number = number.replacen('.', &locale.decimal, 1);
        if self.comma { number = group_digits(&number, locale); }

        let is_zero = !number.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if v < 0.0 && !is_zero {
            locale.minus.as_str()
        } else {
            match self.sign {
                Sign::Plus => "+",
                Sign::Space => " ",
                Sign::Minus => "",
            }
        };
        let (cur_pre, cur_suf) = if self.currency {
            (locale.currency.0.as_str(), locale.currency.1.as_str())
        } else {
            ("", "")
        };
        format!("{sign}{cur_pre}{number}{suffix}{cur_suf}")
    }
}

#[inline]
fn exponent(x: f64) -> i32 {
    if x == 0.0 { 0 } else { x.abs().log10().floor() as i32 }
}

fn round_significant(a: f64, digits: usize) -> f64 {
    if a == 0.0 || !a.is_finite() { return a; }
    let scale = 10f64.powi(digits as i32 - 1 - exponent(a));
    (a * scale).round() / scale
}

fn significant(a: f64, digits: usize) -> String {
    let digits = digits.max(1);
    let r = round_significant(a, digits);
    let decimals = (digits as i32 - 1 - exponent(r)).max(0) as usize;
    format!("{r:.decimals$}")
}

/// `p` significant digits; exponent form when the exponent is below -6 or at least `p`.
fn to_precision(a: f64, p: usize) -> String {
    let p = p.clamp(1, 21);
    if a == 0.0 || !a.is_finite() {
        let decimals = p - 1;
        return format!("{a:.decimals$}");
    }
    let e = exponent(round_significant(a, p));
    if e < -6 || e >= p as i32 {
        exponent_notation(a, p - 1)
    } else {
        let decimals = (p as i32 - 1 - e).max(0) as usize;
        format!("{a:.decimals$}")
    }
}

fn exponent_notation(a: f64, precision: usize) -> String {
    let s = format!("{a:.precision$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

fn si_prefixed(a: f64, precision: Option<usize>) -> (String, String) {
    let digits = precision.unwrap_or(6).max(1);
    let mut i = if a == 0.0 { 0 } else { (exponent(a) as f64 / 3.0).floor().clamp(-8.0, 8.0) as i32 };
    let mut r = round_significant(a / 10f64.powi(3 * i), digits);
    if r >= 1000.0 && i < 8 {
        i += 1;
        r = round_significant(a / 10f64.powi(3 * i), digits);
    }
    let decimals = (digits as i32 - 1 - exponent(r)).max(0) as usize;
    (format!("{r:.decimals$}"), SI_PREFIXES[(i + 8) as usize].to_string())
}

fn trim_zeros(s: &str) -> String {
    let (mantissa, exp) = match s.find('e') {
        Some(idx) => s.split_at(idx),
        None => (s, ""),
    };
    if !mantissa.contains('.') { return s.to_string(); }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{exp}")
}

fn group_digits(s: &str, locale: &Locale) -> String {
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (int, rest) = s.split_at(split);
    let group = locale.grouping.max(1);
    let mut out = String::with_capacity(s.len() + int.len() / group);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % group == 0 { out.push_str(&locale.thousands); }
        out.push(c);
    }
    out.push_str(rest);
    out
}

/// Check a strftime pattern without formatting anything.
pub fn validate_time_pattern(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|i| matches!(i, Item::Error)) {
        return Err(GraphError::format(pattern, "invalid strftime pattern"));
    }
    Ok(())
}

/// Format a value as a date; numbers are read as epoch milliseconds.
pub fn format_time(value: &DataValue, pattern: &str) -> String {
    let Some(date) = value.as_date() else { return String::new() };
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        out.clear();
    }
    out
}

/// How an axis turns tick values into label text.
#[derive(Default)]
pub enum TickFormat {
    /// Precision derived from the tick step (linear) or multi-scale calendar labels (time).
    #[default]
    Auto,
    Number(NumberFormat),
    /// strftime pattern.
    Time(String),
    Custom(Box<dyn Fn(&DataValue) -> String>),
}

impl TickFormat {
    /// Parse a specifier for an axis carrying `kind` values.
    pub fn parse(spec: &str, kind: DataKind) -> Result<Self> {
        match kind {
            DataKind::Number => Ok(TickFormat::Number(NumberFormat::parse(spec)?)),
            DataKind::Date => {
                validate_time_pattern(spec)?;
                Ok(TickFormat::Time(spec.to_string()))
            }
        }
    }

    pub fn custom(f: impl Fn(&DataValue) -> String + 'static) -> Self {
        TickFormat::Custom(Box::new(f))
    }
}

impl fmt::Debug for TickFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickFormat::Auto => f.write_str("Auto"),
            TickFormat::Number(n) => f.debug_tuple("Number").field(n).finish(),
            TickFormat::Time(p) => f.debug_tuple("Time").field(p).finish(),
            TickFormat::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(spec: &str, v: f64) -> String {
        NumberFormat::parse(spec).unwrap().format(v, &Locale::default())
    }

    #[test]
    fn fixed_and_grouping() {
        assert_eq!(fmt(",.2f", 1234567.891), "1,234,567.89");
        assert_eq!(fmt(".0f", 2.6), "3");
        assert_eq!(fmt(",d", -1234.4), "-1,234");
        assert_eq!(fmt("$,.2f", 1200.0), "$1,200.00");
        assert_eq!(fmt("+.1f", 3.0), "+3.0");
    }

    #[test]
    fn percent_exponent_si() {
        assert_eq!(fmt(".0%", 0.123), "12%");
        assert_eq!(fmt(".2e", 1500.0), "1.50e+3");
        assert_eq!(fmt(".2s", 1500.0), "1.5k");
        assert_eq!(fmt(".3s", 42e6), "42.0M");
        assert_eq!(fmt("s", 0.002), "2m");
        assert_eq!(fmt(".2r", 0.0123), "0.012");
    }

    #[test]
    fn general_trims() {
        assert_eq!(fmt("", 0.5), "0.5");
        assert_eq!(fmt("~f", 2.5), "2.5");
        assert_eq!(fmt(".1f", -0.01), "0.0");
        assert_eq!(fmt("", 0.1 + 0.2), "0.3");
    }

    #[test]
    fn general_precision_switches_to_exponent() {
        assert_eq!(fmt(".3", 1234.5), "1.23e+3");
        assert_eq!(fmt(".3", 12.345), "12.3");
        assert_eq!(fmt(".3", 0.000012345), "0.0000123");
        assert_eq!(fmt(".2", 1e-7), "1e-7");
        assert_eq!(fmt(".3", 999.6), "1e+3");
        assert_eq!(fmt(".3", 0.0), "0");
    }

    #[test]
    fn locale_marks() {
        let de = Locale { decimal: ",".into(), thousands: ".".into(), ..Locale::default() };
        let f = NumberFormat::parse(",.1f").unwrap();
        assert_eq!(f.format(12345.67, &de), "12.345,7");
    }

    #[test]
    fn rejects_bad_specs() {
        assert!(NumberFormat::parse(".f").is_err());
        assert!(NumberFormat::parse("q").is_err());
        assert!(NumberFormat::parse(".2fz").is_err());
        assert!(validate_time_pattern("%Q").is_err());
        assert!(validate_time_pattern("%Y-%m-%d").is_ok());
    }

    #[test]
    fn step_precision() {
        let f = NumberFormat::parse(",f").unwrap().with_step_precision(0.5, 10.0);
        assert_eq!(f.precision(), Some(1));
        let p = NumberFormat::parse("%").unwrap().with_step_precision(0.1, 1.0);
        assert_eq!(p.precision(), Some(0));
    }
}
