//! Display formatting for the portal
//!
//! Every formatter is total: missing or non-finite values render as a
//! placeholder dash instead of failing. Numbers follow Turkish locale
//! conventions (`.` groups thousands, `,` separates decimals).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Placeholder for missing table cells.
pub const PLACEHOLDER: &str = "-";

/// Placeholder for missing KPI card values.
pub const KPI_PLACEHOLDER: &str = "—";

pub const CURRENCY_SUFFIX: &str = " TL";
pub const AREA_SUFFIX: &str = " m²";

/// A KPI value as delivered by the backend: either a number to be
/// formatted or a string that is already display-ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KpiValue {
    Number(f64),
    Text(String),
}

impl KpiValue {
    /// Numeric value, if the backend sent one. Charts and totals ignore text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            KpiValue::Number(n) => Some(*n),
            KpiValue::Text(_) => None,
        }
    }
}

impl From<f64> for KpiValue {
    fn from(value: f64) -> Self {
        KpiValue::Number(value)
    }
}

/// Insert `.` between every group of three digits of an unsigned digit string.
pub fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push('.');
        }
        result.push(c);
    }
    result
}

/// Locale-grouped decimal with at most `max_fraction` fraction digits.
///
/// Halves round away from zero (`2.5` -> `3`). Trailing fractional zeros
/// are dropped. Returns `None` for NaN/infinity.
pub fn format_decimal(value: f64, max_fraction: usize) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let fixed = format!("{:.*}", max_fraction, round_half_away(value.abs(), max_fraction));
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    Some(out)
}

// `{:.N}` rounds exact halves to even, so round first.
fn round_half_away(magnitude: f64, max_fraction: usize) -> f64 {
    let scale = 10f64.powi(max_fraction as i32);
    let scaled = magnitude * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        magnitude
    }
}

/// Whole-lira amount with a ` TL` suffix, or `-` when missing.
pub fn format_currency(value: Option<f64>) -> String {
    with_suffix(value, CURRENCY_SUFFIX)
}

/// Whole square metres with a ` m²` suffix, or `-` when missing.
pub fn format_area(value: Option<f64>) -> String {
    with_suffix(value, AREA_SUFFIX)
}

fn with_suffix(value: Option<f64>, suffix: &str) -> String {
    match value.and_then(|v| format_decimal(v, 0)) {
        Some(formatted) => format!("{formatted}{suffix}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// KPI card value. Prefix and suffix wrap present values only; a missing
/// value is always the bare placeholder.
pub fn format_kpi(value: Option<&KpiValue>, prefix: &str, suffix: &str) -> String {
    let formatted = match value {
        Some(KpiValue::Number(n)) => format_decimal(*n, 3),
        Some(KpiValue::Text(text)) => Some(text.clone()),
        None => None,
    };

    match formatted {
        Some(formatted) => format!("{prefix}{formatted}{suffix}"),
        None => KPI_PLACEHOLDER.to_string(),
    }
}

const DATETIME_PATTERNS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_PATTERNS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

/// Calendar date of a backend timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD[ T]HH:MM[:SS[.f]]`, `YYYY-MM-DD` and the
/// already-rendered `DD.MM.YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for pattern in DATETIME_PATTERNS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.date());
        }
    }
    DATE_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(raw, pattern).ok())
}

/// Render a backend timestamp as `DD.MM.YYYY`. Anything [`parse_date`]
/// rejects is returned unchanged.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%d.%m.%Y").to_string(),
        None => raw.trim().to_string(),
    }
}

/// Chart axis label in billions, e.g. `6.1B`.
pub fn format_axis_tick(value: f64) -> String {
    format!("{:.1}B", value / 1_000_000_000.0)
}
