// ==========================================
// Inventory Analytics - Value Normalizer
// ==========================================
// Responsibility: TRIM / UPPER text, locale-tolerant numbers
// Formats: 1.234,56 | 1,234.56 | 1234,56 | 1234.56 | 0,117
// Total: never fails, unparsable input becomes 0
// ==========================================

use crate::domain::sheet::Cell;
use chrono::{NaiveDate, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;

/// Days between the spreadsheet epoch (1899-12-30) and 1970-01-01
const EXCEL_UNIX_EPOCH_OFFSET: f64 = 25569.0;

/// Canonical text form: trimmed, upper-cased. Falsy cells give "".
pub fn clean_string(cell: &Cell) -> String {
    clean_str(&cell.raw_text())
}

/// Same as [`clean_string`] for plain text
pub fn clean_str(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Parses a cell as a number.
///
/// Numeric cells pass through unchanged. Text is stripped of `$` and
/// whitespace, then classified:
/// - `1.234,56` style: `.` groups thousands, `,` is the decimal point
/// - `1,234.56` style: `,` groups thousands
/// - otherwise a remaining `,` is read as the decimal point
///
/// The longest numeric prefix is parsed; anything else yields 0.
pub fn parse_number(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => parse_number_str(s),
        Cell::Empty | Cell::Bool(_) => 0.0,
    }
}

/// `1.234,56` style: `.` groups thousands, `,` is the decimal point
static COMMA_DECIMAL_GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(\.[0-9]{3})*,[0-9]+$").expect("valid pattern"));

/// `1,234.56` style: `,` groups thousands
static DOT_DECIMAL_GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(,[0-9]{3})*\.[0-9]+$").expect("valid pattern"));

/// Longest leading float literal; an exponent only counts with digits
static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(Infinity|([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?)")
        .expect("valid pattern")
});

/// Text variant of [`parse_number`]
pub fn parse_number_str(value: &str) -> f64 {
    let stripped: String = value
        .chars()
        .filter(|c| *c != '$' && !c.is_whitespace())
        .collect();
    if stripped.is_empty() {
        return 0.0;
    }

    let normalized = if COMMA_DECIMAL_GROUPED.is_match(&stripped) {
        stripped.replace('.', "").replacen(',', ".", 1)
    } else if DOT_DECIMAL_GROUPED.is_match(&stripped) {
        stripped.replace(',', "")
    } else if stripped.contains(',') {
        stripped.replacen(',', ".", 1)
    } else {
        stripped
    };

    match parse_float_prefix(&normalized) {
        Some(n) if n != 0.0 && !n.is_nan() => n,
        _ => 0.0,
    }
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let literal = FLOAT_PREFIX.find(s)?.as_str();
    if literal.ends_with("Infinity") {
        let inf = f64::INFINITY;
        return Some(if literal.starts_with('-') { -inf } else { inf });
    }
    literal.parse::<f64>().ok()
}

/// Converts a spreadsheet serial date (1900 system) to a calendar date
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial == 0.0 {
        return None;
    }
    let days = (serial - EXCEL_UNIX_EPOCH_OFFSET).floor();
    if days < i64::MIN as f64 || days > i64::MAX as f64 {
        return None;
    }
    let offset = TimeDelta::try_days(days as i64)?;
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(offset)
}
