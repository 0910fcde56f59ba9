//! Field parsers turning raw cell values into typed record fields.
//!
//! None of these functions fail: malformed input resolves to a documented
//! fallback (`None` date, `0.0` amount, one life, PF contract).

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use tracing::debug;

use crate::models::{CellValue, ContractType};

/// Lives covered when the cell is missing or not a positive integer.
pub const DEFAULT_LIVES: u32 = 1;

/// Currency symbol stripped before numeric parsing.
const CURRENCY_SYMBOL: &str = "R$";

/// Date-time layouts accepted by the generic fallback; only the date part is kept.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts accepted by the generic fallback.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y"];

// ── Dates ─────────────────────────────────────────────────────────────────────

/// Parse a date cell into a calendar date.
///
/// * native date values → calendar date of their UTC reading
/// * text → [`parse_date_str`]
/// * anything else → `None`
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::DateTime(dt) => Some(calendar_date_of(dt)),
        CellValue::Text(s) => parse_date_str(s),
        CellValue::Number(_) | CellValue::Bool(_) | CellValue::Empty => None,
    }
}

/// Calendar date of `value` read in UTC, time of day discarded.
///
/// Spreadsheet readers hand out dates as UTC midnight; viewed from a
/// negative-offset zone that instant falls on the previous day. Taking the
/// UTC year/month/day restores the date the cell actually shows.
pub fn calendar_date_of<Tz: TimeZone>(value: &DateTime<Tz>) -> NaiveDate {
    value.with_timezone(&Utc).date_naive()
}

/// Parse a textual date.
///
/// Strings containing `/` are read as `DD/MM/YYYY`. Everything else goes
/// through a generic parser; `YYYY-MM-DD` is taken at face value.
pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let parsed = if s.contains('/') {
        parse_day_month_year(s)
    } else {
        parse_generic_date(s)
    };

    if parsed.is_none() {
        debug!("Unreadable date value: {:?}", raw);
    }
    parsed
}

/// `DD/MM/YYYY` split on `/`; components beyond the third are ignored.
fn parse_day_month_year(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('/').map(|p| p.trim().parse::<i64>().ok());
    let day = parts.next()??;
    let month = parts.next()??;
    let year = parts.next()??;

    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

fn parse_generic_date(s: &str) -> Option<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    // Explicit offsets keep the wall-clock date of their own zone.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.date())
}

// ── Currency ──────────────────────────────────────────────────────────────────

fn leading_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("regex is valid")
    })
}

fn leading_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d+").expect("regex is valid"))
}

/// Parse a monetary cell. Numbers pass through; text goes to
/// [`parse_currency_str`]; anything else is `0.0`.
pub fn parse_currency(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Number(n) => non_negative(*n),
        CellValue::Text(s) => parse_currency_str(s),
        _ => 0.0,
    }
}

/// Parse a pt-BR currency string such as `"R$ 1.200,50"`.
///
/// Strips the symbol and all whitespace, drops `.` thousands separators,
/// turns the first `,` into the decimal point and reads the leading number.
/// Returns `0.0` when nothing numeric remains.
///
/// # Examples
///
/// ```
/// use sales_core::parsers::parse_currency_str;
///
/// assert_eq!(parse_currency_str("R$ 1.234,56"), 1234.56);
/// assert_eq!(parse_currency_str("350"), 350.0);
/// assert_eq!(parse_currency_str("n/a"), 0.0);
/// ```
pub fn parse_currency_str(raw: &str) -> f64 {
    let cleaned: String = raw
        .replace(CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();
    let cleaned = cleaned.replacen(',', ".", 1);

    leading_number()
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(non_negative)
        .unwrap_or(0.0)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

// ── Categorical ───────────────────────────────────────────────────────────────

/// Only a trimmed, case-insensitive `"PJ"` is PJ; everything else is PF.
pub fn parse_contract_type(raw: &str) -> ContractType {
    if raw.trim().to_uppercase() == "PJ" {
        ContractType::PJ
    } else {
        ContractType::PF
    }
}

/// First character of the trimmed, upper-cased gender value.
pub fn gender_key(raw: &str) -> Option<char> {
    raw.trim().to_uppercase().chars().next()
}

/// Leading integer of the cell, or [`DEFAULT_LIVES`] when missing,
/// non-numeric, zero or negative.
pub fn parse_lives(cell: &CellValue) -> u32 {
    let parsed = match cell {
        CellValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        CellValue::Text(s) => leading_integer()
            .find(s.trim())
            .and_then(|m| m.as_str().parse::<i64>().ok()),
        _ => None,
    };

    match parsed {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => DEFAULT_LIVES,
    }
}
