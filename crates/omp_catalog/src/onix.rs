//! ONIX publication-date decoding and locale-aware formatting.
//!
//! OMP stores publication dates as a raw digit string plus an ONIX format
//! code describing its granularity. [`decode_date`] normalizes the supported
//! codes into a [`NaiveDateTime`]; the formatting functions render the value
//! back at the precision the code implies.
//!
//! Two quirks are carried over from the upstream data deliberately:
//!
//! - Quarter and season codes ("03"/"04") carry a single placeholder digit
//!   that cannot be represented in a calendar date. It is validated and then
//!   discarded; only the year is ever displayed for these codes.
//! - Hijri codes ("20"/"21"/"25") are decoded with the Gregorian parser and
//!   the calendar is NOT converted. The rendered value is suffixed with
//!   " AH" but the underlying date arithmetic is Gregorian. Known
//!   limitation.

use crate::error::{CatalogError, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use omp_core::{Entity, Locale};

/// The supported ONIX date format codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCode {
    /// "00" — YYYYMMDD
    YearMonthDay,
    /// "01" — YYYYMM
    YearMonth,
    /// "02" — YYYYMMWW; the week digits have no real week semantics and are
    /// validated, then ignored
    YearWeek,
    /// "03" — YYYYQ with a placeholder digit, never displayed
    YearQuarter,
    /// "04" — YYYYS with a placeholder digit, never displayed
    YearSeason,
    /// "05" — YYYY
    Year,
    /// "13" — YYYYMMDDHHMM, optional Z or ±hhmm suffix
    ExactMinute,
    /// "14" — YYYYMMDDHHMMSS, optional Z or ±hhmm suffix
    ExactSecond,
    /// "20" — YYYYMMDD, Hijri calendar
    HijriYearMonthDay,
    /// "21" — YYYYMM, Hijri calendar
    HijriYearMonth,
    /// "25" — YYYY, Hijri calendar
    HijriYear,
}

impl DateCode {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "00" => Some(DateCode::YearMonthDay),
            "01" => Some(DateCode::YearMonth),
            "02" => Some(DateCode::YearWeek),
            "03" => Some(DateCode::YearQuarter),
            "04" => Some(DateCode::YearSeason),
            "05" => Some(DateCode::Year),
            "13" => Some(DateCode::ExactMinute),
            "14" => Some(DateCode::ExactSecond),
            "20" => Some(DateCode::HijriYearMonthDay),
            "21" => Some(DateCode::HijriYearMonth),
            "25" => Some(DateCode::HijriYear),
            _ => None,
        }
    }

    /// Human-readable input pattern, used in error messages.
    pub fn expected_pattern(self) -> &'static str {
        match self {
            DateCode::YearMonthDay | DateCode::HijriYearMonthDay => "YYYYMMDD",
            DateCode::YearMonth | DateCode::HijriYearMonth => "YYYYMM",
            DateCode::YearWeek => "YYYYMMWW",
            DateCode::YearQuarter => "YYYYQ",
            DateCode::YearSeason => "YYYYS",
            DateCode::Year | DateCode::HijriYear => "YYYY",
            DateCode::ExactMinute => "YYYYMMDDHHMM[Z|±hhmm]",
            DateCode::ExactSecond => "YYYYMMDDHHMMSS[Z|±hhmm]",
        }
    }

    pub fn is_hijri(self) -> bool {
        matches!(
            self,
            DateCode::HijriYearMonthDay | DateCode::HijriYearMonth | DateCode::HijriYear
        )
    }
}

/// A raw publication-date row: the digit string and its ONIX format code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRow {
    pub date: String,
    pub date_format: String,
}

impl DateRow {
    pub fn new(date: impl Into<String>, date_format: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            date_format: date_format.into(),
        }
    }

    /// Read a date row from a publication-date entity's attributes.
    pub fn from_entity(entity: &Entity) -> Option<Self> {
        Some(Self::new(
            entity.attr_str("date")?,
            entity.attr_str("date_format")?,
        ))
    }
}

/// A decoded publication date, or the sentinel for an unknown format code.
///
/// `Unresolved` is distinguishable from every real date; callers must fall
/// back to displaying the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PubDate {
    Resolved(NaiveDateTime),
    Unresolved,
}

/// Decode a date row.
///
/// An unknown format code yields `Ok(PubDate::Unresolved)`; a raw string
/// that does not match the pattern of a known code is a
/// [`CatalogError::DateFormat`].
pub fn decode_date(row: &DateRow) -> Result<PubDate> {
    match DateCode::from_code(&row.date_format) {
        Some(code) => decode_resolved(code, row).map(PubDate::Resolved),
        None => {
            tracing::debug!(
                code = %row.date_format,
                "unknown date format code, falling back to raw display"
            );
            Ok(PubDate::Unresolved)
        }
    }
}

fn decode_resolved(code: DateCode, row: &DateRow) -> Result<NaiveDateTime> {
    let fail = || CatalogError::DateFormat {
        date: row.date.clone(),
        pattern: code.expected_pattern(),
        code: row.date_format.clone(),
    };
    let raw = row.date.as_str();

    let date = match code {
        DateCode::YearMonthDay | DateCode::HijriYearMonthDay => {
            let (y, m, d) = (field(raw, 0, 4, 8), field(raw, 4, 6, 8), field(raw, 6, 8, 8));
            let (y, m, d) = match (y, m, d) {
                (Some(y), Some(m), Some(d)) => (y, m, d),
                _ => return Err(fail()),
            };
            NaiveDate::from_ymd_opt(y as i32, m, d)
                .ok_or_else(fail)?
                .and_time(NaiveTime::MIN)
        }
        DateCode::YearMonth | DateCode::HijriYearMonth => {
            let (y, m) = match (field(raw, 0, 4, 6), field(raw, 4, 6, 6)) {
                (Some(y), Some(m)) => (y, m),
                _ => return Err(fail()),
            };
            NaiveDate::from_ymd_opt(y as i32, m, 1)
                .ok_or_else(fail)?
                .and_time(NaiveTime::MIN)
        }
        DateCode::YearWeek => {
            let (y, m, w) = (field(raw, 0, 4, 8), field(raw, 4, 6, 8), field(raw, 6, 8, 8));
            let (y, m, w) = match (y, m, w) {
                (Some(y), Some(m), Some(w)) => (y, m, w),
                _ => return Err(fail()),
            };
            if w > 53 {
                return Err(fail());
            }
            NaiveDate::from_ymd_opt(y as i32, m, 1)
                .ok_or_else(fail)?
                .and_time(NaiveTime::MIN)
        }
        DateCode::YearQuarter | DateCode::YearSeason => {
            let (y, placeholder) = match (field(raw, 0, 4, 5), field(raw, 4, 5, 5)) {
                (Some(y), Some(p)) => (y, p),
                _ => return Err(fail()),
            };
            // The trailing digit mimics a weekday field and cannot carry a
            // quarter/season into the date value; 0..=6 passes, as upstream.
            if placeholder > 6 {
                return Err(fail());
            }
            NaiveDate::from_ymd_opt(y as i32, 1, 1)
                .ok_or_else(fail)?
                .and_time(NaiveTime::MIN)
        }
        DateCode::Year | DateCode::HijriYear => {
            let y = field(raw, 0, 4, 4).ok_or_else(fail)?;
            NaiveDate::from_ymd_opt(y as i32, 1, 1)
                .ok_or_else(fail)?
                .and_time(NaiveTime::MIN)
        }
        DateCode::ExactMinute => decode_timestamp(raw, false).ok_or_else(fail)?,
        DateCode::ExactSecond => decode_timestamp(raw, true).ok_or_else(fail)?,
    };
    Ok(date)
}

/// Parse an all-digit field at `[start..end)` of a string of exactly
/// `expected_len` bytes.
fn field(raw: &str, start: usize, end: usize, expected_len: usize) -> Option<u32> {
    if raw.len() != expected_len {
        return None;
    }
    let part = raw.get(start..end)?;
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn decode_timestamp(raw: &str, with_seconds: bool) -> Option<NaiveDateTime> {
    let base = strip_zone_suffix(raw)?;
    let len = if with_seconds { 14 } else { 12 };
    let y = field(base, 0, 4, len)?;
    let m = field(base, 4, 6, len)?;
    let d = field(base, 6, 8, len)?;
    let h = field(base, 8, 10, len)?;
    let min = field(base, 10, 12, len)?;
    let s = if with_seconds { field(base, 12, 14, len)? } else { 0 };
    NaiveDate::from_ymd_opt(y as i32, m, d)?.and_hms_opt(h, min, s)
}

/// Strip an optional `Z` or `±hhmm` timezone suffix. The offset is validated
/// and then dropped: times stay naive local values, qualified or not.
fn strip_zone_suffix(raw: &str) -> Option<&str> {
    if let Some(base) = raw.strip_suffix('Z') {
        return Some(base);
    }
    // multibyte input can put the split point inside a character; such a
    // string has no valid zone suffix and falls through to digit validation
    if raw.len() > 5 && raw.is_char_boundary(raw.len() - 5) {
        let (base, suffix) = raw.split_at(raw.len() - 5);
        let mut bytes = suffix.bytes();
        let sign = bytes.next();
        if matches!(sign, Some(b'+') | Some(b'-')) {
            if bytes.all(|b| b.is_ascii_digit()) {
                return Some(base);
            }
            // a sign followed by non-digits is malformed, not zoneless
            return None;
        }
    }
    Some(raw)
}

/// Format a date row at the precision its code implies.
///
/// Unknown codes return the raw string unchanged. A non-empty
/// `pattern_override` is applied with chrono's strftime formatter instead of
/// the per-code output rules.
pub fn format_date(row: &DateRow, locale: &Locale, pattern_override: &str) -> Result<String> {
    let Some(code) = DateCode::from_code(&row.date_format) else {
        return Ok(row.date.clone());
    };
    let resolved = decode_resolved(code, row)?;
    if !pattern_override.is_empty() {
        return Ok(resolved.format(pattern_override).to_string());
    }
    Ok(render(code, resolved, locale))
}

fn render(code: DateCode, date: NaiveDateTime, locale: &Locale) -> String {
    match code {
        DateCode::YearMonthDay | DateCode::ExactMinute | DateCode::ExactSecond => {
            date.format(&locale.date_pattern).to_string()
        }
        DateCode::HijriYearMonthDay => format!("{} AH", date.format(&locale.date_pattern)),
        DateCode::YearMonth | DateCode::YearWeek => {
            format!("{} {}", locale.month_name(date.month()), date.year())
        }
        DateCode::YearQuarter | DateCode::YearSeason | DateCode::Year => date.year().to_string(),
        DateCode::HijriYearMonth | DateCode::HijriYear => format!("{} AH", date.year()),
    }
}

/// Format a date row with a localized "Published …" / "To be published …"
/// phrase, chosen by comparing against the current local time.
///
/// For an unknown format code the raw string is used with the past-tense
/// phrase; no future/past distinction is possible.
pub fn format_date_with_phrase(row: &DateRow, locale: &Locale) -> Result<String> {
    format_date_with_phrase_at(row, locale, Local::now().naive_local())
}

/// As [`format_date_with_phrase`], with an explicit reference instant.
pub fn format_date_with_phrase_at(
    row: &DateRow,
    locale: &Locale,
    now: NaiveDateTime,
) -> Result<String> {
    let Some(code) = DateCode::from_code(&row.date_format) else {
        return Ok(locale.published_phrase(&row.date, false));
    };
    let resolved = decode_resolved(code, row)?;
    // at least one full day ahead counts as forthcoming
    let forthcoming = (resolved - now).num_days() > 0;
    Ok(locale.published_phrase(&render(code, resolved, locale), forthcoming))
}
