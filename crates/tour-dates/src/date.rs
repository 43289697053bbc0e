//! Parsing of concert dates written as `DD-MM-YYYY`.
//!
//! Tour listings often announce a show before the exact day (or even month)
//! is known. Such dates carry the placeholder `??` in the unknown component,
//! e.g. `"??-06-2024"` or `"??-??-2025"`. An unknown component resolves to
//! the first day (or month) of its period.
//!
//! A resolved date is interpreted as **local midnight** in a caller-supplied
//! timezone and converted to a UTC instant, so it can be compared directly
//! with a "now" anchor. [`parse_date`] uses the host's local timezone;
//! [`parse_date_in`] takes the timezone explicitly.
//!
//! Parsing is strict: malformed shapes, non-digit components, and impossible
//! calendar dates are rejected with [`TourError::InvalidDate`]. Nothing is
//! clamped.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, TourError};

/// Placeholder for an unknown day or month.
pub const UNKNOWN_COMPONENT: &str = "??";

/// Separator between the day, month, and year components.
pub const DATE_SEPARATOR: char = '-';

// ── PartialDate ─────────────────────────────────────────────────────────────

/// How much of a [`PartialDate`] is actually known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    /// Day, month, and year are all known.
    Day,
    /// Only the month and year are known.
    Month,
    /// The month is unknown; only the year is reliable.
    Year,
}

/// A `DD-MM-YYYY` date whose day and month may be unknown.
///
/// The calendar date obtained by substituting `01` for unknown components is
/// validated on construction, so [`PartialDate::resolve`] cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartialDate {
    day: Option<u32>,
    month: Option<u32>,
    year: i32,
    resolved: NaiveDate,
}

impl PartialDate {
    /// The day of month, or `None` when written as `??`.
    pub fn day(&self) -> Option<u32> {
        self.day
    }

    /// The month, or `None` when written as `??`.
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar date with unknown components resolved to `01`.
    pub fn resolve(&self) -> NaiveDate {
        self.resolved
    }

    pub fn precision(&self) -> DatePrecision {
        match (self.day, self.month) {
            (Some(_), Some(_)) => DatePrecision::Day,
            (None, Some(_)) => DatePrecision::Month,
            (_, None) => DatePrecision::Year,
        }
    }

    /// Local midnight of the resolved date in `tz`, as a UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::InvalidDate`] if no instant of that day exists in
    /// `tz` (only possible for dates at the very edge of chrono's range).
    pub fn local_midnight<Z: TimeZone>(&self, tz: &Z) -> Result<DateTime<Utc>> {
        local_midnight(self.resolved, tz).ok_or_else(|| {
            TourError::InvalidDate(format!("'{}': no local midnight exists", self))
        })
    }
}

impl FromStr for PartialDate {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(TourError::InvalidDate(format!(
                "'{}': expected DD-MM-YYYY",
                s
            )));
        };

        let day = parse_component(day, "day", s)?;
        let month = parse_component(month, "month", s)?;
        let year = parse_year(year, s)?;

        let resolved = NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))
            .ok_or_else(|| {
                TourError::InvalidDate(format!("'{}': not a valid calendar date", s))
            })?;

        Ok(Self {
            day,
            month,
            year,
            resolved,
        })
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            Some(d) => write!(f, "{d:02}")?,
            None => f.write_str(UNKNOWN_COMPONENT)?,
        }
        write!(f, "{DATE_SEPARATOR}")?;
        match self.month {
            Some(m) => write!(f, "{m:02}")?,
            None => f.write_str(UNKNOWN_COMPONENT)?,
        }
        write!(f, "{DATE_SEPARATOR}{:04}", self.resolved.year())
    }
}

// ── parse_date ──────────────────────────────────────────────────────────────

/// Parse a `DD-MM-YYYY` concert date as local midnight in the host timezone.
///
/// # Examples
///
/// ```
/// use chrono::{Local, NaiveDate};
/// use tour_dates::date::parse_date;
///
/// let instant = parse_date("??-06-2024").unwrap();
/// assert_eq!(
///     instant.with_timezone(&Local).date_naive(),
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
/// );
/// ```
///
/// # Errors
///
/// Returns [`TourError::InvalidDate`] if the string is not three
/// hyphen-separated components, a known component is not a number, or the
/// resolved calendar date does not exist.
pub fn parse_date(date: &str) -> Result<DateTime<Utc>> {
    parse_date_in(date, &Local)
}

/// Parse a `DD-MM-YYYY` concert date as local midnight in `tz`.
///
/// When midnight falls into a DST gap the first existing instant of the day
/// is used; when it is ambiguous the earlier instant is used.
///
/// # Errors
///
/// Same as [`parse_date`].
pub fn parse_date_in<Z: TimeZone>(date: &str, tz: &Z) -> Result<DateTime<Utc>> {
    date.parse::<PartialDate>()?.local_midnight(tz)
}

/// Parse an IANA timezone name (e.g. `"Europe/Paris"`) into `Tz`.
///
/// # Errors
///
/// Returns [`TourError::InvalidTimezone`] if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| TourError::InvalidTimezone(format!("'{}'", name)))
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Parse a day or month component. `??` yields `None`.
fn parse_component(raw: &str, field: &str, input: &str) -> Result<Option<u32>> {
    if raw == UNKNOWN_COMPONENT {
        return Ok(None);
    }
    parse_digits::<u32>(raw)
        .map(Some)
        .ok_or_else(|| {
            TourError::InvalidDate(format!("'{}': invalid {} '{}'", input, field, raw))
        })
}

/// The year must always be known.
fn parse_year(raw: &str, input: &str) -> Result<i32> {
    parse_digits::<i32>(raw)
        .ok_or_else(|| TourError::InvalidDate(format!("'{}': invalid year '{}'", input, raw)))
}

/// Parse a non-empty run of ASCII digits. Signs and whitespace are rejected.
fn parse_digits<T: FromStr>(raw: &str) -> Option<T> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn local_midnight<Z: TimeZone>(date: NaiveDate, tz: &Z) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    if let Some(dt) = tz.from_local_datetime(&midnight).earliest() {
        return Some(dt.with_timezone(&Utc));
    }
    // Midnight skipped by a DST transition: take the first quarter hour that exists.
    (1..=4 * 24)
        .filter_map(|q| midnight.checked_add_signed(chrono::Duration::minutes(15 * q)))
        .find_map(|t| tz.from_local_datetime(&t).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

// ── Tests ───────────────────────────────────────────────────────────────────
