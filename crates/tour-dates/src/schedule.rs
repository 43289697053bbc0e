//! Split concerts into upcoming and past relative to a "now" anchor, then
//! order each half by date.
//!
//! The caller supplies `now` and the timezone in which concert days start;
//! nothing here reads the system clock.
//!
//! # Invalid dates
//!
//! A record whose date cannot be parsed is never dropped. It is placed in
//! [`Schedule::past`] and ordered as if it were infinitely far in the past:
//! first under [`SortOrder::Asc`], last under [`SortOrder::Desc`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::{Result, TourError};
use crate::record::ConcertRecord;

// ── SortOrder ───────────────────────────────────────────────────────────────

/// Direction in which each half of a [`Schedule`] is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Earliest first.
    Asc,
    /// Latest first.
    #[default]
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Orient an ascending comparison result.
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(TourError::InvalidSortOrder(format!(
                "'{}': expected 'asc' or 'desc'",
                s
            )))
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

// ── partition_and_sort ──────────────────────────────────────────────────────

/// Concerts split around "now", each half sorted by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule<'a> {
    /// Concerts starting at or after "now".
    pub future: Vec<&'a ConcertRecord>,
    /// Concerts before "now", plus any with an unparseable date.
    pub past: Vec<&'a ConcertRecord>,
}

impl Schedule<'_> {
    pub fn len(&self) -> usize {
        self.future.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.future.is_empty() && self.past.is_empty()
    }
}

/// Partition `records` into future (`date >= now`) and past, and sort each
/// partition by date in `order`.
///
/// Each date is parsed once, as local midnight in `tz`. Sorting is stable, so
/// concerts on the same day keep their input order in either direction. The
/// input is only borrowed and is never reordered.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tour_dates::{partition_and_sort, ConcertRecord, SortOrder};
///
/// let records = vec![
///     ConcertRecord::new("US", "Chicago", "Metro", "01-01-2023"),
///     ConcertRecord::new("US", "Austin", "Mohawk", "01-01-2099"),
/// ];
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let schedule = partition_and_sort(&records, now, SortOrder::Desc, &Utc);
/// assert_eq!(schedule.future[0].city, "Austin");
/// assert_eq!(schedule.past[0].city, "Chicago");
/// ```
pub fn partition_and_sort<'a, I, Z>(
    records: I,
    now: DateTime<Utc>,
    order: SortOrder,
    tz: &Z,
) -> Schedule<'a>
where
    I: IntoIterator<Item = &'a ConcertRecord>,
    Z: TimeZone,
{
    let mut future = Vec::new();
    let mut past = Vec::new();

    for record in records {
        let starts_at = record.starts_at(tz).ok();
        match starts_at {
            Some(instant) if instant >= now => future.push((starts_at, record)),
            _ => past.push((starts_at, record)),
        }
    }

    Schedule {
        future: sorted(future, order),
        past: sorted(past, order),
    }
}

/// Stable sort on the parsed instant. `None` compares below every instant.
fn sorted<'a>(
    mut entries: Vec<(Option<DateTime<Utc>>, &'a ConcertRecord)>,
    order: SortOrder,
) -> Vec<&'a ConcertRecord> {
    entries.sort_by(|a, b| order.apply(a.0.cmp(&b.0)));
    entries.into_iter().map(|(_, record)| record).collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────
