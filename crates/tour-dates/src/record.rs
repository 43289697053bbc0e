//! The concert record as it appears in a tour dataset.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::date::{parse_date_in, PartialDate};
use crate::error::Result;

/// One concert: where it happens and when.
///
/// `date` is kept as the raw `DD-MM-YYYY` string (possibly with `??`
/// placeholders) because that is what listings display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConcertRecord {
    /// Short country code, e.g. `"US"` or `"FR"`.
    pub country: String,
    pub city: String,
    pub venue: String,
    /// Raw `DD-MM-YYYY` date; `DD` and `MM` may be `??`.
    pub date: String,
}

impl ConcertRecord {
    pub fn new(
        country: impl Into<String>,
        city: impl Into<String>,
        venue: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            city: city.into(),
            venue: venue.into(),
            date: date.into(),
        }
    }

    /// The structured form of [`ConcertRecord::date`].
    pub fn partial_date(&self) -> Result<PartialDate> {
        self.date.parse()
    }

    /// Local midnight of the concert day in `tz`, as a UTC instant.
    pub fn starts_at<Z: TimeZone>(&self, tz: &Z) -> Result<DateTime<Utc>> {
        parse_date_in(&self.date, tz)
    }
}
