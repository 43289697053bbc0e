//! Country filtering and the list of countries offered for selection.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Result, TourError};
use crate::record::ConcertRecord;

/// Textual form of [`CountryFilter::All`].
pub const ALL_COUNTRIES: &str = "ALL";

/// Which country a listing is narrowed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CountryFilter {
    #[default]
    All,
    /// Exact, case-sensitive country code.
    Code(String),
}

impl CountryFilter {
    pub fn matches(&self, record: &ConcertRecord) -> bool {
        match self {
            CountryFilter::All => true,
            CountryFilter::Code(code) => record.country == *code,
        }
    }

    /// `"ALL"` or the selected country code.
    pub fn label(&self) -> &str {
        match self {
            CountryFilter::All => ALL_COUNTRIES,
            CountryFilter::Code(code) => code,
        }
    }
}

impl FromStr for CountryFilter {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ALL_COUNTRIES => Ok(CountryFilter::All),
            "" => Err(TourError::InvalidCountry(
                "country code cannot be empty".to_string(),
            )),
            code => Ok(CountryFilter::Code(code.to_string())),
        }
    }
}

impl fmt::Display for CountryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CountryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Keep the records matching `filter`, preserving their relative order.
///
/// The input is only borrowed; the returned references point into it.
pub fn filter_by_country<'a, I>(records: I, filter: &CountryFilter) -> Vec<&'a ConcertRecord>
where
    I: IntoIterator<Item = &'a ConcertRecord>,
{
    records.into_iter().filter(|r| filter.matches(r)).collect()
}

/// Unique country codes in order of first appearance.
pub fn distinct_countries<'a, I>(records: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a ConcertRecord>,
{
    country_counts(records)
        .into_iter()
        .map(|(country, _)| country)
        .collect()
}

/// Unique country codes with the number of concerts in each, in order of
/// first appearance.
pub fn country_counts<'a, I>(records: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a ConcertRecord>,
{
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(c, _)| *c == record.country) {
            Some((_, n)) => *n += 1,
            None => counts.push((record.country.as_str(), 1)),
        }
    }
    counts
}
