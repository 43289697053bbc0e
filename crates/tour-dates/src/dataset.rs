//! Loading the read-only concert dataset.
//!
//! A dataset is a JSON array of [`ConcertRecord`] objects:
//!
//! ```json
//! [
//!   { "country": "FR", "city": "Paris", "venue": "Olympia", "date": "??-06-2024" }
//! ]
//! ```
//!
//! It is loaded once and never modified; every listing is a view derived
//! from [`Dataset::records`].

use std::fs;
use std::path::Path;

use chrono::TimeZone;
use serde::Serialize;

use crate::error::{Result, TourError};
use crate::record::ConcertRecord;

/// An ordered, immutable collection of concerts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<ConcertRecord>,
}

/// A record whose date fails strict parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidRecord {
    /// Position in the dataset.
    pub index: usize,
    pub record: ConcertRecord,
    pub reason: String,
}

impl Dataset {
    pub fn new(records: Vec<ConcertRecord>) -> Self {
        Self { records }
    }

    /// Parse a dataset from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::Dataset`] if the JSON is malformed or a record is
    /// missing a field. Dates are not validated here; see [`Dataset::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str::<Vec<ConcertRecord>>(json)
            .map(Self::new)
            .map_err(|e| TourError::Dataset(format!("invalid dataset JSON: {}", e)))
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::Dataset`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| TourError::Dataset(format!("cannot read '{}': {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn records(&self) -> &[ConcertRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record whose date is rejected by strict parsing in `tz`, in
    /// dataset order.
    pub fn validate<Z: TimeZone>(&self, tz: &Z) -> Vec<InvalidRecord> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                record.starts_at(tz).err().map(|e| InvalidRecord {
                    index,
                    record: record.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}

impl From<Vec<ConcertRecord>> for Dataset {
    fn from(records: Vec<ConcertRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ConcertRecord;
    type IntoIter = std::slice::Iter<'a, ConcertRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
