//! # tour-dates
//!
//! Deterministic concert listings for tour pages.
//!
//! Given a fixed dataset of concerts, a selected country, a sort direction,
//! and a "now" anchor, this crate produces the upcoming and past concerts
//! exactly the same way every time. All functions are pure: the caller
//! supplies "now" and the timezone in which concert days begin.
//!
//! ## Modules
//!
//! - [`date`] — `DD-MM-YYYY` parsing with `??` placeholders, local-midnight instants
//! - [`record`] — The concert record
//! - [`dataset`] — Loading and validating a JSON dataset
//! - [`filter`] — Country filtering and the country selector options
//! - [`schedule`] — Upcoming/past partitioning and date sorting
//! - [`view`] — Selector state and display rows
//! - [`flag`] — Country-code flag lookup
//! - [`error`] — Error types

pub mod dataset;
pub mod date;
pub mod error;
pub mod filter;
pub mod flag;
pub mod record;
pub mod schedule;
pub mod view;

pub use dataset::{Dataset, InvalidRecord};
pub use date::{parse_date, parse_date_in, parse_timezone, DatePrecision, PartialDate};
pub use error::TourError;
pub use filter::{country_counts, distinct_countries, filter_by_country, CountryFilter};
pub use flag::flag_emoji;
pub use record::ConcertRecord;
pub use schedule::{partition_and_sort, Schedule, SortOrder};
pub use view::{history_toggle_label, DisplayRow, TourView, ViewState};
