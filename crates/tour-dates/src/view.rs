//! The listing a user sees: selector state in, display rows out.
//!
//! [`ViewState`] holds the user's choices (country, sort order, whether the
//! history is shown). It is an immutable value: changing a choice produces a
//! new state, and [`TourView::build`] recomputes the whole listing from the
//! dataset each time.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::filter::{distinct_countries, filter_by_country, CountryFilter, ALL_COUNTRIES};
use crate::flag::flag_emoji;
use crate::record::ConcertRecord;
use crate::schedule::{partition_and_sort, SortOrder};

/// Label of the history toggle while the history is hidden.
pub const SHOW_HISTORY: &str = "SHOW HISTORY";
/// Label of the history toggle while the history is shown.
pub const HIDE_HISTORY: &str = "HIDE HISTORY";

/// The user's current selections. Defaults: all countries, latest first,
/// history hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub country: CountryFilter,
    pub order: SortOrder,
    pub show_history: bool,
}

impl ViewState {
    pub fn with_country(self, country: CountryFilter) -> Self {
        Self { country, ..self }
    }

    pub fn with_order(self, order: SortOrder) -> Self {
        Self { order, ..self }
    }

    pub fn toggled_history(self) -> Self {
        Self {
            show_history: !self.show_history,
            ..self
        }
    }
}

/// Label for the button that flips [`ViewState::show_history`].
pub fn history_toggle_label(show_history: bool) -> &'static str {
    if show_history {
        HIDE_HISTORY
    } else {
        SHOW_HISTORY
    }
}

/// One rendered concert: `(flag, city, venue, raw date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    /// `None` when the country code has no flag.
    pub flag: Option<String>,
    pub country: String,
    pub city: String,
    pub venue: String,
    /// The date exactly as written in the dataset.
    pub date: String,
}

impl DisplayRow {
    /// `"{city} - {venue}"`.
    pub fn primary(&self) -> String {
        format!("{} - {}", self.city, self.venue)
    }

    pub fn secondary(&self) -> &str {
        &self.date
    }
}

impl From<&ConcertRecord> for DisplayRow {
    fn from(record: &ConcertRecord) -> Self {
        Self {
            flag: flag_emoji(&record.country),
            country: record.country.clone(),
            city: record.city.clone(),
            venue: record.venue.clone(),
            date: record.date.clone(),
        }
    }
}

/// Everything needed to draw the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourView {
    /// `"ALL"` or the selected country code.
    pub selected_country: String,
    /// Selector options: `"ALL"` followed by each country in the dataset.
    pub countries: Vec<String>,
    pub order: SortOrder,
    pub history_toggle: &'static str,
    /// Concerts on or after "now".
    pub upcoming: Vec<DisplayRow>,
    /// Past concerts; only present while the history is shown.
    pub history: Option<Vec<DisplayRow>>,
}

impl TourView {
    /// Filter `records` by the selected country, split them around `now`,
    /// and sort both halves.
    ///
    /// The country selector always lists every country in `records`,
    /// whatever is currently selected.
    pub fn build<Z: TimeZone>(
        records: &[ConcertRecord],
        state: &ViewState,
        now: DateTime<Utc>,
        tz: &Z,
    ) -> Self {
        let countries = std::iter::once(ALL_COUNTRIES)
            .chain(distinct_countries(records))
            .map(str::to_string)
            .collect();

        let filtered = filter_by_country(records, &state.country);
        let schedule = partition_and_sort(filtered, now, state.order, tz);

        Self {
            selected_country: state.country.label().to_string(),
            countries,
            order: state.order,
            history_toggle: history_toggle_label(state.show_history),
            upcoming: rows(&schedule.future),
            history: state.show_history.then(|| rows(&schedule.past)),
        }
    }
}

fn rows(records: &[&ConcertRecord]) -> Vec<DisplayRow> {
    records.iter().map(|r| DisplayRow::from(*r)).collect()
}
