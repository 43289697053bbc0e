//! Plain-text rendering of listings and reports.

use std::fmt::Write;

use tour_dates::{DatePrecision, DisplayRow, InvalidRecord, PartialDate, TourView};

pub fn tour_view(view: &TourView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current country selected: {}", view.selected_country);
    let _ = writeln!(out, "Countries: {}", view.countries.join(" | "));
    let _ = writeln!(out, "Sort order: {}", view.order);

    section(&mut out, "Upcoming", &view.upcoming);
    match &view.history {
        Some(history) => section(&mut out, "History", history),
        None => {
            let _ = writeln!(out);
            let _ = writeln!(out, "[{}] pass --history to list past concerts", view.history_toggle);
        }
    }
    out
}

fn section(out: &mut String, title: &str, rows: &[DisplayRow]) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{} ({})", title, rows.len());
    if rows.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for row in rows {
        let flag = row.flag.as_deref().unwrap_or("  ");
        let _ = writeln!(out, "  {} {}", flag, row.primary());
        let _ = writeln!(out, "     {}", row.secondary());
    }
}

/// One line per selector option with its concert count.
pub fn countries(total: usize, counts: &[(&str, usize)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ALL ({})", total);
    for (country, n) in counts {
        let _ = writeln!(out, "{} ({})", country, n);
    }
    out
}

pub fn check_report(total: usize, invalid: &[InvalidRecord]) -> String {
    let mut out = String::new();
    for entry in invalid {
        let _ = writeln!(
            out,
            "#{} {} - {} [{}]: {}",
            entry.index, entry.record.city, entry.record.venue, entry.record.date, entry.reason
        );
    }
    let _ = writeln!(out, "{} of {} records have invalid dates", invalid.len(), total);
    out
}

pub fn parsed_date(input: &str, date: &PartialDate, local: &str, utc: &str) -> String {
    let precision = match date.precision() {
        DatePrecision::Day => "day",
        DatePrecision::Month => "month",
        DatePrecision::Year => "year",
    };
    let mut out = String::new();
    let _ = writeln!(out, "input:     {}", input);
    let _ = writeln!(out, "date:      {}", date.resolve());
    let _ = writeln!(out, "precision: {}", precision);
    let _ = writeln!(out, "local:     {}", local);
    let _ = writeln!(out, "utc:       {}", utc);
    out
}
