//! Calendar-year position of an instant.
//!
//! Harmonic constants are referenced to the start of each calendar year:
//! the phase argument uses hours elapsed since Jan 1 00:00 UTC, and the
//! node factor / equilibrium argument come from that year's table row.

use chrono::{DateTime, Datelike, Timelike, Utc};
use thiserror::Error;

use crate::catalog::YearCorrectionTable;
use crate::types::YearIndex;

/// Error type for an instant whose year has no correction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("year {year} is outside the correction table ({first_year}..={last_year})")]
pub struct YearOutOfRange {
    /// Calendar year of the instant
    pub year: i32,
    /// First tabulated year
    pub first_year: i32,
    /// Last tabulated year
    pub last_year: i32,
}

/// Where an instant falls within its calendar year.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YearPosition {
    /// UTC calendar year
    pub year: i32,
    /// Hours since 00:00:00 UTC on January 1, fractional
    pub hours_since_year_start: f64,
    /// Correction-table row for `year`
    pub row: YearIndex,
}

impl YearPosition {
    /// Locate `instant` in `table`.
    ///
    /// # Errors
    ///
    /// [`YearOutOfRange`] if the table has no row for the instant's year.
    pub fn locate(
        instant: DateTime<Utc>,
        table: &YearCorrectionTable,
    ) -> Result<Self, YearOutOfRange> {
        let year = instant.year();
        let row = table.row_index(year).ok_or_else(|| out_of_range(year, table))?;

        Ok(Self {
            year,
            hours_since_year_start: hours_since_year_start(instant),
            row,
        })
    }
}

/// Hours elapsed since the start of the instant's UTC calendar year.
pub fn hours_since_year_start(instant: DateTime<Utc>) -> f64 {
    let whole_hours = instant.ordinal0() * 24 + instant.hour();
    let seconds = f64::from(instant.minute() * 60 + instant.second())
        + f64::from(instant.nanosecond()) * 1e-9;
    f64::from(whole_hours) + seconds / 3600.0
}

/// Check that every year from `first` to `last` has a table row.
pub fn check_year_span(
    first: DateTime<Utc>,
    last: DateTime<Utc>,
    table: &YearCorrectionTable,
) -> Result<(), YearOutOfRange> {
    for year in [first.year(), last.year()] {
        if table.row_index(year).is_none() {
            return Err(out_of_range(year, table));
        }
    }
    Ok(())
}

fn out_of_range(year: i32, table: &YearCorrectionTable) -> YearOutOfRange {
    let first_year = table.start_year();
    YearOutOfRange {
        year,
        first_year,
        last_year: table.end_year().unwrap_or(first_year - 1),
    }
}
