//! Sampling instants and their position within the calendar year.
//!
//! All instants are UTC. [`TimeGrid`] produces the sampling instants of a
//! request; [`YearPosition`] maps each one to its year, the hours elapsed
//! since the year started, and the matching correction-table row.

mod grid;
mod year;

pub use grid::{
    MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES, RequestError, TimeGrid, TimeGridIter,
    validate_interval,
};
pub use year::{YearOutOfRange, YearPosition, check_year_span, hours_since_year_start};
