//! Strongly-typed domain types for safer APIs.
//!
//! Index newtypes keep station positions, constituent columns and
//! correction-table rows apart, and [`LengthUnit`] labels heights.
//!
//! # Example
//!
//! ```
//! use tide_rs::types::{LengthUnit, YearIndex};
//!
//! let row = YearIndex::new(2);
//! let rows = vec![2023, 2024, 2025];
//! assert_eq!(rows[row], 2025);
//! assert_eq!(LengthUnit::Meters.abbreviation(), "m");
//! ```

mod indices;
mod units;

pub use indices::{ConstituentIndex, StationIndex, YearIndex};
pub use units::LengthUnit;
