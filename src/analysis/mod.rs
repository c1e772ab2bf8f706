//! Post-processing of predicted series.
//!
//! - [`find_extrema`] extracts high and low waters
//! - [`compare_with_observations`] scores a prediction against observed heights
//!
//! # Example
//!
//! ```ignore
//! use tide_rs::analysis::{compare_with_observations, find_extrema};
//!
//! for e in find_extrema(&series) {
//!     println!("{} {} {:.2}", e.kind, e.time, e.height);
//! }
//!
//! if let Some(m) = compare_with_observations(&series, &observed) {
//!     println!("RMSE: {:.3}", m.rmse);
//!     println!("Skill: {:.2}", m.skill_score);
//! }
//! ```

mod extrema;
mod metrics;

pub use extrema::{ExtremumKind, TideExtremum, find_extrema, next_high_low};
pub use metrics::{ComparisonMetrics, compare_with_observations};
