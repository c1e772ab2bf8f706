//! Tide-height prediction.
//!
//! [`HarmonicSynthesis`] evaluates one station at one instant; [`Predictor`]
//! turns a [`PredictionRequest`] into a [`PredictionSeries`] after resolving
//! the station and validating the range, interval and year coverage.
//!
//! # Example
//!
//! ```ignore
//! use tide_rs::prediction::{predict, PredictionRequest};
//!
//! let request = PredictionRequest::new("Seattle", start, end, 6);
//! let series = predict(&catalog, &request)?;
//! ```

mod error;
mod predictor;
mod request;
mod series;
mod synthesis;

pub use error::PredictionError;
pub use predictor::{PredictionStream, Predictor, PredictorConfig, predict};
pub use request::PredictionRequest;
pub use series::{PredictionPoint, PredictionSeries};
pub use synthesis::{HarmonicSynthesis, constituent_height};
