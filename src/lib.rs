//! # tide-rs
//!
//! Harmonic tide prediction from a catalog of station constants.
//!
//! This crate provides:
//! - A validated, read-only catalog of constituents, stations and yearly
//!   node corrections ([`catalog`])
//! - Station lookup by name fragment with typed ambiguity errors ([`resolve`])
//! - UTC sampling grids and year bookkeeping ([`time`])
//! - Harmonic synthesis of water heights ([`prediction`])
//! - High/low water extraction and observation comparison ([`analysis`])
//! - JSON catalog documents ([`io`]) and TOML settings ([`config`])
//!
//! # Example
//!
//! ```ignore
//! use tide_rs::{predict, read_catalog_file, PredictionRequest};
//!
//! let catalog = read_catalog_file("puget_sound.json")?;
//! let request = PredictionRequest::new("Seattle", start, end, 6);
//! for p in &predict(&catalog, &request)? {
//!     println!("{},{:.3}", p.time, p.height);
//! }
//! ```

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod io;
pub mod prediction;
pub mod resolve;
pub mod time;
pub mod types;

pub use analysis::{ComparisonMetrics, TideExtremum, compare_with_observations, find_extrema};
pub use catalog::{
    CatalogLoadError, Constituent, HarmonicCatalog, HarmonicCatalogBuilder, HarmonicConstant,
    NodeCorrection, StationHarmonics, YearCorrectionTable,
};
pub use config::{ConfigError, TideConfig};
pub use io::{CatalogFileError, parse_catalog, read_catalog_file};
pub use prediction::{
    HarmonicSynthesis, PredictionError, PredictionPoint, PredictionRequest, PredictionSeries,
    Predictor, PredictorConfig, predict,
};
pub use resolve::{ResolveError, StationChooser, resolve};
pub use time::{RequestError, TimeGrid, YearOutOfRange};
pub use types::LengthUnit;
