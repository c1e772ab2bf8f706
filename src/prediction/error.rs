//! Prediction errors.

use thiserror::Error;

use crate::catalog::CatalogLoadError;
use crate::resolve::ResolveError;
use crate::time::{RequestError, YearOutOfRange};

/// Error type for a failed prediction request.
///
/// Every variant is detected before any height is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// Station query did not resolve to exactly one station
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Invalid time range or interval
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Requested instants fall outside the tabulated years
    #[error(transparent)]
    YearOutOfRange(#[from] YearOutOfRange),

    /// Station does not line up with the catalog's constituents
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}
