//! Prediction requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::{RequestError, TimeGrid};

/// What to predict: a station query, a UTC range and a sampling interval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Station name, name fragment, or external identifier
    pub station: String,
    /// First instant (UTC)
    pub start: DateTime<Utc>,
    /// Last allowed instant (UTC)
    pub end: DateTime<Utc>,
    /// Sampling interval in minutes, within [1, 60]
    pub interval_minutes: u32,
}

impl PredictionRequest {
    /// Create a request.
    pub fn new(
        station: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval_minutes: u32,
    ) -> Self {
        Self {
            station: station.into(),
            start,
            end,
            interval_minutes,
        }
    }

    /// Request a single instant.
    pub fn at(station: impl Into<String>, instant: DateTime<Utc>) -> Self {
        Self::new(station, instant, instant, 1)
    }

    /// Validate the range and interval and build the sampling grid.
    pub fn grid(&self) -> Result<TimeGrid, RequestError> {
        TimeGrid::new(self.start, self.end, self.interval_minutes)
    }
}
