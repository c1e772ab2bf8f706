//! Per-station harmonic constants.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::YearCorrectionTable;

/// Amplitude and phase lag of one constituent at one station.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HarmonicConstant {
    /// Amplitude in the catalog length unit (non-negative)
    pub amplitude: f64,
    /// Phase lag (kappa) in degrees
    pub kappa: f64,
}

impl HarmonicConstant {
    /// Create a harmonic constant.
    pub fn new(amplitude: f64, kappa: f64) -> Self {
        Self { amplitude, kappa }
    }
}

/// Harmonic constants of a prediction-capable station.
///
/// `constants[i]` belongs to the catalog's `i`-th constituent. The catalog
/// checks that alignment when it is built.
#[derive(Clone, Debug, PartialEq)]
pub struct StationHarmonics {
    /// Station name, unique within a catalog
    pub name: String,
    /// External identifier (e.g., a NOAA station number)
    pub id: Option<String>,
    /// Optional (longitude, latitude) in degrees
    pub location: Option<(f64, f64)>,
    /// Height datum added to every prediction
    pub datum: f64,
    /// One constant per catalog constituent, in catalog order
    pub constants: Vec<HarmonicConstant>,
    /// Station-specific corrections overriding the catalog table
    pub corrections: Option<Arc<YearCorrectionTable>>,
}

impl StationHarmonics {
    /// Create a station from its datum and constants.
    pub fn new(name: impl Into<String>, datum: f64, constants: Vec<HarmonicConstant>) -> Self {
        Self {
            name: name.into(),
            id: None,
            location: None,
            datum,
            constants,
            corrections: None,
        }
    }

    /// Set the external identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the station location.
    pub fn with_location(mut self, longitude: f64, latitude: f64) -> Self {
        self.location = Some((longitude, latitude));
        self
    }

    /// Use a station-specific correction table.
    pub fn with_corrections(mut self, table: impl Into<Arc<YearCorrectionTable>>) -> Self {
        self.corrections = Some(table.into());
        self
    }

    /// Check whether `identifier` is this station's exact name or id.
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        self.name == identifier || self.id.as_deref() == Some(identifier)
    }

    /// Number of harmonic constants.
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    /// Check if the station has no constants.
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}
