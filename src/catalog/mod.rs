//! Harmonic catalog: stations, constituents and yearly corrections.
//!
//! The catalog is assembled once through [`HarmonicCatalogBuilder`] and is
//! read-only afterwards. Building validates the alignment every prediction
//! relies on:
//!
//! ```text
//! constituents:      [ M2,        S2,        K1       ]
//! station constants: [ (A, κ),    (A, κ),    (A, κ)   ]   one per constituent
//! correction row y:  [ (f, u),    (f, u),    (f, u)   ]   one per constituent
//! ```
//!
//! # Example
//!
//! ```
//! use tide_rs::catalog::{
//!     Constituent, HarmonicCatalog, HarmonicConstant, StationHarmonics, YearCorrectionTable,
//! };
//!
//! let catalog = HarmonicCatalog::builder()
//!     .constituent(Constituent::standard("M2").unwrap())
//!     .corrections(YearCorrectionTable::identity(2024, 2, 1))
//!     .station(StationHarmonics::new("Seattle, WA", 6.8, vec![HarmonicConstant::new(3.5, 140.0)]))
//!     .build()
//!     .unwrap();
//!
//! assert!(catalog.lookup("Seattle, WA").is_some());
//! ```

mod constituent;
mod corrections;
mod error;
mod station;

pub use constituent::{Constituent, constituent_speed};
pub use corrections::{NodeCorrection, YearCorrectionTable};
pub use error::CatalogLoadError;
pub use station::{HarmonicConstant, StationHarmonics};

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::types::{LengthUnit, StationIndex};

/// Immutable table of stations and the data needed to predict for them.
///
/// Shared read-only between any number of concurrent predictions.
#[derive(Clone, Debug)]
pub struct HarmonicCatalog {
    units: LengthUnit,
    constituents: Vec<Constituent>,
    corrections: Arc<YearCorrectionTable>,
    stations: Vec<StationHarmonics>,
}

impl HarmonicCatalog {
    /// Start building a catalog.
    pub fn builder() -> HarmonicCatalogBuilder {
        HarmonicCatalogBuilder::default()
    }

    /// Unit of datums and amplitudes.
    pub fn units(&self) -> LengthUnit {
        self.units
    }

    /// Constituents in column order.
    pub fn constituents(&self) -> &[Constituent] {
        &self.constituents
    }

    /// Catalog-wide correction table.
    pub fn corrections(&self) -> &YearCorrectionTable {
        &self.corrections
    }

    /// Correction table that applies to `station`.
    pub fn corrections_for<'a>(&'a self, station: &'a StationHarmonics) -> &'a YearCorrectionTable {
        station
            .corrections
            .as_deref()
            .unwrap_or(self.corrections.as_ref())
    }

    /// All stations in catalog order.
    pub fn stations(&self) -> &[StationHarmonics] {
        &self.stations
    }

    /// Station at a catalog position.
    pub fn station(&self, index: StationIndex) -> Option<&StationHarmonics> {
        self.stations.get(index.get())
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Check if the catalog has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Check that `station` lines up with this catalog's constituents.
    ///
    /// Stations taken from the catalog always pass; a station built
    /// elsewhere must carry one constant per constituent, and its own
    /// correction table (if any) one entry per constituent in every row.
    pub fn check_station(&self, station: &StationHarmonics) -> Result<(), CatalogLoadError> {
        validate_station(station, &self.constituents)?;
        if let Some(table) = &station.corrections {
            validate_table(table, self.constituents.len(), Some(&station.name))?;
        }
        Ok(())
    }

    /// Find a station by exact name or exact external identifier.
    pub fn lookup(&self, identifier: &str) -> Option<&StationHarmonics> {
        self.stations.iter().find(|s| s.is_identified_by(identifier))
    }
}

/// Builder for [`HarmonicCatalog`].
#[derive(Clone, Debug, Default)]
pub struct HarmonicCatalogBuilder {
    units: LengthUnit,
    constituents: Vec<Constituent>,
    corrections: Option<YearCorrectionTable>,
    stations: Vec<StationHarmonics>,
}

impl HarmonicCatalogBuilder {
    /// Set the length unit (default feet).
    pub fn units(mut self, units: LengthUnit) -> Self {
        self.units = units;
        self
    }

    /// Append a constituent column.
    pub fn constituent(mut self, constituent: Constituent) -> Self {
        self.constituents.push(constituent);
        self
    }

    /// Append several constituent columns.
    pub fn constituents(mut self, constituents: impl IntoIterator<Item = Constituent>) -> Self {
        self.constituents.extend(constituents);
        self
    }

    /// Set the catalog-wide correction table.
    pub fn corrections(mut self, table: YearCorrectionTable) -> Self {
        self.corrections = Some(table);
        self
    }

    /// Add a station.
    pub fn station(mut self, station: StationHarmonics) -> Self {
        self.stations.push(station);
        self
    }

    /// Add several stations.
    pub fn stations(mut self, stations: impl IntoIterator<Item = StationHarmonics>) -> Self {
        self.stations.extend(stations);
        self
    }

    /// Validate and freeze the catalog.
    pub fn build(self) -> Result<HarmonicCatalog, CatalogLoadError> {
        validate_constituents(&self.constituents)?;
        let n = self.constituents.len();

        let corrections = self
            .corrections
            .ok_or(CatalogLoadError::MissingCorrectionTable)?;
        validate_table(&corrections, n, None)?;

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for station in &self.stations {
            if !names.insert(station.name.as_str()) {
                return Err(CatalogLoadError::DuplicateStation(station.name.clone()));
            }
            if let Some(id) = &station.id {
                if !ids.insert(id.as_str()) {
                    return Err(CatalogLoadError::DuplicateStationId(id.clone()));
                }
            }
            validate_station(station, &self.constituents)?;
            if let Some(table) = &station.corrections {
                validate_table(table, n, Some(&station.name))?;
            }
        }
        for station in &self.stations {
            if let Some(id) = &station.id {
                if *id != station.name && names.contains(id.as_str()) {
                    return Err(CatalogLoadError::NameIdCollision {
                        id: id.clone(),
                        station: station.name.clone(),
                    });
                }
            }
        }

        debug!(
            constituents = n,
            stations = self.stations.len(),
            start_year = corrections.start_year(),
            years = corrections.n_years(),
            "built harmonic catalog"
        );

        Ok(HarmonicCatalog {
            units: self.units,
            constituents: self.constituents,
            corrections: Arc::new(corrections),
            stations: self.stations,
        })
    }
}

fn validate_constituents(constituents: &[Constituent]) -> Result<(), CatalogLoadError> {
    if constituents.is_empty() {
        return Err(CatalogLoadError::NoConstituents);
    }

    let mut seen = HashSet::new();
    for c in constituents {
        if !seen.insert(c.name.as_str()) {
            return Err(CatalogLoadError::DuplicateConstituent(c.name.clone()));
        }
        if !c.speed.is_finite() || c.speed <= 0.0 {
            return Err(CatalogLoadError::InvalidSpeed {
                name: c.name.clone(),
                speed: c.speed,
            });
        }
    }
    Ok(())
}

fn validate_table(
    table: &YearCorrectionTable,
    n_constituents: usize,
    owner: Option<&str>,
) -> Result<(), CatalogLoadError> {
    if table.is_empty() {
        return Err(CatalogLoadError::EmptyCorrectionTable {
            owner: owner.map(str::to_owned),
        });
    }

    for (year, row) in table.years() {
        if row.len() != n_constituents {
            return Err(CatalogLoadError::CorrectionColumnMismatch {
                owner: owner.map(str::to_owned),
                year,
                expected: n_constituents,
                found: row.len(),
            });
        }
        if row
            .iter()
            .any(|c| !c.node_factor.is_finite() || !c.equilibrium_argument.is_finite())
        {
            return Err(CatalogLoadError::NonFiniteValue(match owner {
                Some(station) => format!("corrections of station {station} for {year}"),
                None => format!("corrections for {year}"),
            }));
        }
    }
    Ok(())
}

fn validate_station(
    station: &StationHarmonics,
    constituents: &[Constituent],
) -> Result<(), CatalogLoadError> {
    if station.constants.len() != constituents.len() {
        return Err(CatalogLoadError::ConstituentCountMismatch {
            station: station.name.clone(),
            expected: constituents.len(),
            found: station.constants.len(),
        });
    }

    if !station.datum.is_finite() {
        return Err(CatalogLoadError::NonFiniteValue(format!(
            "datum of station {}",
            station.name
        )));
    }

    for (constant, constituent) in station.constants.iter().zip(constituents) {
        if !constant.amplitude.is_finite() || !constant.kappa.is_finite() {
            return Err(CatalogLoadError::NonFiniteValue(format!(
                "{} constant of station {}",
                constituent.name, station.name
            )));
        }
        if constant.amplitude < 0.0 {
            return Err(CatalogLoadError::NegativeAmplitude {
                station: station.name.clone(),
                constituent: constituent.name.clone(),
                amplitude: constant.amplitude,
            });
        }
    }
    Ok(())
}
