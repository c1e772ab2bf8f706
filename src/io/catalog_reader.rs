//! Reader for harmonic catalog documents.
//!
//! A catalog is stored as JSON. Station constants are keyed by constituent
//! name and may be listed in any order; correction rows are positional and
//! follow the `constituents` list.
//!
//! # File Format
//!
//! ```text
//! {
//!   "units": "feet",
//!   "start_year": 2024,
//!   "constituents": [{ "name": "M2" }, { "name": "K1" }, { "name": "X9", "speed": 15.5 }],
//!   "corrections": [
//!     [[0.97, 202.1], [1.09, 8.3], [1.0, 0.0]],
//!     [[0.98, 191.4], [1.07, 358.9], [1.0, 0.0]]
//!   ],
//!   "stations": [
//!     {
//!       "name": "Seattle, WA",
//!       "id": "9447130",
//!       "location": [-122.339, 47.603],
//!       "datum": 6.8,
//!       "constants": [
//!         { "constituent": "K1", "amplitude": 2.7, "kappa": 256.1 },
//!         { "constituent": "M2", "amplitude": 3.5, "kappa": 140.0 },
//!         { "constituent": "X9", "amplitude": 0.0, "kappa": 0.0 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! A constituent without a `speed` takes its standard speed. A station may
//! carry its own `"corrections": { "start_year": .., "rows": [..] }` table.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::catalog::{
    CatalogLoadError, Constituent, HarmonicCatalog, HarmonicConstant, NodeCorrection,
    StationHarmonics, YearCorrectionTable, constituent_speed,
};
use crate::types::LengthUnit;

/// Error type for catalog file loading.
#[derive(Debug, Error)]
pub enum CatalogFileError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Constituent without a speed that is not in the standard table
    #[error("constituent {0} has no standard speed; give one explicitly")]
    UnknownSpeed(String),

    /// The document is well formed but not a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}

/// A constituent column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstituentDocument {
    pub name: String,
    /// Degrees per hour; defaults to the standard speed for `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// One station constant, keyed by constituent name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantDocument {
    pub constituent: String,
    pub amplitude: f64,
    pub kappa: f64,
}

/// A station-specific correction table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectionTableDocument {
    pub start_year: i32,
    /// Per year, `[node_factor, equilibrium_argument]` per constituent
    pub rows: Vec<Vec<[f64; 2]>>,
}

/// A station entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `[longitude, latitude]` in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<[f64; 2]>,
    pub datum: f64,
    pub constants: Vec<ConstantDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrections: Option<CorrectionTableDocument>,
}

/// Serialized form of a [`HarmonicCatalog`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub units: LengthUnit,
    pub start_year: i32,
    pub constituents: Vec<ConstituentDocument>,
    /// Per year, `[node_factor, equilibrium_argument]` per constituent
    pub corrections: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    pub stations: Vec<StationDocument>,
}

impl CatalogDocument {
    /// Validate the document and build the catalog.
    pub fn into_catalog(self) -> Result<HarmonicCatalog, CatalogFileError> {
        let constituents = self
            .constituents
            .into_iter()
            .map(|c| -> Result<Constituent, CatalogFileError> {
                let speed = match c.speed {
                    Some(speed) => speed,
                    None => constituent_speed(&c.name)
                        .ok_or_else(|| CatalogFileError::UnknownSpeed(c.name.clone()))?,
                };
                Ok(Constituent::new(c.name, speed))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let columns: HashMap<&str, usize> = constituents
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.as_str(), i))
            .collect();

        let stations = self
            .stations
            .into_iter()
            .map(|s| station_from_document(s, &constituents, &columns))
            .collect::<Result<Vec<_>, CatalogLoadError>>()?;

        let catalog = HarmonicCatalog::builder()
            .units(self.units)
            .constituents(constituents)
            .corrections(table_from_rows(self.start_year, self.corrections))
            .stations(stations)
            .build()?;
        Ok(catalog)
    }
}

impl From<&HarmonicCatalog> for CatalogDocument {
    fn from(catalog: &HarmonicCatalog) -> Self {
        let constituents = catalog.constituents();
        Self {
            units: catalog.units(),
            start_year: catalog.corrections().start_year(),
            constituents: constituents
                .iter()
                .map(|c| ConstituentDocument {
                    name: c.name.clone(),
                    speed: Some(c.speed),
                })
                .collect(),
            corrections: rows_from_table(catalog.corrections()),
            stations: catalog
                .stations()
                .iter()
                .map(|s| StationDocument {
                    name: s.name.clone(),
                    id: s.id.clone(),
                    location: s.location.map(|(lon, lat)| [lon, lat]),
                    datum: s.datum,
                    constants: constituents
                        .iter()
                        .zip(&s.constants)
                        .map(|(c, k)| ConstantDocument {
                            constituent: c.name.clone(),
                            amplitude: k.amplitude,
                            kappa: k.kappa,
                        })
                        .collect(),
                    corrections: s.corrections.as_deref().map(|t| CorrectionTableDocument {
                        start_year: t.start_year(),
                        rows: rows_from_table(t),
                    }),
                })
                .collect(),
        }
    }
}

fn table_from_rows(start_year: i32, rows: Vec<Vec<[f64; 2]>>) -> YearCorrectionTable {
    YearCorrectionTable::new(
        start_year,
        rows.into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|[f, u]| NodeCorrection::new(f, u))
                    .collect()
            })
            .collect(),
    )
}

fn rows_from_table(table: &YearCorrectionTable) -> Vec<Vec<[f64; 2]>> {
    table
        .years()
        .map(|(_, row)| {
            row.iter()
                .map(|c| [c.node_factor, c.equilibrium_argument])
                .collect()
        })
        .collect()
}

/// Place named constants into catalog column order.
fn station_from_document(
    doc: StationDocument,
    constituents: &[Constituent],
    columns: &HashMap<&str, usize>,
) -> Result<StationHarmonics, CatalogLoadError> {
    let mut slots: Vec<Option<HarmonicConstant>> = vec![None; constituents.len()];

    for constant in &doc.constants {
        let &column = columns.get(constant.constituent.as_str()).ok_or_else(|| {
            CatalogLoadError::UnknownConstituent {
                station: doc.name.clone(),
                constituent: constant.constituent.clone(),
            }
        })?;
        if slots[column].is_some() {
            return Err(CatalogLoadError::DuplicateConstant {
                station: doc.name.clone(),
                constituent: constant.constituent.clone(),
            });
        }
        slots[column] = Some(HarmonicConstant::new(constant.amplitude, constant.kappa));
    }

    let constants = slots
        .into_iter()
        .zip(constituents)
        .map(|(slot, c)| {
            slot.ok_or_else(|| CatalogLoadError::MissingConstant {
                station: doc.name.clone(),
                constituent: c.name.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut station = StationHarmonics::new(doc.name, doc.datum, constants);
    if let Some(id) = doc.id {
        station = station.with_id(id);
    }
    if let Some([lon, lat]) = doc.location {
        station = station.with_location(lon, lat);
    }
    if let Some(table) = doc.corrections {
        station = station.with_corrections(table_from_rows(table.start_year, table.rows));
    }
    Ok(station)
}

/// Parse a catalog from a JSON string.
pub fn parse_catalog(content: &str) -> Result<HarmonicCatalog, CatalogFileError> {
    let document: CatalogDocument = serde_json::from_str(content)?;
    document.into_catalog()
}

/// Read a catalog from a JSON file.
pub fn read_catalog_file(path: impl AsRef<Path>) -> Result<HarmonicCatalog, CatalogFileError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let document: CatalogDocument = serde_json::from_reader(reader)?;
    let catalog = document.into_catalog()?;

    info!(
        path = %path.display(),
        stations = catalog.len(),
        constituents = catalog.constituents().len(),
        "loaded harmonic catalog"
    );
    Ok(catalog)
}

/// Write a catalog as pretty-printed JSON.
pub fn write_catalog_file(
    catalog: &HarmonicCatalog,
    path: impl AsRef<Path>,
) -> Result<(), CatalogFileError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &CatalogDocument::from(catalog))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TOL: f64 = 1e-12;

    const SAMPLE: &str = r#"{
        "units": "meters",
        "start_year": 2024,
        "constituents": [{ "name": "M2" }, { "name": "K1" }],
        "corrections": [
            [[1.0, 0.0], [1.0, 0.0]],
            [[0.97, 12.5], [1.1, 300.0]]
        ],
        "stations": [
            {
                "name": "Bergen",
                "id": "BGO",
                "location": [5.32, 60.39],
                "datum": 0.9,
                "constants": [
                    { "constituent": "K1", "amplitude": 0.08, "kappa": 45.2 },
                    { "constituent": "M2", "amplitude": 0.45, "kappa": 125.3 }
                ]
            }
        ]
    }"#;

    fn with_station(constants: &str) -> String {
        format!(
            r#"{{
                "start_year": 2024,
                "constituents": [{{ "name": "M2" }}, {{ "name": "S2" }}],
                "corrections": [[[1.0, 0.0], [1.0, 0.0]]],
                "stations": [{{ "name": "A", "datum": 0.0, "constants": [{constants}] }}]
            }}"#
        )
    }

    #[test]
    fn test_parse_reorders_constants() {
        let catalog = parse_catalog(SAMPLE).unwrap();

        assert_eq!(catalog.units(), LengthUnit::Meters);
        assert_eq!(catalog.corrections().n_years(), 2);

        let bergen = catalog.lookup("BGO").unwrap();
        assert_eq!(bergen.location, Some((5.32, 60.39)));
        assert!((bergen.constants[0].amplitude - 0.45).abs() < TOL);
        assert!((bergen.constants[1].kappa - 45.2).abs() < TOL);
    }

    #[test]
    fn test_default_speed_from_table() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert!((catalog.constituents()[0].speed - 28.9841042).abs() < TOL);
        assert!((catalog.constituents()[1].speed - 15.0410686).abs() < TOL);
    }

    #[test]
    fn test_unknown_speed() {
        let json = r#"{
            "start_year": 2024,
            "constituents": [{ "name": "XYZ" }],
            "corrections": [[[1.0, 0.0]]]
        }"#;
        assert!(matches!(
            parse_catalog(json),
            Err(CatalogFileError::UnknownSpeed(name)) if name == "XYZ"
        ));
    }

    #[test]
    fn test_unknown_constituent() {
        let json = with_station(
            r#"{ "constituent": "M2", "amplitude": 1.0, "kappa": 0.0 },
               { "constituent": "S2", "amplitude": 1.0, "kappa": 0.0 },
               { "constituent": "K1", "amplitude": 1.0, "kappa": 0.0 }"#,
        );
        assert!(matches!(
            parse_catalog(&json),
            Err(CatalogFileError::Catalog(CatalogLoadError::UnknownConstituent { constituent, .. }))
                if constituent == "K1"
        ));
    }

    #[test]
    fn test_missing_constant() {
        let json = with_station(r#"{ "constituent": "M2", "amplitude": 1.0, "kappa": 0.0 }"#);
        assert!(matches!(
            parse_catalog(&json),
            Err(CatalogFileError::Catalog(CatalogLoadError::MissingConstant { constituent, .. }))
                if constituent == "S2"
        ));
    }

    #[test]
    fn test_duplicate_constant() {
        let json = with_station(
            r#"{ "constituent": "M2", "amplitude": 1.0, "kappa": 0.0 },
               { "constituent": "M2", "amplitude": 2.0, "kappa": 0.0 }"#,
        );
        assert!(matches!(
            parse_catalog(&json),
            Err(CatalogFileError::Catalog(CatalogLoadError::DuplicateConstant { .. }))
        ));
    }

    #[test]
    fn test_misaligned_corrections() {
        let json = r#"{
            "start_year": 2024,
            "constituents": [{ "name": "M2" }, { "name": "S2" }],
            "corrections": [[[1.0, 0.0]]]
        }"#;
        assert!(matches!(
            parse_catalog(json),
            Err(CatalogFileError::Catalog(CatalogLoadError::CorrectionColumnMismatch { .. }))
        ));
    }

    #[test]
    fn test_station_correction_override() {
        let json = r#"{
            "start_year": 2024,
            "constituents": [{ "name": "M2" }],
            "corrections": [[[1.0, 0.0]]],
            "stations": [{
                "name": "A",
                "datum": 0.0,
                "constants": [{ "constituent": "M2", "amplitude": 1.0, "kappa": 0.0 }],
                "corrections": { "start_year": 2030, "rows": [[[0.9, 5.0]]] }
            }]
        }"#;
        let catalog = parse_catalog(json).unwrap();
        let station = catalog.lookup("A").unwrap();
        assert_eq!(catalog.corrections_for(station).start_year(), 2030);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_catalog("{ not json"),
            Err(CatalogFileError::JsonError(_))
        ));
    }

    #[test]
    fn test_read_catalog_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = read_catalog_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.lookup("Bergen").is_some());
    }

    #[test]
    fn test_missing_file() {
        let result = read_catalog_file("/nonexistent/catalog.json");
        assert!(matches!(result, Err(CatalogFileError::IoError(_))));
    }

    #[test]
    fn test_write_then_read() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let file = NamedTempFile::new().unwrap();

        write_catalog_file(&catalog, file.path()).unwrap();
        let reread = read_catalog_file(file.path()).unwrap();

        assert_eq!(reread.stations(), catalog.stations());
        assert_eq!(reread.corrections(), catalog.corrections());
    }
}
