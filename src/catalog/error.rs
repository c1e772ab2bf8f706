//! Catalog construction errors.

use thiserror::Error;

/// Error type for a malformed or misaligned harmonic catalog.
///
/// Any of these aborts catalog construction; a catalog that exists is
/// always aligned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogLoadError {
    /// The catalog declares no constituents
    #[error("catalog declares no constituents")]
    NoConstituents,

    /// Two constituents share a name
    #[error("duplicate constituent: {0}")]
    DuplicateConstituent(String),

    /// Constituent speed is zero, negative or not finite
    #[error("constituent {name} has invalid speed {speed}")]
    InvalidSpeed { name: String, speed: f64 },

    /// No correction table was supplied
    #[error("catalog has no year correction table")]
    MissingCorrectionTable,

    /// A correction table covers zero years
    #[error("year correction table{} covers zero years", owner_suffix(.owner))]
    EmptyCorrectionTable { owner: Option<String> },

    /// A correction row does not have one entry per constituent
    #[error(
        "year correction row {year}{} has {found} entries, expected {expected}",
        owner_suffix(.owner)
    )]
    CorrectionColumnMismatch {
        owner: Option<String>,
        year: i32,
        expected: usize,
        found: usize,
    },

    /// A station does not have one constant per constituent
    #[error("station {station} has {found} harmonic constants, expected {expected}")]
    ConstituentCountMismatch {
        station: String,
        expected: usize,
        found: usize,
    },

    /// A named constant does not refer to a catalog constituent
    #[error("station {station} references unknown constituent {constituent}")]
    UnknownConstituent { station: String, constituent: String },

    /// A named constant appears twice for one station
    #[error("station {station} lists constituent {constituent} more than once")]
    DuplicateConstant { station: String, constituent: String },

    /// A station lacks a constant for a catalog constituent
    #[error("station {station} has no constant for constituent {constituent}")]
    MissingConstant { station: String, constituent: String },

    /// Amplitudes are magnitudes
    #[error("station {station} has negative amplitude {amplitude} for {constituent}")]
    NegativeAmplitude {
        station: String,
        constituent: String,
        amplitude: f64,
    },

    /// NaN or infinity somewhere in the catalog
    #[error("non-finite value in {0}")]
    NonFiniteValue(String),

    /// Two stations share a name
    #[error("duplicate station name: {0}")]
    DuplicateStation(String),

    /// Two stations share an external identifier
    #[error("duplicate station id: {0}")]
    DuplicateStationId(String),

    /// A station id equal to another station's name
    #[error("id {id} of station {station} is another station's name")]
    NameIdCollision { id: String, station: String },
}

fn owner_suffix(owner: &Option<String>) -> String {
    match owner {
        Some(station) => format!(" of station {station}"),
        None => String::new(),
    }
}
