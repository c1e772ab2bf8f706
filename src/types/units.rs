//! Length unit labels for catalog heights.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// LengthUnit
// =============================================================================

/// Unit of a catalog's datum and amplitudes.
///
/// Heights are never converted; the unit travels with the catalog so the
/// output series can be labelled.
///
/// # Example
///
/// ```
/// use tide_rs::types::LengthUnit;
///
/// assert_eq!(LengthUnit::Feet.abbreviation(), "ft");
/// assert_eq!(LengthUnit::default(), LengthUnit::Feet);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// International feet (harmonic constants published in feet)
    #[default]
    Feet,
    /// Meters
    Meters,
}

impl LengthUnit {
    /// Short label, e.g. `ft` or `m`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            LengthUnit::Feet => "ft",
            LengthUnit::Meters => "m",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", LengthUnit::Meters), "m");
        assert_eq!(format!("{}", LengthUnit::Feet), "ft");
    }

    #[test]
    fn test_serde_lowercase() {
        let unit: LengthUnit = serde_json::from_str("\"meters\"").unwrap();
        assert_eq!(unit, LengthUnit::Meters);
        assert_eq!(serde_json::to_string(&LengthUnit::Feet).unwrap(), "\"feet\"");
    }
}
