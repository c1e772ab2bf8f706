//! Harmonic synthesis of water height.
//!
//! # Mathematical Background
//!
//! The predicted height at an instant is
//! ```text
//! h(t) = Z₀ + Σᵢ fᵢ(y) Hᵢ cos(σᵢ t_y + uᵢ(y) − κᵢ)
//! ```
//!
//! Where:
//! - Z₀ is the station datum
//! - Hᵢ, κᵢ are the station amplitude and phase lag (degrees)
//! - σᵢ is the constituent speed (degrees/hour)
//! - t_y is hours since 00:00 UTC on January 1 of the instant's year y
//! - fᵢ(y), uᵢ(y) are the node factor and equilibrium argument (degrees) of year y
//!
//! The argument is formed in degrees, reduced to [0, 360), and converted to
//! radians only for the cosine. Corrections are looked up by the instant's own
//! year with no interpolation, so heights may jump at a year rollover.

use chrono::{DateTime, Utc};

use crate::catalog::{
    CatalogLoadError, Constituent, HarmonicCatalog, HarmonicConstant, NodeCorrection,
    StationHarmonics, YearCorrectionTable,
};
use crate::time::{YearOutOfRange, YearPosition};

/// Contribution of one constituent at `hours` since the start of the year.
///
/// `f · H · cos(σ·t + u − κ)`, with the phase reduced modulo 360° before the
/// conversion to radians.
#[inline]
pub fn constituent_height(
    constituent: &Constituent,
    constant: &HarmonicConstant,
    correction: &NodeCorrection,
    hours: f64,
) -> f64 {
    let phase_deg =
        constituent.speed * hours + correction.equilibrium_argument - constant.kappa;
    correction.node_factor * constant.amplitude * phase_deg.rem_euclid(360.0).to_radians().cos()
}

/// Height evaluator for one station.
///
/// Borrows the catalog; cheap to create and safe to share between threads.
#[derive(Clone, Copy, Debug)]
pub struct HarmonicSynthesis<'a> {
    constituents: &'a [Constituent],
    station: &'a StationHarmonics,
    corrections: &'a YearCorrectionTable,
}

impl<'a> HarmonicSynthesis<'a> {
    /// Create an evaluator for `station` using the catalog's constituents
    /// and the station's applicable correction table.
    ///
    /// # Errors
    ///
    /// [`CatalogLoadError`] if `station` does not line up with the catalog's
    /// constituents (see [`HarmonicCatalog::check_station`]).
    pub fn new(
        catalog: &'a HarmonicCatalog,
        station: &'a StationHarmonics,
    ) -> Result<Self, CatalogLoadError> {
        catalog.check_station(station)?;
        Ok(Self {
            constituents: catalog.constituents(),
            station,
            corrections: catalog.corrections_for(station),
        })
    }

    /// The station being evaluated.
    pub fn station(&self) -> &'a StationHarmonics {
        self.station
    }

    /// The correction table in use.
    pub fn corrections(&self) -> &'a YearCorrectionTable {
        self.corrections
    }

    /// Height at `instant`.
    ///
    /// # Errors
    ///
    /// [`YearOutOfRange`] if the instant's year is not tabulated.
    pub fn height_at(&self, instant: DateTime<Utc>) -> Result<f64, YearOutOfRange> {
        let position = YearPosition::locate(instant, self.corrections)?;
        Ok(self.height_at_position(&position))
    }

    /// Height at an already located position.
    ///
    /// Constituents are summed in catalog order, so the result is
    /// reproducible bit for bit.
    pub fn height_at_position(&self, position: &YearPosition) -> f64 {
        let row = self.corrections.row(position.row);
        let mut height = self.station.datum;
        for ((constituent, constant), correction) in self
            .constituents
            .iter()
            .zip(&self.station.constants)
            .zip(row)
        {
            height += constituent_height(
                constituent,
                constant,
                correction,
                position.hours_since_year_start,
            );
        }
        height
    }

    /// Per-constituent contributions at `instant`, in catalog order.
    ///
    /// The datum is not included.
    pub fn contributions_at(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<Vec<(&'a str, f64)>, YearOutOfRange> {
        let position = YearPosition::locate(instant, self.corrections)?;
        let row = self.corrections.row(position.row);
        Ok(self
            .constituents
            .iter()
            .zip(&self.station.constants)
            .zip(row)
            .map(|((constituent, constant), correction)| {
                (
                    constituent.name.as_str(),
                    constituent_height(
                        constituent,
                        constant,
                        correction,
                        position.hours_since_year_start,
                    ),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TOL: f64 = 1e-10;
    const M2_SPEED: f64 = 28.9841042;

    fn single_m2_catalog(datum: f64, kappa: f64, correction: NodeCorrection) -> HarmonicCatalog {
        HarmonicCatalog::builder()
            .constituent(Constituent::new("M2", M2_SPEED))
            .corrections(YearCorrectionTable::new(2024, vec![vec![correction]]))
            .station(StationHarmonics::new(
                "Test",
                datum,
                vec![HarmonicConstant::new(1.0, kappa)],
            ))
            .build()
            .unwrap()
    }

    fn jan1(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_constituent_height_at_zero_phase() {
        let c = Constituent::new("M2", M2_SPEED);
        let h = constituent_height(
            &c,
            &HarmonicConstant::new(2.0, 0.0),
            &NodeCorrection::new(0.5, 0.0),
            0.0,
        );
        assert!((h - 1.0).abs() < TOL);
    }

    #[test]
    fn test_negative_phase_wraps_into_range() {
        let c = Constituent::new("M2", M2_SPEED);
        let h = constituent_height(
            &c,
            &HarmonicConstant::new(1.0, 350.0),
            &NodeCorrection::IDENTITY,
            0.0,
        );
        assert_eq!(h.to_bits(), 10.0_f64.to_radians().cos().to_bits());
    }

    #[test]
    fn test_year_start_gives_full_amplitude() {
        let catalog = single_m2_catalog(0.0, 0.0, NodeCorrection::IDENTITY);
        let synth = HarmonicSynthesis::new(&catalog, &catalog.stations()[0]).unwrap();

        assert!((synth.height_at(jan1(0)).unwrap() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_one_hour_after_year_start() {
        let catalog = single_m2_catalog(0.0, 0.0, NodeCorrection::IDENTITY);
        let synth = HarmonicSynthesis::new(&catalog, &catalog.stations()[0]).unwrap();

        let expected = M2_SPEED.to_radians().cos();
        let h = synth.height_at(jan1(1)).unwrap();
        assert!((h - expected).abs() < TOL, "expected {expected}, got {h}");
        assert!((h - 0.87475).abs() < 1e-4);
    }

    #[test]
    fn test_datum_offset() {
        let catalog = single_m2_catalog(5.5, 0.0, NodeCorrection::IDENTITY);
        let synth = HarmonicSynthesis::new(&catalog, &catalog.stations()[0]).unwrap();

        assert!((synth.height_at(jan1(0)).unwrap() - 6.5).abs() < TOL);
    }

    #[test]
    fn test_kappa_and_equilibrium_argument_cancel() {
        // u − κ = 0 leaves the phase at σt
        let catalog = single_m2_catalog(0.0, 75.0, NodeCorrection::new(1.0, 75.0));
        let synth = HarmonicSynthesis::new(&catalog, &catalog.stations()[0]).unwrap();

        assert!((synth.height_at(jan1(0)).unwrap() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_kappa_lags_phase() {
        // κ = 90° at t = 0 gives cos(-90°) = 0
        let catalog = single_m2_catalog(0.0, 90.0, NodeCorrection::IDENTITY);
        let synth = HarmonicSynthesis::new(&catalog, &catalog.stations()[0]).unwrap();

        assert!(synth.height_at(jan1(0)).unwrap().abs() < TOL);
    }

    #[test]
    fn test_node_factor_scales() {
        let catalog = single_m2_catalog(0.0, 0.0, NodeCorrection::new(1.1, 0.0));
        let synth = HarmonicSynthesis::new(&catalog, &catalog.stations()[0]).unwrap();

        assert!((synth.height_at(jan1(0)).unwrap() - 1.1).abs() < TOL);
    }

    #[test]
    fn test_out_of_range_year() {
        let catalog = single_m2_catalog(0.0, 0.0, NodeCorrection::IDENTITY);
        let synth = HarmonicSynthesis::new(&catalog, &catalog.stations()[0]).unwrap();

        let t = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(synth.height_at(t).unwrap_err().year, 2025);
    }

    #[test]
    fn test_contributions_sum_to_height() {
        let catalog = HarmonicCatalog::builder()
            .constituents(["M2", "S2", "K1"].map(|n| Constituent::standard(n).unwrap()))
            .corrections(YearCorrectionTable::new(
                2024,
                vec![vec![
                    NodeCorrection::new(0.98, 12.0),
                    NodeCorrection::new(1.0, 0.0),
                    NodeCorrection::new(1.05, 300.0),
                ]],
            ))
            .station(StationHarmonics::new(
                "Mixed",
                2.0,
                vec![
                    HarmonicConstant::new(1.2, 100.0),
                    HarmonicConstant::new(0.3, 130.0),
                    HarmonicConstant::new(0.7, 250.0),
                ],
            ))
            .build()
            .unwrap();
        let synth = HarmonicSynthesis::new(&catalog, &catalog.stations()[0]).unwrap();

        let t = Utc.with_ymd_and_hms(2024, 7, 4, 13, 37, 0).unwrap();
        let parts = synth.contributions_at(t).unwrap();
        let names: Vec<&str> = parts.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["M2", "S2", "K1"]);

        let total: f64 = 2.0 + parts.iter().map(|(_, h)| h).sum::<f64>();
        assert!((synth.height_at(t).unwrap() - total).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_station_with_missing_constants() {
        let catalog = HarmonicCatalog::builder()
            .constituents([Constituent::new("A", 30.0), Constituent::new("B", 15.0)])
            .corrections(YearCorrectionTable::identity(2024, 1, 2))
            .build()
            .unwrap();
        let outside = StationHarmonics::new("Outside", 0.0, vec![HarmonicConstant::new(1.0, 0.0)]);

        assert_eq!(
            HarmonicSynthesis::new(&catalog, &outside).unwrap_err(),
            CatalogLoadError::ConstituentCountMismatch {
                station: "Outside".into(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_rejects_station_with_narrow_table() {
        let catalog = HarmonicCatalog::builder()
            .constituents([Constituent::new("A", 30.0), Constituent::new("B", 15.0)])
            .corrections(YearCorrectionTable::identity(2024, 1, 2))
            .build()
            .unwrap();
        let outside = StationHarmonics::new(
            "Outside",
            0.0,
            vec![HarmonicConstant::new(1.0, 0.0), HarmonicConstant::new(1.0, 0.0)],
        )
        .with_corrections(YearCorrectionTable::identity(2024, 1, 1));

        assert!(matches!(
            HarmonicSynthesis::new(&catalog, &outside),
            Err(CatalogLoadError::CorrectionColumnMismatch { expected: 2, found: 1, .. })
        ));
    }
}
