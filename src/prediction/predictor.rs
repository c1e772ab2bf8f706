//! Request-level prediction: resolve, validate, synthesize, assemble.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    HarmonicSynthesis, PredictionError, PredictionPoint, PredictionRequest, PredictionSeries,
};
use crate::catalog::{HarmonicCatalog, StationHarmonics};
use crate::resolve::resolve;
use crate::time::{TimeGrid, TimeGridIter, YearOutOfRange, check_year_span};

/// Tuning for [`Predictor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Grid length from which instants are evaluated in parallel
    /// (only with the `parallel` feature)
    pub parallel_threshold: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 10_000,
        }
    }
}

impl PredictorConfig {
    /// Set the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Never evaluate in parallel.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }
}

/// Predicts water-height series from a shared catalog.
///
/// # Example
///
/// ```ignore
/// use tide_rs::prediction::{PredictionRequest, Predictor};
///
/// let predictor = Predictor::new(&catalog);
/// let series = predictor.predict(&PredictionRequest::new("Seattle", start, end, 6))?;
/// for p in &series {
///     println!("{} {:.3}", p.time, p.height);
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Predictor<'a> {
    catalog: &'a HarmonicCatalog,
    config: PredictorConfig,
}

impl<'a> Predictor<'a> {
    /// Create a predictor with default settings.
    pub fn new(catalog: &'a HarmonicCatalog) -> Self {
        Self::with_config(catalog, PredictorConfig::default())
    }

    /// Create a predictor with explicit settings.
    pub fn with_config(catalog: &'a HarmonicCatalog, config: PredictorConfig) -> Self {
        Self { catalog, config }
    }

    /// The catalog predictions are drawn from.
    pub fn catalog(&self) -> &'a HarmonicCatalog {
        self.catalog
    }

    /// Current settings.
    pub fn config(&self) -> PredictorConfig {
        self.config
    }

    /// Find the station a request refers to.
    ///
    /// An exact name or identifier is taken as is; anything else goes through
    /// substring resolution.
    pub fn station(&self, query: &str) -> Result<&'a StationHarmonics, PredictionError> {
        if let Some(station) = self.catalog.lookup(query) {
            return Ok(station);
        }
        Ok(resolve(self.catalog, query)?)
    }

    /// Predict the series for `request`.
    ///
    /// # Errors
    ///
    /// Resolution, range/interval and year-coverage failures, all detected
    /// before any height is computed.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionSeries, PredictionError> {
        let station = self.station(&request.station)?;
        self.predict_station(station, request.start, request.end, request.interval_minutes)
    }

    /// Predict for an already resolved station.
    pub fn predict_station(
        &self,
        station: &'a StationHarmonics,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval_minutes: u32,
    ) -> Result<PredictionSeries, PredictionError> {
        let (synthesis, grid) = self.prepare(station, start, end, interval_minutes)?;

        debug!(
            station = %station.name,
            instants = grid.len(),
            interval_minutes,
            "predicting tide heights"
        );
        let points = self.evaluate(&synthesis, &grid)?;

        Ok(PredictionSeries::from_points(
            station.name.clone(),
            self.catalog.units(),
            interval_minutes,
            points,
        ))
    }

    /// Lazily predict the series for `request`.
    ///
    /// Validation happens here, so the returned stream only yields errors if
    /// the catalog changes underneath it, which it cannot.
    pub fn stream(&self, request: &PredictionRequest) -> Result<PredictionStream<'a>, PredictionError> {
        let station = self.station(&request.station)?;
        let (synthesis, grid) =
            self.prepare(station, request.start, request.end, request.interval_minutes)?;
        Ok(PredictionStream {
            synthesis,
            instants: grid.iter(),
        })
    }

    /// Evaluate every instant, in parallel for long grids.
    #[cfg(feature = "parallel")]
    fn evaluate(
        &self,
        synthesis: &HarmonicSynthesis<'a>,
        grid: &TimeGrid,
    ) -> Result<Vec<PredictionPoint>, YearOutOfRange> {
        use rayon::prelude::*;

        if grid.len() < self.config.parallel_threshold {
            return evaluate_sequential(synthesis, grid);
        }
        debug!(instants = grid.len(), "evaluating in parallel");
        let instants: Vec<DateTime<Utc>> = grid.iter().collect();
        instants
            .into_par_iter()
            .map(|time| point(synthesis, time))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate(
        &self,
        synthesis: &HarmonicSynthesis<'a>,
        grid: &TimeGrid,
    ) -> Result<Vec<PredictionPoint>, YearOutOfRange> {
        evaluate_sequential(synthesis, grid)
    }

    fn prepare(
        &self,
        station: &'a StationHarmonics,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval_minutes: u32,
    ) -> Result<(HarmonicSynthesis<'a>, TimeGrid), PredictionError> {
        let grid = TimeGrid::new(start, end, interval_minutes)?;
        let synthesis = HarmonicSynthesis::new(self.catalog, station)?;
        check_year_span(grid.start(), grid.last(), synthesis.corrections())?;
        Ok((synthesis, grid))
    }
}

/// Predict the series for `request` with default settings.
pub fn predict(
    catalog: &HarmonicCatalog,
    request: &PredictionRequest,
) -> Result<PredictionSeries, PredictionError> {
    Predictor::new(catalog).predict(request)
}

/// Lazily evaluated prediction points.
#[derive(Clone, Debug)]
pub struct PredictionStream<'a> {
    synthesis: HarmonicSynthesis<'a>,
    instants: TimeGridIter,
}

impl Iterator for PredictionStream<'_> {
    type Item = Result<PredictionPoint, YearOutOfRange>;

    fn next(&mut self) -> Option<Self::Item> {
        let time = self.instants.next()?;
        Some(point(&self.synthesis, time))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.instants.size_hint()
    }
}

impl ExactSizeIterator for PredictionStream<'_> {}

fn point(
    synthesis: &HarmonicSynthesis<'_>,
    time: DateTime<Utc>,
) -> Result<PredictionPoint, YearOutOfRange> {
    Ok(PredictionPoint {
        time,
        height: synthesis.height_at(time)?,
    })
}

fn evaluate_sequential(
    synthesis: &HarmonicSynthesis<'_>,
    grid: &TimeGrid,
) -> Result<Vec<PredictionPoint>, YearOutOfRange> {
    grid.iter().map(|time| point(synthesis, time)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        CatalogLoadError, Constituent, HarmonicConstant, NodeCorrection, YearCorrectionTable,
    };
    use crate::resolve::ResolveError;
    use crate::time::RequestError;
    use chrono::TimeZone;

    fn catalog() -> HarmonicCatalog {
        let constant = vec![HarmonicConstant::new(1.0, 0.0)];
        HarmonicCatalog::builder()
            .constituent(Constituent::standard("M2").unwrap())
            .corrections(YearCorrectionTable::new(
                2024,
                vec![
                    vec![NodeCorrection::IDENTITY],
                    vec![NodeCorrection::new(0.5, 90.0)],
                ],
            ))
            .station(StationHarmonics::new("Port Townsend", 0.0, constant.clone()).with_id("9444900"))
            .station(StationHarmonics::new("Port Angeles", 0.0, constant.clone()))
            .station(StationHarmonics::new("Port", 3.0, constant))
            .build()
            .unwrap()
    }

    fn t(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_predict_single_sample() {
        let catalog = catalog();
        let request = PredictionRequest::at("Angeles", t(2024, 1, 1, 0, 0));
        let series = predict(&catalog, &request).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.station(), "Port Angeles");
        assert!((series.points()[0].height - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_name_and_id_bypass_substring() {
        let catalog = catalog();
        let predictor = Predictor::new(&catalog);

        assert_eq!(predictor.station("Port").unwrap().name, "Port");
        assert_eq!(predictor.station("9444900").unwrap().name, "Port Townsend");
        assert!(matches!(
            predictor.station("Port "),
            Err(PredictionError::Resolve(ResolveError::AmbiguousStation { .. }))
        ));
    }

    #[test]
    fn test_validation_errors_are_eager() {
        let catalog = catalog();
        let predictor = Predictor::new(&catalog);

        let err = predictor
            .predict(&PredictionRequest::new("Angeles", t(2024, 2, 1, 0, 0), t(2024, 1, 1, 0, 0), 6))
            .unwrap_err();
        assert!(matches!(err, PredictionError::Request(RequestError::InvalidRange { .. })));

        let err = predictor
            .predict(&PredictionRequest::new("Angeles", t(2024, 1, 1, 0, 0), t(2024, 1, 2, 0, 0), 0))
            .unwrap_err();
        assert_eq!(err, PredictionError::Request(RequestError::InvalidInterval(0)));

        let err = predictor
            .predict(&PredictionRequest::new("Angeles", t(2025, 12, 31, 0, 0), t(2026, 1, 1, 0, 0), 60))
            .unwrap_err();
        assert!(matches!(err, PredictionError::YearOutOfRange(e) if e.year == 2026));

        assert!(predictor.stream(&PredictionRequest::at("Angeles", t(2023, 6, 1, 0, 0))).is_err());
    }

    #[test]
    fn test_stream_matches_predict() {
        let catalog = catalog();
        let predictor = Predictor::new(&catalog);
        let request = PredictionRequest::new("Angeles", t(2024, 12, 31, 20, 0), t(2025, 1, 1, 4, 0), 10);

        let series = predictor.predict(&request).unwrap();
        let stream = predictor.stream(&request).unwrap();
        assert_eq!(stream.len(), series.len());

        let streamed: Vec<PredictionPoint> = stream.collect::<Result<_, _>>().unwrap();
        assert_eq!(streamed.as_slice(), series.points());
    }

    #[test]
    fn test_predict_station_rejects_outside_station() {
        let catalog = catalog();
        let predictor = Predictor::new(&catalog);
        let outside = StationHarmonics::new(
            "Outside",
            0.0,
            vec![HarmonicConstant::new(1.0, 0.0), HarmonicConstant::new(1.0, 0.0)],
        );

        let err = predictor
            .predict_station(&outside, t(2024, 1, 1, 0, 0), t(2024, 1, 1, 1, 0), 60)
            .unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Catalog(CatalogLoadError::ConstituentCountMismatch {
                expected: 1,
                found: 2,
                ..
            })
        ));
    }

    // cargo test --features parallel
    #[test]
    #[cfg(feature = "parallel")]
    fn test_parallel_threshold_does_not_change_result() {
        let catalog = catalog();
        let request = PredictionRequest::new("Angeles", t(2024, 12, 30, 0, 0), t(2025, 1, 2, 0, 0), 1);

        let sequential = Predictor::with_config(&catalog, PredictorConfig::sequential())
            .predict(&request)
            .unwrap();
        let eager = Predictor::with_config(&catalog, PredictorConfig::default().with_parallel_threshold(1))
            .predict(&request)
            .unwrap();
        assert_eq!(sequential, eager);
    }
}
