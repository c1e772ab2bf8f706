//! Predicted water-height series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::LengthUnit;

/// A single predicted height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// Instant (UTC)
    pub time: DateTime<Utc>,
    /// Height in the catalog length unit
    pub height: f64,
}

/// Predicted heights at evenly spaced, strictly increasing UTC instants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionSeries {
    station: String,
    units: LengthUnit,
    interval_minutes: u32,
    points: Vec<PredictionPoint>,
}

impl PredictionSeries {
    /// Assemble a series from instants and heights.
    ///
    /// # Panics
    ///
    /// Panics if `times` and `heights` have different lengths.
    pub fn from_parts(
        station: impl Into<String>,
        units: LengthUnit,
        interval_minutes: u32,
        times: &[DateTime<Utc>],
        heights: &[f64],
    ) -> Self {
        assert_eq!(
            times.len(),
            heights.len(),
            "times and heights must have same length"
        );

        let points = times
            .iter()
            .zip(heights.iter())
            .map(|(&time, &height)| PredictionPoint { time, height })
            .collect();

        Self {
            station: station.into(),
            units,
            interval_minutes,
            points,
        }
    }

    pub(crate) fn from_points(
        station: impl Into<String>,
        units: LengthUnit,
        interval_minutes: u32,
        points: Vec<PredictionPoint>,
    ) -> Self {
        Self {
            station: station.into(),
            units,
            interval_minutes,
            points,
        }
    }

    /// Name of the station the series was predicted for.
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Unit of the heights.
    pub fn units(&self) -> LengthUnit {
        self.units
    }

    /// Sampling interval in minutes.
    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    /// The predicted points.
    pub fn points(&self) -> &[PredictionPoint] {
        &self.points
    }

    /// Iterate over the predicted points.
    pub fn iter(&self) -> std::slice::Iter<'_, PredictionPoint> {
        self.points.iter()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get instants as a vector.
    pub fn times(&self) -> Vec<DateTime<Utc>> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// Get heights as a vector.
    pub fn heights(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.height).collect()
    }

    /// Point with the greatest height.
    pub fn highest(&self) -> Option<&PredictionPoint> {
        self.points.iter().max_by(|a, b| a.height.total_cmp(&b.height))
    }

    /// Point with the smallest height.
    pub fn lowest(&self) -> Option<&PredictionPoint> {
        self.points.iter().min_by(|a, b| a.height.total_cmp(&b.height))
    }

    /// Height at an exact instant of the series.
    pub fn height_at(&self, time: DateTime<Utc>) -> Option<f64> {
        self.points
            .binary_search_by(|p| p.time.cmp(&time))
            .ok()
            .map(|i| self.points[i].height)
    }
}

impl<'a> IntoIterator for &'a PredictionSeries {
    type Item = &'a PredictionPoint;
    type IntoIter = std::slice::Iter<'a, PredictionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn series() -> PredictionSeries {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let times: Vec<_> = (0..4).map(|k| t0 + TimeDelta::minutes(30 * k)).collect();
        PredictionSeries::from_parts("Test", LengthUnit::Meters, 30, &times, &[0.5, 1.5, -0.25, 1.0])
    }

    #[test]
    fn test_accessors() {
        let s = series();
        assert_eq!(s.len(), 4);
        assert_eq!(s.station(), "Test");
        assert_eq!(s.units(), LengthUnit::Meters);
        assert_eq!(s.heights(), vec![0.5, 1.5, -0.25, 1.0]);
        assert_eq!((&s).into_iter().count(), 4);
    }

    #[test]
    fn test_extremes() {
        let s = series();
        assert_eq!(s.highest().unwrap().height, 1.5);
        assert_eq!(s.lowest().unwrap().height, -0.25);
    }

    #[test]
    fn test_height_at() {
        let s = series();
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
        assert_eq!(s.height_at(t), Some(-0.25));
        assert_eq!(s.height_at(t + TimeDelta::minutes(1)), None);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_mismatched_parts() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        PredictionSeries::from_parts("Test", LengthUnit::Feet, 1, &[t0], &[1.0, 2.0]);
    }

    #[test]
    fn test_serialize_points() {
        let s = series();
        let json = serde_json::to_string(&s.points()[0]).unwrap();
        assert_eq!(json, r#"{"time":"2024-01-01T00:00:00Z","height":0.5}"#);
    }
}
