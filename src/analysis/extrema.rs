//! High and low water in a predicted series.
//!
//! Extrema are taken at sample resolution: a point is a high (low) water if
//! it rises above (falls below) its predecessor and is not exceeded by its
//! successor. The first and last samples are never reported, and a flat run
//! yields its first sample.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::prediction::PredictionSeries;

/// Whether an extremum is a high or low water.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    High,
    Low,
}

impl std::fmt::Display for ExtremumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A local maximum or minimum of the predicted height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideExtremum {
    pub time: DateTime<Utc>,
    pub height: f64,
    pub kind: ExtremumKind,
}

/// All high and low waters in `series`, in time order.
pub fn find_extrema(series: &PredictionSeries) -> Vec<TideExtremum> {
    let points = series.points();
    let mut extrema = Vec::new();
    if points.len() < 3 {
        return extrema;
    }

    let mut k = 1;
    while k + 1 < points.len() {
        let prev = points[k - 1].height;
        let here = points[k].height;

        // skip across a plateau to the first differing sample
        let mut next = k + 1;
        while next < points.len() && points[next].height == here {
            next += 1;
        }
        let Some(after) = points.get(next).map(|p| p.height) else {
            break;
        };

        let kind = if here > prev && here > after {
            Some(ExtremumKind::High)
        } else if here < prev && here < after {
            Some(ExtremumKind::Low)
        } else {
            None
        };
        if let Some(kind) = kind {
            extrema.push(TideExtremum {
                time: points[k].time,
                height: here,
                kind,
            });
        }
        k = next;
    }
    extrema
}

/// The first high and the first low water strictly after `after`.
pub fn next_high_low(
    extrema: &[TideExtremum],
    after: DateTime<Utc>,
) -> (Option<TideExtremum>, Option<TideExtremum>) {
    let mut high = None;
    let mut low = None;
    for e in extrema.iter().filter(|e| e.time > after) {
        match e.kind {
            ExtremumKind::High if high.is_none() => high = Some(*e),
            ExtremumKind::Low if low.is_none() => low = Some(*e),
            _ => {}
        }
        if high.is_some() && low.is_some() {
            break;
        }
    }
    (high, low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LengthUnit;
    use chrono::{TimeDelta, TimeZone};

    fn series(heights: &[f64]) -> PredictionSeries {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let times: Vec<_> = (0..heights.len() as i64)
            .map(|k| t0 + TimeDelta::hours(k))
            .collect();
        PredictionSeries::from_parts("Test", LengthUnit::Feet, 60, &times, heights)
    }

    #[test]
    fn test_alternating_extrema() {
        let s = series(&[0.0, 2.0, 1.0, -1.0, 0.5, 3.0, 2.0]);
        let extrema = find_extrema(&s);

        let kinds: Vec<_> = extrema.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ExtremumKind::High, ExtremumKind::Low, ExtremumKind::High]
        );
        assert_eq!(extrema[1].height, -1.0);
        assert_eq!(extrema[2].time, s.points()[5].time);
    }

    #[test]
    fn test_plateau_reports_first_sample() {
        let s = series(&[0.0, 1.0, 1.0, 1.0, 0.0]);
        let extrema = find_extrema(&s);

        assert_eq!(extrema.len(), 1);
        assert_eq!(extrema[0].time, s.points()[1].time);
        assert_eq!(extrema[0].kind, ExtremumKind::High);
    }

    #[test]
    fn test_monotone_has_no_extrema() {
        assert!(find_extrema(&series(&[0.0, 1.0, 2.0, 3.0])).is_empty());
        assert!(find_extrema(&series(&[1.0, 0.0])).is_empty());
        assert!(find_extrema(&series(&[1.0, 1.0, 1.0])).is_empty());
    }

    #[test]
    fn test_next_high_low() {
        let s = series(&[0.0, 2.0, 1.0, -1.0, 0.5, 3.0, 2.0]);
        let extrema = find_extrema(&s);

        let (high, low) = next_high_low(&extrema, s.points()[2].time);
        assert_eq!(high.unwrap().height, 3.0);
        assert_eq!(low.unwrap().height, -1.0);

        let (high, low) = next_high_low(&extrema, s.points()[5].time);
        assert!(high.is_none() && low.is_none());
    }
}
