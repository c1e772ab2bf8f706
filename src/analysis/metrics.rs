//! Comparison of predicted heights against observations.
//!
//! Observations are matched to a [`PredictionSeries`] by exact instant;
//! observations that fall between samples are ignored.

use chrono::{DateTime, Utc};

use crate::prediction::PredictionSeries;

/// Statistics comparing predicted and observed heights.
///
/// Differences are taken as predicted minus observed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonMetrics {
    /// Root mean square error: sqrt(mean((pred - obs)²))
    pub rmse: f64,
    /// Mean absolute error: mean(|pred - obs|)
    pub mae: f64,
    /// Mean error: mean(pred - obs)
    pub bias: f64,
    /// Pearson correlation coefficient [-1, 1]
    pub correlation: f64,
    /// Murphy skill score: 1 - MSE / Var(obs)
    pub skill_score: f64,
    /// Maximum absolute error
    pub max_error: f64,
    /// Number of compared pairs
    pub n_points: usize,
}

impl ComparisonMetrics {
    /// Compute metrics over paired samples.
    ///
    /// Returns `None` for empty input.
    ///
    /// # Panics
    ///
    /// Panics if the slices have different lengths.
    pub fn compute(predicted: &[f64], observed: &[f64]) -> Option<Self> {
        assert_eq!(
            predicted.len(),
            observed.len(),
            "predicted and observed must have same length"
        );
        if predicted.is_empty() {
            return None;
        }

        let n = predicted.len() as f64;
        let pred_mean = predicted.iter().sum::<f64>() / n;
        let obs_mean = observed.iter().sum::<f64>() / n;

        let mut sum_err = 0.0;
        let mut sum_abs = 0.0;
        let mut sum_sq = 0.0;
        let mut max_error: f64 = 0.0;
        let mut pred_var = 0.0;
        let mut obs_var = 0.0;
        let mut covariance = 0.0;

        for (&p, &o) in predicted.iter().zip(observed) {
            let err = p - o;
            sum_err += err;
            sum_abs += err.abs();
            sum_sq += err * err;
            max_error = max_error.max(err.abs());

            let dp = p - pred_mean;
            let d_o = o - obs_mean;
            pred_var += dp * dp;
            obs_var += d_o * d_o;
            covariance += dp * d_o;
        }

        let mse = sum_sq / n;
        let pred_var = pred_var / n;
        let obs_var = obs_var / n;
        let covariance = covariance / n;

        let skill_score = if obs_var > 1e-10 {
            1.0 - mse / obs_var
        } else if mse < 1e-10 {
            1.0
        } else {
            f64::NEG_INFINITY
        };

        let correlation = match (pred_var > 1e-10, obs_var > 1e-10) {
            (true, true) => covariance / (pred_var.sqrt() * obs_var.sqrt()),
            // both flat
            (false, false) => 1.0,
            _ => 0.0,
        };

        Some(Self {
            rmse: mse.sqrt(),
            mae: sum_abs / n,
            bias: sum_err / n,
            correlation,
            skill_score,
            max_error,
            n_points: predicted.len(),
        })
    }

    /// Correlation above 0.95.
    pub fn is_highly_correlated(&self) -> bool {
        self.correlation > 0.95
    }

    /// Skill score above 0.9.
    pub fn is_skillful(&self) -> bool {
        self.skill_score > 0.9
    }
}

/// Compare a prediction with observations taken at the series' instants.
///
/// Returns `None` if no observation coincides with a predicted instant.
pub fn compare_with_observations(
    series: &PredictionSeries,
    observations: &[(DateTime<Utc>, f64)],
) -> Option<ComparisonMetrics> {
    let (predicted, observed): (Vec<f64>, Vec<f64>) = observations
        .iter()
        .filter_map(|&(time, obs)| series.height_at(time).map(|pred| (pred, obs)))
        .unzip();

    tracing::debug!(
        station = series.station(),
        matched = predicted.len(),
        offered = observations.len(),
        "comparing with observations"
    );
    ComparisonMetrics::compute(&predicted, &observed)
}
