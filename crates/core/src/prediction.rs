//! Failure-risk estimation from accumulated sensor readings.
//!
//! Pure logic, no database access. The whole reading history is reduced to a
//! [`SensorSummary`] (median + sample count), a [`RiskStrategy`] maps the
//! summary to a failure probability, and the forecast date is always
//! [`FORECAST_HORIZON_HOURS`] after the invocation instant.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Median above which [`MedianThreshold`] reports high risk (strictly greater).
pub const DEFAULT_RISK_THRESHOLD: f64 = 70.0;
/// Probability reported by [`MedianThreshold`] above the threshold.
pub const DEFAULT_HIGH_RISK_PROBABILITY: f64 = 0.8;
/// Probability reported at or below the threshold.
pub const NO_RISK_PROBABILITY: f64 = 0.0;
/// Distance of the forecast date from the moment of computation.
pub const FORECAST_HORIZON_HOURS: i64 = 30;

/// The fixed forecast horizon as a `chrono` duration.
pub fn forecast_horizon() -> chrono::Duration {
    chrono::Duration::hours(FORECAST_HORIZON_HOURS)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The reading sequence was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no sensor data available")]
pub struct NoDataError;

/// Reasons a risk estimate cannot be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RiskError {
    #[error(transparent)]
    NoData(#[from] NoDataError),

    #[error("sensor reading at position {index} is not finite: {value}")]
    NonFiniteReading { index: usize, value: f64 },

    #[error("strategy {strategy} produced probability {probability} outside [0, 1]")]
    ProbabilityOutOfRange {
        strategy: &'static str,
        probability: f64,
    },
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Median of `values`, independent of input order.
///
/// Sorts a copy ascending; odd counts take the middle element, even counts
/// the mean of the two central elements. The mean halves each element first
/// so finite inputs never overflow to infinity.
pub fn median(values: &[f64]) -> Result<f64, NoDataError> {
    if values.is_empty() {
        return Err(NoDataError);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 0 {
        Ok(sorted[mid - 1] / 2.0 + sorted[mid] / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Statistics a [`RiskStrategy`] receives in place of the raw history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorSummary {
    pub median: f64,
    pub sample_count: usize,
}

impl SensorSummary {
    /// Summarize a reading history. Every value must be finite.
    pub fn from_values(values: &[f64]) -> Result<Self, RiskError> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(RiskError::NonFiniteReading { index, value });
        }
        Ok(Self {
            median: median(values)?,
            sample_count: values.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Maps summary statistics to a failure probability in `[0, 1]`.
///
/// Implementations must be deterministic: the same summary always yields the
/// same probability.
pub trait RiskStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Estimate the failure probability for `summary`.
    fn estimate(&self, summary: &SensorSummary) -> f64;
}

/// Binary classifier: high risk iff the median strictly exceeds `threshold`.
///
/// There is no interpolation; the output is either
/// `high_risk_probability` or [`NO_RISK_PROBABILITY`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedianThreshold {
    pub threshold: f64,
    pub high_risk_probability: f64,
}

impl MedianThreshold {
    pub fn new(threshold: f64, high_risk_probability: f64) -> Self {
        Self {
            threshold,
            high_risk_probability,
        }
    }
}

impl Default for MedianThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_THRESHOLD, DEFAULT_HIGH_RISK_PROBABILITY)
    }
}

impl RiskStrategy for MedianThreshold {
    fn name(&self) -> &'static str {
        "median_threshold"
    }

    fn estimate(&self, summary: &SensorSummary) -> f64 {
        if summary.median > self.threshold {
            self.high_risk_probability
        } else {
            NO_RISK_PROBABILITY
        }
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Outcome of a single risk computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub summary: SensorSummary,
    pub failure_probability: f64,
    pub predicted_failure_date: Timestamp,
}

/// Compute the failure risk for a reading history as of `now`.
///
/// Readings are unordered. The forecast date is `now + 30h` regardless of the
/// probability.
pub fn compute_failure_risk<S>(
    values: &[f64],
    strategy: &S,
    now: Timestamp,
) -> Result<RiskAssessment, RiskError>
where
    S: RiskStrategy + ?Sized,
{
    let summary = SensorSummary::from_values(values)?;
    let failure_probability = strategy.estimate(&summary);

    if !(0.0..=1.0).contains(&failure_probability) {
        return Err(RiskError::ProbabilityOutOfRange {
            strategy: strategy.name(),
            probability: failure_probability,
        });
    }

    Ok(RiskAssessment {
        summary,
        failure_probability,
        predicted_failure_date: now + forecast_horizon(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
