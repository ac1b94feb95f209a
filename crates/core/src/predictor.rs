//! Maintenance Predictor: runs the risk computation against an equipment's
//! stored history and appends the result as a new prediction record.
//!
//! The storage side is expressed as two capabilities, [`SensorHistory`] and
//! [`PredictionSink`], so the orchestration can be driven by the PostgreSQL
//! adapter in `pdm-db` or by in-memory fakes in tests.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::prediction::{compute_failure_risk, MedianThreshold, RiskAssessment, RiskError, RiskStrategy};
use crate::types::{new_id, DbId, Timestamp};

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Read access to the sensor history of an equipment.
pub trait SensorHistory: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All reading values recorded for `equipment_id`, in any order.
    ///
    /// An equipment without readings yields an empty vector, not an error.
    fn reading_values(
        &self,
        equipment_id: DbId,
    ) -> impl Future<Output = Result<Vec<f64>, Self::Error>> + Send;
}

/// Write access for new prediction records.
pub trait PredictionSink: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;
    /// What the store hands back after a successful insert.
    type Record: Send;

    /// Persist `draft` as a new row. Never overwrites an existing prediction.
    fn create_prediction(
        &self,
        draft: &PredictionDraft,
    ) -> impl Future<Output = Result<Self::Record, Self::Error>> + Send;
}

// ---------------------------------------------------------------------------
// Records and errors
// ---------------------------------------------------------------------------

/// A prediction ready to be inserted. The identity is assigned here, at
/// construction, not by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionDraft {
    pub id: DbId,
    pub equipment_id: DbId,
    pub predicted_failure_date: Timestamp,
    pub failure_probability: f64,
}

impl PredictionDraft {
    pub fn new(equipment_id: DbId, assessment: &RiskAssessment) -> Self {
        Self {
            id: new_id(),
            equipment_id,
            predicted_failure_date: assessment.predicted_failure_date,
            failure_probability: assessment.failure_probability,
        }
    }
}

/// Failure of [`MaintenancePredictor::predict_and_persist`].
///
/// `E` is the store's error type. It is carried unchanged; nothing here
/// retries.
#[derive(Debug, thiserror::Error)]
pub enum PredictError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error("store error: {0}")]
    Store(#[source] E),
}

impl<E: std::error::Error + 'static> PredictError<E> {
    /// `true` when the equipment simply had no readings.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::Risk(RiskError::NoData(_)))
    }
}

// ---------------------------------------------------------------------------
// Predictor
// ---------------------------------------------------------------------------

/// Stateless orchestrator around a [`RiskStrategy`].
///
/// Cheap to clone. Concurrent calls for the same equipment are not serialized;
/// each reads its own snapshot and appends its own row.
#[derive(Clone)]
pub struct MaintenancePredictor {
    strategy: Arc<dyn RiskStrategy>,
}

impl MaintenancePredictor {
    pub fn new(strategy: Arc<dyn RiskStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &dyn RiskStrategy {
        self.strategy.as_ref()
    }

    /// Pure computation over already-loaded values.
    pub fn assess(&self, values: &[f64], now: Timestamp) -> Result<RiskAssessment, RiskError> {
        compute_failure_risk(values, self.strategy.as_ref(), now)
    }

    /// Load the history for `equipment_id`, compute the risk and persist one
    /// new prediction.
    ///
    /// Nothing is written when the history is empty or the computation fails.
    /// The read and the write are separate operations; no transaction spans
    /// them.
    pub async fn predict_and_persist<R, W>(
        &self,
        history: &R,
        sink: &W,
        equipment_id: DbId,
    ) -> Result<W::Record, PredictError<R::Error>>
    where
        R: SensorHistory,
        W: PredictionSink<Error = R::Error>,
    {
        let values = history
            .reading_values(equipment_id)
            .await
            .map_err(PredictError::Store)?;

        let assessment = self.assess(&values, Utc::now())?;

        tracing::debug!(
            %equipment_id,
            strategy = self.strategy.name(),
            median = assessment.summary.median,
            sample_count = assessment.summary.sample_count,
            "Computed sensor median",
        );

        let draft = PredictionDraft::new(equipment_id, &assessment);
        let record = sink
            .create_prediction(&draft)
            .await
            .map_err(PredictError::Store)?;

        tracing::info!(
            %equipment_id,
            prediction_id = %draft.id,
            failure_probability = draft.failure_probability,
            predicted_failure_date = %draft.predicted_failure_date,
            "Prediction recorded",
        );

        Ok(record)
    }
}

impl Default for MaintenancePredictor {
    fn default() -> Self {
        Self::new(Arc::new(MedianThreshold::default()))
    }
}

impl std::fmt::Debug for MaintenancePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaintenancePredictor")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
