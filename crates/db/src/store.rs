//! PostgreSQL implementation of the Maintenance Predictor's read and write
//! capabilities.

use pdm_core::predictor::{PredictionDraft, PredictionSink, SensorHistory};
use pdm_core::types::DbId;

use crate::models::prediction::Prediction;
use crate::repositories::{PredictionRepo, SensorReadingRepo};
use crate::DbPool;

/// Adapter handing the predictor a pool-backed sensor history and
/// prediction sink.
#[derive(Debug, Clone)]
pub struct PgMaintenanceStore {
    pool: DbPool,
}

impl PgMaintenanceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl SensorHistory for PgMaintenanceStore {
    type Error = sqlx::Error;

    async fn reading_values(&self, equipment_id: DbId) -> Result<Vec<f64>, sqlx::Error> {
        SensorReadingRepo::values_for_equipment(&self.pool, equipment_id).await
    }
}

impl PredictionSink for PgMaintenanceStore {
    type Error = sqlx::Error;
    type Record = Prediction;

    async fn create_prediction(&self, draft: &PredictionDraft) -> Result<Prediction, sqlx::Error> {
        PredictionRepo::create(&self.pool, draft).await
    }
}
