//! Repository for the `predictions` table. Append-only: there is no update
//! or upsert.

use pdm_core::predictor::PredictionDraft;
use pdm_core::types::DbId;
use sqlx::PgPool;

use crate::models::prediction::Prediction;

/// Column list for `predictions` queries.
const COLUMNS: &str = "\
    id, equipment_id, predicted_failure_date, failure_probability, \
    created_at, updated_at";

/// Provides data access for predictions.
pub struct PredictionRepo;

impl PredictionRepo {
    /// Insert a prediction produced by the Maintenance Predictor.
    pub async fn create(pool: &PgPool, draft: &PredictionDraft) -> Result<Prediction, sqlx::Error> {
        let query = format!(
            "INSERT INTO predictions \
                 (id, equipment_id, predicted_failure_date, failure_probability) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prediction>(&query)
            .bind(draft.id)
            .bind(draft.equipment_id)
            .bind(draft.predicted_failure_date)
            .bind(draft.failure_probability)
            .fetch_one(pool)
            .await
    }

    /// Prediction history for an equipment, most recent first.
    pub async fn list_for_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Vec<Prediction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM predictions \
             WHERE equipment_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Prediction>(&query)
            .bind(equipment_id)
            .fetch_all(pool)
            .await
    }
}
