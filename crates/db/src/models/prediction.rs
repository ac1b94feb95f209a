//! Prediction rows. Only the Maintenance Predictor creates them, and history
//! accumulates: every run appends a row.

use pdm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::equipment::Equipment;

/// A row from the `predictions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Prediction {
    pub id: DbId,
    pub equipment_id: DbId,
    pub predicted_failure_date: Timestamp,
    pub failure_probability: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A prediction together with the equipment it belongs to, as returned by
/// the prediction history endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionWithEquipment {
    #[serde(flatten)]
    pub prediction: Prediction,
    pub equipment: Equipment,
}
