use pdm_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sensor_readings` table. Immutable once written.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SensorReading {
    pub id: DbId,
    pub equipment_id: DbId,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub value: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for ingesting a single reading.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSensorReading {
    pub equipment_id: DbId,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub value: f64,
}
