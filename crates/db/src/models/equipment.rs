//! Equipment: the root entity every other record belongs to.

use pdm_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `equipment` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating new equipment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEquipment {
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
}

/// Row counts removed by a cascading equipment delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletedDependents {
    pub predictions: u64,
    pub sensor_readings: u64,
    pub maintenance_logs: u64,
}
