use pdm_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `maintenance_logs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct MaintenanceLog {
    pub id: DbId,
    pub equipment_id: DbId,
    pub log_date: Timestamp,
    pub description: String,
}

/// DTO for recording maintenance work. `log_date` defaults to now.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaintenanceLog {
    pub equipment_id: DbId,
    pub description: String,
    pub log_date: Option<Timestamp>,
}
