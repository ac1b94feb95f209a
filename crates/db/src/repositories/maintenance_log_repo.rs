//! Repository for the `maintenance_logs` table.

use pdm_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::maintenance_log::{CreateMaintenanceLog, MaintenanceLog};

/// Column list for `maintenance_logs` queries.
const COLUMNS: &str = "id, equipment_id, log_date, description";

/// Provides data access for maintenance logs.
pub struct MaintenanceLogRepo;

impl MaintenanceLogRepo {
    /// Insert a maintenance log. A missing `log_date` falls back to `NOW()`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMaintenanceLog,
    ) -> Result<MaintenanceLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_logs (id, equipment_id, description, log_date) \
             VALUES ($1, $2, $3, COALESCE($4, NOW())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceLog>(&query)
            .bind(new_id())
            .bind(input.equipment_id)
            .bind(&input.description)
            .bind(input.log_date)
            .fetch_one(pool)
            .await
    }

    /// List maintenance logs for an equipment, most recent log date first.
    pub async fn list_for_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Vec<MaintenanceLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_logs \
             WHERE equipment_id = $1 \
             ORDER BY log_date DESC, id DESC"
        );
        sqlx::query_as::<_, MaintenanceLog>(&query)
            .bind(equipment_id)
            .fetch_all(pool)
            .await
    }
}
