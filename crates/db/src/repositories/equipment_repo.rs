//! Repository for the `equipment` table.

use pdm_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::equipment::{CreateEquipment, DeletedDependents, Equipment};

/// Column list for `equipment` queries.
const COLUMNS: &str = "id, name, equipment_type, created_at, updated_at";

/// Provides data access for equipment.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Insert new equipment. The id is allocated here, before the insert.
    pub async fn create(pool: &PgPool, input: &CreateEquipment) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (id, name, equipment_type) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(new_id())
            .bind(&input.name)
            .bind(&input.equipment_type)
            .fetch_one(pool)
            .await
    }

    /// List all equipment, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Equipment>(&query).fetch_all(pool).await
    }

    /// Find equipment by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE id = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete equipment and everything it owns.
    ///
    /// Predictions, sensor readings and maintenance logs go first, then the
    /// equipment row, all inside one transaction. Any failure rolls the whole
    /// delete back. Returns `None` if the equipment does not exist.
    pub async fn delete_cascade(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DeletedDependents>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked = sqlx::query_scalar::<_, DbId>("SELECT id FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            tracing::debug!(equipment_id = %id, "Cascade delete skipped, equipment not found");
            return Ok(None);
        }

        let predictions = sqlx::query("DELETE FROM predictions WHERE equipment_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let sensor_readings = sqlx::query("DELETE FROM sensor_readings WHERE equipment_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let maintenance_logs = sqlx::query("DELETE FROM maintenance_logs WHERE equipment_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(DeletedDependents {
            predictions,
            sensor_readings,
            maintenance_logs,
        }))
    }
}
