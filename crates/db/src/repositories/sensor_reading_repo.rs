//! Repository for the `sensor_readings` table.

use pdm_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::sensor_reading::{CreateSensorReading, SensorReading};

/// Column list for `sensor_readings` queries.
const COLUMNS: &str = "id, equipment_id, sensor_type, value, created_at, updated_at";

/// Provides data access for sensor readings.
pub struct SensorReadingRepo;

impl SensorReadingRepo {
    /// Insert a reading. The equipment must exist (foreign key).
    pub async fn create(
        pool: &PgPool,
        input: &CreateSensorReading,
    ) -> Result<SensorReading, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_readings (id, equipment_id, sensor_type, value) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorReading>(&query)
            .bind(new_id())
            .bind(input.equipment_id)
            .bind(&input.sensor_type)
            .bind(input.value)
            .fetch_one(pool)
            .await
    }

    /// List every reading for an equipment, newest first.
    pub async fn list_for_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Vec<SensorReading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_readings \
             WHERE equipment_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SensorReading>(&query)
            .bind(equipment_id)
            .fetch_all(pool)
            .await
    }

    /// Just the values of every reading for an equipment, unordered.
    ///
    /// Empty when the equipment has no readings or does not exist.
    pub async fn values_for_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Vec<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, f64>("SELECT value FROM sensor_readings WHERE equipment_id = $1")
            .bind(equipment_id)
            .fetch_all(pool)
            .await
    }
}
