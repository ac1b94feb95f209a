//! Sensor ingestion. Every accepted reading triggers a new prediction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pdm_core::equipment::{validate_reading_value, validate_sensor_type};
use pdm_core::types::DbId;
use pdm_db::models::sensor_reading::CreateSensorReading;
use pdm_db::repositories::SensorReadingRepo;

use crate::error::AppResult;
use crate::handlers::equipment::require_equipment;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/sensors
///
/// Saves the reading, then runs the Maintenance Predictor for its equipment.
/// The two steps are not transactional: if the prediction fails the reading
/// stays saved and the prediction error is returned.
pub async fn ingest_sensor_reading(
    State(state): State<AppState>,
    Json(input): Json<CreateSensorReading>,
) -> AppResult<impl IntoResponse> {
    validate_sensor_type(&input.sensor_type)?;
    validate_reading_value(input.value)?;
    require_equipment(&state.pool, input.equipment_id).await?;

    let reading = SensorReadingRepo::create(&state.pool, &input).await?;

    tracing::info!(
        reading_id = %reading.id,
        equipment_id = %reading.equipment_id,
        sensor_type = %reading.sensor_type,
        value = reading.value,
        "Sensor reading saved",
    );

    let store = state.maintenance_store();
    if let Err(err) = state
        .predictor
        .predict_and_persist(&store, &store, reading.equipment_id)
        .await
    {
        tracing::warn!(
            reading_id = %reading.id,
            equipment_id = %reading.equipment_id,
            error = %err,
            "Sensor reading saved but prediction failed",
        );
        return Err(err.into());
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: reading })))
}

/// GET /api/v1/equipment/{id}/sensors
pub async fn list_sensor_readings(
    State(state): State<AppState>,
    Path(equipment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_equipment(&state.pool, equipment_id).await?;
    let readings = SensorReadingRepo::list_for_equipment(&state.pool, equipment_id).await?;
    Ok(Json(DataResponse { data: readings }))
}
