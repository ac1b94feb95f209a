//! Handlers for the equipment resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pdm_core::equipment::{validate_equipment_name, validate_equipment_type};
use pdm_core::error::CoreError;
use pdm_core::types::DbId;
use pdm_db::models::equipment::{CreateEquipment, DeletedDependents, Equipment};
use pdm_db::repositories::EquipmentRepo;
use pdm_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for a successful cascading delete.
#[derive(Debug, Serialize)]
pub struct EquipmentDeleted {
    pub id: DbId,
    pub message: &'static str,
    pub deleted: DeletedDependents,
}

/// Load equipment or fail with a 404.
pub(crate) async fn require_equipment(pool: &DbPool, id: DbId) -> AppResult<Equipment> {
    EquipmentRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))
}

/// POST /api/v1/equipment
pub async fn create_equipment(
    State(state): State<AppState>,
    Json(input): Json<CreateEquipment>,
) -> AppResult<impl IntoResponse> {
    validate_equipment_name(&input.name)?;
    validate_equipment_type(&input.equipment_type)?;

    let equipment = EquipmentRepo::create(&state.pool, &input).await?;

    tracing::info!(
        equipment_id = %equipment.id,
        name = %equipment.name,
        equipment_type = %equipment.equipment_type,
        "Equipment created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: equipment })))
}

/// GET /api/v1/equipment
pub async fn list_equipment(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let equipment = EquipmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: equipment }))
}

/// GET /api/v1/equipment/{id}
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let equipment = require_equipment(&state.pool, id).await?;
    Ok(Json(DataResponse { data: equipment }))
}

/// DELETE /api/v1/equipment/{id}
///
/// Removes the equipment together with its predictions, sensor readings and
/// maintenance logs in a single transaction.
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = EquipmentRepo::delete_cascade(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;

    tracing::info!(
        equipment_id = %id,
        predictions = deleted.predictions,
        sensor_readings = deleted.sensor_readings,
        maintenance_logs = deleted.maintenance_logs,
        "Equipment deleted",
    );

    Ok(Json(DataResponse {
        data: EquipmentDeleted {
            id,
            message: "Equipment deleted successfully",
            deleted,
        },
    }))
}
