//! Maintenance log records. Stored for reference only; predictions do not
//! read them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pdm_core::equipment::validate_description;
use pdm_core::types::DbId;
use pdm_db::models::maintenance_log::CreateMaintenanceLog;
use pdm_db::repositories::MaintenanceLogRepo;

use crate::error::AppResult;
use crate::handlers::equipment::require_equipment;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/maintenance
pub async fn create_maintenance_log(
    State(state): State<AppState>,
    Json(input): Json<CreateMaintenanceLog>,
) -> AppResult<impl IntoResponse> {
    validate_description(&input.description)?;
    require_equipment(&state.pool, input.equipment_id).await?;

    let log = MaintenanceLogRepo::create(&state.pool, &input).await?;

    tracing::info!(
        log_id = %log.id,
        equipment_id = %log.equipment_id,
        log_date = %log.log_date,
        "Maintenance log recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

/// GET /api/v1/equipment/{id}/maintenance
pub async fn list_maintenance_logs(
    State(state): State<AppState>,
    Path(equipment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_equipment(&state.pool, equipment_id).await?;
    let logs = MaintenanceLogRepo::list_for_equipment(&state.pool, equipment_id).await?;
    Ok(Json(DataResponse { data: logs }))
}
