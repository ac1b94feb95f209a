//! Prediction history and on-demand recomputation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pdm_core::types::DbId;
use pdm_db::models::prediction::PredictionWithEquipment;
use pdm_db::repositories::PredictionRepo;

use crate::error::AppResult;
use crate::handlers::equipment::require_equipment;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/predictions/{equipment_id}
///
/// Every stored prediction for the equipment, most recent first, each with
/// the owning equipment embedded.
pub async fn list_predictions(
    State(state): State<AppState>,
    Path(equipment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let equipment = require_equipment(&state.pool, equipment_id).await?;
    let predictions = PredictionRepo::list_for_equipment(&state.pool, equipment_id).await?;

    let data: Vec<PredictionWithEquipment> = predictions
        .into_iter()
        .map(|prediction| PredictionWithEquipment {
            prediction,
            equipment: equipment.clone(),
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/equipment/{id}/predictions
///
/// Recompute from the full stored history without ingesting a reading.
/// Returns 422 when the equipment has no readings.
pub async fn recompute_prediction(
    State(state): State<AppState>,
    Path(equipment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_equipment(&state.pool, equipment_id).await?;

    let store = state.maintenance_store();
    let prediction = state
        .predictor
        .predict_and_persist(&store, &store, equipment_id)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: prediction })))
}
