//! Route definitions for equipment and its owned records.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{equipment, maintenance, predictions, sensors};
use crate::state::AppState;

/// Equipment routes mounted at `/equipment`.
///
/// ```text
/// GET    /                     -> list_equipment
/// POST   /                     -> create_equipment
/// GET    /{id}                 -> get_equipment
/// DELETE /{id}                 -> delete_equipment
/// GET    /{id}/sensors         -> list_sensor_readings
/// GET    /{id}/maintenance     -> list_maintenance_logs
/// POST   /{id}/predictions     -> recompute_prediction
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/{id}",
            get(equipment::get_equipment).delete(equipment::delete_equipment),
        )
        .route("/{id}/sensors", get(sensors::list_sensor_readings))
        .route("/{id}/maintenance", get(maintenance::list_maintenance_logs))
        .route("/{id}/predictions", post(predictions::recompute_prediction))
}
