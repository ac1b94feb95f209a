pub mod equipment;
pub mod health;
pub mod maintenance;
pub mod predictions;
pub mod sensors;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /equipment                          list, create
/// /equipment/{id}                     get, delete (cascading)
/// /equipment/{id}/sensors             reading history
/// /equipment/{id}/maintenance         maintenance history
/// /equipment/{id}/predictions         recompute prediction (POST)
///
/// /sensors                            ingest reading + predict (POST)
/// /maintenance                        record maintenance (POST)
/// /predictions/{equipment_id}         prediction history
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/equipment", equipment::router())
        .nest("/sensors", sensors::router())
        .nest("/maintenance", maintenance::router())
        .nest("/predictions", predictions::router())
}
