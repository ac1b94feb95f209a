use axum::routing::post;
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// Maintenance log routes mounted at `/maintenance`.
///
/// ```text
/// POST /   -> create_maintenance_log
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(maintenance::create_maintenance_log))
}
