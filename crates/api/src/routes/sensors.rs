use axum::routing::post;
use axum::Router;

use crate::handlers::sensors;
use crate::state::AppState;

/// Sensor ingestion mounted at `/sensors`.
///
/// ```text
/// POST /   -> ingest_sensor_reading
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(sensors::ingest_sensor_reading))
}
