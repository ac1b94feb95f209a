use axum::routing::get;
use axum::Router;

use crate::handlers::predictions;
use crate::state::AppState;

/// Prediction history mounted at `/predictions`.
///
/// ```text
/// GET /{equipment_id}   -> list_predictions
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{equipment_id}", get(predictions::list_predictions))
}
