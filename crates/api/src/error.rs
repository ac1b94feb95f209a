//! Handler error type and its JSON rendering.
//!
//! Every failure leaves the API as `{"error": <message>, "code": <CODE>}`.
//! Internal details are logged, never echoed to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pdm_core::error::CoreError;
use pdm_core::prediction::RiskError;
use pdm_core::predictor::PredictError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The Maintenance Predictor could not produce or store a prediction.
    #[error(transparent)]
    Prediction(#[from] PredictError<sqlx::Error>),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

type Parts = (StatusCode, &'static str, String);

impl AppError {
    fn parts(&self) -> Parts {
        match self {
            Self::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            Self::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            Self::Database(err) | Self::Prediction(PredictError::Store(err)) => classify_sqlx_error(err),
            Self::Prediction(PredictError::Risk(RiskError::NoData(_))) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_SENSOR_DATA",
                "No sensor data available for this equipment".to_string(),
            ),
            Self::Prediction(PredictError::Risk(risk)) => {
                tracing::error!(error = %risk, "Risk computation failed");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn internal() -> Parts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map a sqlx error onto the API's error codes.
///
/// `RowNotFound` is 404. Foreign key violations (`23503`) and violations of
/// `uq_`-prefixed unique constraints (`23505`) are 409. Anything else is a
/// logged 500.
fn classify_sqlx_error(err: &sqlx::Error) -> Parts {
    if let sqlx::Error::RowNotFound = err {
        return (StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found".to_string());
    }

    if let Some(db_err) = err.as_database_error() {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            Some("23503") => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Referenced record does not exist or is still referenced: {constraint}"),
                )
            }
            Some("23505") if constraint.starts_with("uq_") => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                )
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Database error");
    internal()
}
