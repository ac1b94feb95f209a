#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pdm_api::config::ServerConfig;
use pdm_api::router::build_app_router;
use pdm_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as the only CORS origin and the default
/// 70.0 / 0.8 risk rule.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        risk_threshold: 70.0,
        high_risk_probability: 0.8,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::new(pool, test_config()))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create equipment through the API and return its id.
pub async fn create_equipment(pool: &PgPool, name: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/equipment",
        serde_json::json!({"name": name, "type": "pump"}),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

/// Ingest one reading through the API and return the raw response.
pub async fn ingest(pool: &PgPool, equipment_id: &str, value: f64) -> Response<Body> {
    post_json(
        build_test_app(pool.clone()),
        "/api/v1/sensors",
        serde_json::json!({"equipment_id": equipment_id, "type": "temperature", "value": value}),
    )
    .await
}

/// Fetch the prediction history for an equipment.
pub async fn predictions(pool: &PgPool, equipment_id: &str) -> Vec<serde_json::Value> {
    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/predictions/{equipment_id}"),
    )
    .await;
    body_json(response).await["data"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}
