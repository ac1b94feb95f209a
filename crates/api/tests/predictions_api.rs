//! HTTP-level integration tests for prediction history and recomputation.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use common::{body_json, get, post_empty};
use sqlx::PgPool;
use uuid::Uuid;

fn recompute_uri(equipment_id: &str) -> String {
    format!("/api/v1/equipment/{equipment_id}/predictions")
}

fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_for_unknown_equipment_returns_404(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/predictions/{}", Uuid::now_v7()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_is_empty_without_readings(pool: PgPool) {
    let id = common::create_equipment(&pool, "Idle").await;
    assert!(common::predictions(&pool, &id).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_is_most_recent_first(pool: PgPool) {
    let id = common::create_equipment(&pool, "Busy").await;
    for value in [10.0, 20.0, 30.0] {
        common::ingest(&pool, &id, value).await;
    }

    let history = common::predictions(&pool, &id).await;
    assert_eq!(history.len(), 3);
    let created: Vec<DateTime<Utc>> = history.iter().map(|p| timestamp(&p["created_at"])).collect();
    assert!(created.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(history[0]["equipment"]["name"], "Busy");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recompute_without_readings_returns_422(pool: PgPool) {
    let id = common::create_equipment(&pool, "Empty").await;

    let response = post_empty(common::build_test_app(pool.clone()), &recompute_uri(&id)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "NO_SENSOR_DATA");

    assert!(common::predictions(&pool, &id).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recompute_forecasts_thirty_hours_ahead(pool: PgPool) {
    let id = common::create_equipment(&pool, "Hot").await;
    for value in [60.0, 75.0, 90.0, 95.0] {
        common::ingest(&pool, &id, value).await;
    }

    let before = Utc::now();
    let response = post_empty(common::build_test_app(pool), &recompute_uri(&id)).await;
    let after = Utc::now();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["failure_probability"], 0.8);
    let forecast = timestamp(&json["data"]["predicted_failure_date"]);
    assert!(forecast >= before + Duration::hours(30));
    assert!(forecast <= after + Duration::hours(30));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_recomputes_append_distinct_rows(pool: PgPool) {
    let id = common::create_equipment(&pool, "Shared").await;
    common::ingest(&pool, &id, 80.0).await;

    let uri = recompute_uri(&id);
    let (a, b) = tokio::join!(
        post_empty(common::build_test_app(pool.clone()), &uri),
        post_empty(common::build_test_app(pool.clone()), &uri),
    );
    assert_eq!(a.status(), StatusCode::CREATED);
    assert_eq!(b.status(), StatusCode::CREATED);

    let (a, b) = (body_json(a).await, body_json(b).await);
    assert_ne!(a["data"]["id"], b["data"]["id"]);
    assert_eq!(a["data"]["failure_probability"], b["data"]["failure_probability"]);

    // One from the ingest plus the two recomputes.
    assert_eq!(common::predictions(&pool, &id).await.len(), 3);
}
