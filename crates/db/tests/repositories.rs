//! Integration tests for the repository layer and the predictor store
//! adapter, run against a real database.

use pdm_core::predictor::{MaintenancePredictor, PredictionDraft};
use pdm_core::types::{new_id, DbId};
use pdm_db::models::equipment::{CreateEquipment, DeletedDependents, Equipment};
use pdm_db::models::maintenance_log::CreateMaintenanceLog;
use pdm_db::models::sensor_reading::CreateSensorReading;
use pdm_db::repositories::{EquipmentRepo, MaintenanceLogRepo, PredictionRepo, SensorReadingRepo};
use pdm_db::store::PgMaintenanceStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_equipment(pool: &PgPool, name: &str) -> Equipment {
    EquipmentRepo::create(
        pool,
        &CreateEquipment {
            name: name.to_string(),
            equipment_type: "turbine".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn seed_reading(pool: &PgPool, equipment: &Equipment, value: f64) {
    SensorReadingRepo::create(
        pool,
        &CreateSensorReading {
            equipment_id: equipment.id,
            sensor_type: "vibration".to_string(),
            value,
        },
    )
    .await
    .unwrap();
}

async fn prediction_count(pool: &PgPool, equipment_id: DbId) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM predictions WHERE equipment_id = $1")
        .bind(equipment_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find_equipment(pool: PgPool) {
    let created = seed_equipment(&pool, "Turbine 7").await;

    let found = EquipmentRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(found, Some(created));
    assert_eq!(EquipmentRepo::find_by_id(&pool, new_id()).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_cascade_reports_removed_rows(pool: PgPool) {
    let equipment = seed_equipment(&pool, "Turbine 8").await;
    seed_reading(&pool, &equipment, 71.0).await;
    seed_reading(&pool, &equipment, 72.0).await;
    MaintenanceLogRepo::create(
        &pool,
        &CreateMaintenanceLog {
            equipment_id: equipment.id,
            description: "Blade inspection".to_string(),
            log_date: None,
        },
    )
    .await
    .unwrap();

    let store = PgMaintenanceStore::new(pool.clone());
    MaintenancePredictor::default()
        .predict_and_persist(&store, &store, equipment.id)
        .await
        .unwrap();

    let deleted = EquipmentRepo::delete_cascade(&pool, equipment.id)
        .await
        .unwrap();
    assert_eq!(
        deleted,
        Some(DeletedDependents {
            predictions: 1,
            sensor_readings: 2,
            maintenance_logs: 1,
        })
    );
    assert_eq!(EquipmentRepo::find_by_id(&pool, equipment.id).await.unwrap(), None);
    assert_eq!(prediction_count(&pool, equipment.id).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_cascade_of_missing_equipment_is_none(pool: PgPool) {
    assert_eq!(EquipmentRepo::delete_cascade(&pool, new_id()).await.unwrap(), None);
}

// ---------------------------------------------------------------------------
// Sensor readings and predictions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn reading_for_unknown_equipment_violates_foreign_key(pool: PgPool) {
    let err = SensorReadingRepo::create(
        &pool,
        &CreateSensorReading {
            equipment_id: new_id(),
            sensor_type: "vibration".to_string(),
            value: 1.0,
        },
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn values_are_scoped_to_equipment(pool: PgPool) {
    let a = seed_equipment(&pool, "A").await;
    let b = seed_equipment(&pool, "B").await;
    seed_reading(&pool, &a, 1.0).await;
    seed_reading(&pool, &a, 2.0).await;
    seed_reading(&pool, &b, 3.0).await;

    let mut values = SensorReadingRepo::values_for_equipment(&pool, a.id).await.unwrap();
    values.sort_by(|x, y| x.partial_cmp(y).unwrap());
    assert_eq!(values, vec![1.0, 2.0]);
    assert!(SensorReadingRepo::values_for_equipment(&pool, new_id())
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn predictions_accumulate_with_assigned_ids(pool: PgPool) {
    let equipment = seed_equipment(&pool, "Turbine 9").await;
    seed_reading(&pool, &equipment, 90.0).await;

    let predictor = MaintenancePredictor::default();
    let store = PgMaintenanceStore::new(pool.clone());
    let first = predictor
        .predict_and_persist(&store, &store, equipment.id)
        .await
        .unwrap();
    let second = predictor
        .predict_and_persist(&store, &store, equipment.id)
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.failure_probability, 0.8);
    assert_eq!(prediction_count(&pool, equipment.id).await, 2);

    let history = PredictionRepo::list_for_equipment(&pool, equipment.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].created_at >= history[1].created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn probability_outside_unit_interval_is_rejected_by_schema(pool: PgPool) {
    let equipment = seed_equipment(&pool, "Turbine 10").await;
    let assessment = MaintenancePredictor::default()
        .assess(&[10.0], chrono::Utc::now())
        .unwrap();
    let mut draft = PredictionDraft::new(equipment.id, &assessment);
    draft.failure_probability = 1.5;

    let err = PredictionRepo::create(&pool, &draft).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23514"));
}
