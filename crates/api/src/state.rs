use std::sync::Arc;

use pdm_core::predictor::MaintenancePredictor;
use pdm_db::store::PgMaintenanceStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and the predictor are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pdm_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Risk estimator run after every sensor ingestion.
    pub predictor: MaintenancePredictor,
}

impl AppState {
    pub fn new(pool: pdm_db::DbPool, config: ServerConfig) -> Self {
        let predictor = MaintenancePredictor::new(Arc::new(config.risk_strategy()));
        Self {
            pool,
            config: Arc::new(config),
            predictor,
        }
    }

    /// Predictor read/write capabilities backed by this state's pool.
    pub fn maintenance_store(&self) -> PgMaintenanceStore {
        PgMaintenanceStore::new(self.pool.clone())
    }
}
