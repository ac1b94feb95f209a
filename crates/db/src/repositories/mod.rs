//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod equipment_repo;
pub mod maintenance_log_repo;
pub mod prediction_repo;
pub mod sensor_reading_repo;

pub use equipment_repo::EquipmentRepo;
pub use maintenance_log_repo::MaintenanceLogRepo;
pub use prediction_repo::PredictionRepo;
pub use sensor_reading_repo::SensorReadingRepo;
