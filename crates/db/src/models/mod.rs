//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod equipment;
pub mod maintenance_log;
pub mod prediction;
pub mod sensor_reading;
