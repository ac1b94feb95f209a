//! Domain logic for the predictive-maintenance service.
//!
//! Nothing in this crate touches the network or the database. Persistence is
//! reached through the traits in [`predictor`], implemented by `pdm-db`.

pub mod equipment;
pub mod error;
pub mod prediction;
pub mod predictor;
pub mod types;
