//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input with `pdm_core`, delegate to the repositories in
//! `pdm_db` and map errors via [`crate::error::AppError`].

pub mod equipment;
pub mod maintenance;
pub mod predictions;
pub mod sensors;
