//! Domain errors shared by the storage and HTTP layers.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No `entity` row has this id.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// Input rejected before it reached storage.
    #[error("invalid input: {0}")]
    Validation(String),
}
