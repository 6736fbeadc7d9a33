use crate::types::DbId;

/// Domain errors surfaced to the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness rule (e.g. one planet per `external_id`) would be broken.
    #[error("Conflict: {0}")]
    Conflict(String),
}
