use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A slot, stock count, or date range cannot admit the request.
    #[error("Capacity exceeded: {0}")]
    Capacity(String),

    #[error("Insufficient eco-points: available {available}, requested {requested}")]
    InsufficientPoints { available: i64, requested: i64 },

    #[error("Illegal booking status transition from {from} to {to}")]
    IllegalTransition { from: String, to: String },

    /// Object storage or identity provider failure.
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
