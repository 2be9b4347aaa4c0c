use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{0}")]
    Validation(String),

    /// A uniqueness rule (product/category name, user email) was violated.
    /// Carried as a typed kind so callers never classify by message text.
    #[error("{field} already in use")]
    Duplicate { field: &'static str },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Internal(String),
}
