//! Domain errors shared by every crate in the workspace.
//!
//! Infrastructure failures (database, hashing, token signing) are not
//! represented here; the API layer wraps them separately.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A recipe, tag, ingredient, or collection that does not exist, or that
    /// the caller is not allowed to see.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but neither the owner nor an admin.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}
