//! Error types for role definition parsing
//!
//! Only structurally invalid role sources are errors. Rules that parse but can
//! never match anything are accepted as-is.

use thiserror::Error;

/// Errors raised while building [`RoleDefinitions`](crate::RoleDefinitions).
#[derive(Debug, Error)]
pub enum RbacError {
    /// The source could not be decoded into a role → rule list mapping.
    #[error("Invalid role definitions: {0}")]
    InvalidDefinitions(String),
}

/// Result type for RBAC operations.
pub type RbacResult<T> = Result<T, RbacError>;

impl From<serde_json::Error> for RbacError {
    fn from(err: serde_json::Error) -> Self {
        RbacError::InvalidDefinitions(err.to_string())
    }
}
