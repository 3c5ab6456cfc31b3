//! Error types for loading and reloading role definitions
//!
//! Authorization outcomes are never errors; see [`Decision`](crate::Decision).
//! Only configuration and role-file problems surface here.

use std::path::PathBuf;

use rest_rbac::RbacError;
use thiserror::Error;

use crate::config::ConfigError;

/// Guard error types.
#[derive(Debug, Error)]
pub enum GuardError {
    /// Role definitions file could not be read
    #[error("Failed to read role definitions from {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Role definitions could not be decoded
    #[error(transparent)]
    Definitions(#[from] RbacError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for guard operations.
pub type GuardResult<T> = Result<T, GuardError>;

impl GuardError {
    /// Check if this error should be logged at error level.
    ///
    /// Unreadable files are an operational problem; the other variants are
    /// authoring mistakes in the role file or configuration.
    pub fn is_server_error(&self) -> bool {
        matches!(self, GuardError::Io { .. })
    }

    /// Get error code for diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            GuardError::Io { .. } => "ROLES_UNREADABLE",
            GuardError::Definitions(_) => "INVALID_ROLES",
            GuardError::Config(_) => "CONFIG_ERROR",
        }
    }
}
