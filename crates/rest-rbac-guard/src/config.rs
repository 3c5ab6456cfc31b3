//! Guard configuration.
//!
//! Configuration is loaded from environment variables, or deserialized from
//! whatever host configuration embeds the guard.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the role definitions file.
pub const ROLES_PATH_ENV: &str = "RBAC_ROLES_PATH";

/// Environment variable naming the role used when the host supplies none.
pub const DEFAULT_ROLE_ENV: &str = "RBAC_DEFAULT_ROLE";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration value.
    #[error("Missing required configuration value: {0}")]
    Missing(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration for a [`Guard`](crate::Guard).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// JSON file holding the role definitions.
    #[serde(default, alias = "roles")]
    pub roles_path: Option<PathBuf>,

    /// Role applied to requests that carry no role of their own.
    #[serde(default)]
    pub default_role: Option<String>,
}

impl GuardConfig {
    /// Create a configuration for a role definitions file.
    pub fn new(roles_path: impl Into<PathBuf>) -> Self {
        Self {
            roles_path: Some(roles_path.into()),
            default_role: None,
        }
    }

    /// Set the default role.
    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = Some(role.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RBAC_ROLES_PATH`: role definitions file (`roles_path`)
    /// - `RBAC_DEFAULT_ROLE`: role used when the host supplies none (`default_role`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            roles_path: lookup(ROLES_PATH_ENV).map(PathBuf::from),
            default_role: lookup(DEFAULT_ROLE_ENV),
        }
    }

    /// Validate that a guard can be built from this configuration.
    ///
    /// Returns the role definitions path.
    pub fn validate(&self) -> Result<&Path, ConfigError> {
        let path = self
            .roles_path
            .as_deref()
            .ok_or_else(|| ConfigError::Missing("roles_path".to_string()))?;

        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "roles_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if matches!(self.default_role.as_deref(), Some("")) {
            return Err(ConfigError::InvalidValue {
                key: "default_role".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(path)
    }
}
