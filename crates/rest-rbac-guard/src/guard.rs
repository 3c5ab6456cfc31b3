//! Per-request authorization
//!
//! A [`Guard`] combines a [`RoleStore`] with a [`RequestConvention`] and turns
//! a (role, method, path) triple into a [`Decision`]. Every decision is
//! logged through `tracing`.

use std::sync::Arc;

use rest_rbac::{RequestConvention, RequestTarget, RestConvention, RoleDefinitions};
use serde::Serialize;

use crate::config::GuardConfig;
use crate::error::GuardResult;
use crate::store::RoleStore;

/// The request an access decision was made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRequest {
    /// Role the request was evaluated as.
    pub role: String,
    /// Resolved action.
    pub action: String,
    /// Resolved resource.
    pub resource: String,
    /// Record identifier from the path, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

/// Outcome of authorizing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    /// The path targets no protected resource; let it through unchecked.
    Bypass,
    /// The method maps to no action; reject.
    MethodNotAllowed {
        /// Resource the request targeted.
        resource: String,
    },
    /// The role is not defined; reject.
    UnknownRole {
        /// Role that was requested.
        role: String,
    },
    /// The role's rules refuse the request.
    Denied(AccessRequest),
    /// The role's rules grant the request.
    Allowed(AccessRequest),
}

impl Decision {
    /// Check if the request may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Bypass | Decision::Allowed(_))
    }

    /// HTTP status the host should reject with, or `None` to proceed.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Decision::Bypass | Decision::Allowed(_) => None,
            Decision::MethodNotAllowed { .. } => Some(405),
            Decision::UnknownRole { .. } | Decision::Denied(_) => Some(403),
        }
    }

    /// Short human-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Decision::Bypass => "no protected resource",
            Decision::MethodNotAllowed { .. } => "method not allowed",
            Decision::UnknownRole { .. } => "role not found",
            Decision::Denied(_) => "access denied",
            Decision::Allowed(_) => "access granted",
        }
    }

    /// The evaluated request, for allowed and denied decisions.
    pub fn request(&self) -> Option<&AccessRequest> {
        match self {
            Decision::Denied(request) | Decision::Allowed(request) => Some(request),
            _ => None,
        }
    }
}

/// Authorizes requests against the current role definitions.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rest_rbac_guard::{Decision, Guard, RoleStore};
///
/// let store = RoleStore::from_json_str(r#"{
///     "accountant": [ { "action": ["list", "show"], "resource": "posts" } ]
/// }"#).unwrap();
/// let guard = Guard::new(Arc::new(store));
///
/// assert!(guard.authorize("accountant", "GET", "/posts/1").is_allowed());
/// assert_eq!(guard.authorize("accountant", "DELETE", "/posts/1").status_code(), Some(403));
/// assert_eq!(guard.authorize("accountant", "GET", "/"), Decision::Bypass);
/// ```
#[derive(Debug)]
pub struct Guard<C = RestConvention> {
    store: Arc<RoleStore>,
    convention: C,
    default_role: Option<String>,
}

impl Guard<RestConvention> {
    /// Create a guard using the REST convention.
    pub fn new(store: Arc<RoleStore>) -> Self {
        Self::with_convention(store, RestConvention)
    }

    /// Validate a configuration and load its role definitions.
    pub fn from_config(config: &GuardConfig) -> GuardResult<Self> {
        let path = config.validate()?;
        let store = RoleStore::load(path)?;
        let mut guard = Self::new(Arc::new(store));
        guard.default_role = config.default_role.clone();
        Ok(guard)
    }
}

impl<C: RequestConvention> Guard<C> {
    /// Create a guard with a custom request convention.
    pub fn with_convention(store: Arc<RoleStore>, convention: C) -> Self {
        Self {
            store,
            convention,
            default_role: None,
        }
    }

    /// Set the role used by [`Guard::authorize_default`].
    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = Some(role.into());
        self
    }

    /// The role store, for reloads.
    pub fn store(&self) -> &Arc<RoleStore> {
        &self.store
    }

    /// The configured default role.
    pub fn default_role(&self) -> Option<&str> {
        self.default_role.as_deref()
    }

    /// Authorize a request against the current snapshot.
    pub fn authorize(&self, role: &str, method: &str, path: &str) -> Decision {
        let snapshot = self.store.snapshot();
        self.authorize_with(&snapshot, role, method, path)
    }

    /// Authorize a request as the default role.
    ///
    /// Without a default role this reports an unknown (empty) role.
    pub fn authorize_default(&self, method: &str, path: &str) -> Decision {
        let role = self.default_role.as_deref().unwrap_or("");
        self.authorize(role, method, path)
    }

    /// Authorize a request against a given set of role definitions.
    pub fn authorize_with(
        &self,
        definitions: &RoleDefinitions,
        role: &str,
        method: &str,
        path: &str,
    ) -> Decision {
        let (resource, record_id, action) = match self.convention.resolve(method, path) {
            RequestTarget::Unprotected => {
                tracing::debug!(method, path, "No resource in path, skipping authorization");
                return Decision::Bypass;
            }
            RequestTarget::Unsupported { resource, .. } => {
                tracing::warn!(method, resource = %resource, "Method not allowed");
                return Decision::MethodNotAllowed { resource };
            }
            RequestTarget::Protected {
                resource,
                identifier,
                action,
            } => (resource, identifier, action),
        };

        let Some(definition) = definitions.get(role) else {
            tracing::warn!(role, "Role not found");
            return Decision::UnknownRole {
                role: role.to_string(),
            };
        };

        let allowed = definition.can_access(&action, &resource);
        let request = AccessRequest {
            role: role.to_string(),
            action,
            resource,
            record_id,
        };

        let record_id = request.record_id.as_deref().unwrap_or("");
        if allowed {
            tracing::info!(
                role,
                action = %request.action,
                resource = %request.resource,
                record_id,
                "Access granted"
            );
            Decision::Allowed(request)
        } else {
            tracing::info!(
                role,
                action = %request.action,
                resource = %request.resource,
                record_id,
                "Access denied"
            );
            Decision::Denied(request)
        }
    }
}
