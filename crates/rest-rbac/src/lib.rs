//! # REST RBAC (Role-Based Access Control)
//!
//! This crate provides the decision core for role-based access control over
//! REST-style HTTP resources.
//!
//! ## Overview
//!
//! The rest-rbac crate handles:
//! - **Roles**: Named, ordered lists of permission rules parsed from JSON
//! - **Permissions**: Allow or deny rules over an action set and a resource pattern
//! - **Resources**: Exact, prefix (`posts.*`) and universal (`*`) patterns
//! - **Actions**: `list`, `show`, `create`, `edit`, `delete` derived from requests
//! - **Conventions**: Mapping a request's method and path to resource and action
//!
//! ## Decision Model
//!
//! ```text
//! any matching deny rule   -> denied
//! any matching allow rule  -> allowed
//! otherwise                -> denied
//! ```
//!
//! Rule order never changes a decision, and a role without rules is denied
//! everything.
//!
//! ## Usage
//!
//! ```rust
//! use rest_rbac::{RequestConvention, RequestTarget, RestConvention, RoleDefinitions};
//!
//! let roles = RoleDefinitions::from_json_str(r#"{
//!     "accountant": [
//!         { "action": ["list", "show"], "resource": "posts" },
//!         { "type": "deny", "action": "read", "resource": "posts.views" }
//!     ]
//! }"#).unwrap();
//!
//! match RestConvention.resolve("GET", "/posts/42") {
//!     RequestTarget::Protected { resource, action, .. } => {
//!         assert_eq!(roles.can_access("accountant", &action, &resource), Some(true));
//!     }
//!     other => panic!("unexpected target: {other:?}"),
//! }
//! ```
//!
//! Everything in this crate is pure: no I/O, no locking, no global state.
//! Loading, reloading and logging live in `rest-rbac-guard`.

pub mod actions;
pub mod convention;
pub mod error;
pub mod permissions;
pub mod resources;
pub mod roles;

// Re-export main types for convenience
pub use actions::{resolve_action, Action, ActionSet, ACTION_WILDCARD};
pub use convention::{
    extract_identifier, extract_resource, PathSegments, RequestConvention, RequestTarget,
    RestConvention,
};
pub use error::{RbacError, RbacResult};
pub use permissions::{can_access, has_any_access, Permission, PermissionType};
pub use resources::{matches, ResourcePattern, RESOURCE_WILDCARD};
pub use roles::{RoleDefinition, RoleDefinitions};
