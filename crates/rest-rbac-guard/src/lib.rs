//! # REST RBAC Guard
//!
//! This crate connects the `rest-rbac` decision core to a host HTTP server.
//!
//! ## Overview
//!
//! The rest-rbac-guard crate handles:
//! - **Configuration**: Role file path and default role, from env or host config
//! - **Role Store**: Loading role files and publishing them as atomic snapshots
//! - **Reloads**: Replacing definitions wholesale; failed reloads change nothing
//! - **Guard**: Turning (role, method, path) into a logged [`Decision`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rest_rbac_guard::{Guard, GuardConfig};
//!
//! let config = GuardConfig::from_env();
//! let guard = Guard::from_config(&config).unwrap();
//!
//! let decision = guard.authorize("accountant", "GET", "/posts/42");
//! if let Some(status) = decision.status_code() {
//!     // reject with `status`
//!     println!("rejected: {} ({status})", decision.reason());
//! }
//!
//! // Later, on SIGHUP or a file watcher event:
//! if let Err(err) = guard.store().reload_from_path("/etc/rbac/roles.json") {
//!     eprintln!("keeping previous roles: {err}");
//! }
//! ```
//!
//! ## Decisions
//!
//! | decision           | when                                  | status |
//! |--------------------|---------------------------------------|--------|
//! | `Bypass`           | path has no resource segment          | -      |
//! | `MethodNotAllowed` | method maps to no action              | 405    |
//! | `UnknownRole`      | role absent from the current snapshot | 403    |
//! | `Denied`           | rules refuse the request              | 403    |
//! | `Allowed`          | rules grant the request               | -      |

pub mod config;
pub mod error;
pub mod guard;
pub mod store;

// Re-export main types
pub use config::{ConfigError, GuardConfig, DEFAULT_ROLE_ENV, ROLES_PATH_ENV};
pub use error::{GuardError, GuardResult};
pub use guard::{AccessRequest, Decision, Guard};
pub use store::{RoleSnapshot, RoleStore};
