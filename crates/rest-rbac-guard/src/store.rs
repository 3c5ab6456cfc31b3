//! Reloadable role store
//!
//! The store publishes immutable [`RoleSnapshot`]s. Reloads parse the new role
//! source completely before swapping it in, so a decision always sees either
//! the old or the new definitions in full. A failed reload leaves the current
//! snapshot in place.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use rest_rbac::RoleDefinitions;

use crate::error::{GuardError, GuardResult};

/// A published set of role definitions.
#[derive(Debug, Clone)]
pub struct RoleSnapshot {
    /// The role definitions.
    pub definitions: Arc<RoleDefinitions>,
    /// Monotonic revision, starting at 1 for the first load.
    pub revision: u64,
    /// When this snapshot was published.
    pub loaded_at: DateTime<Utc>,
}

impl RoleSnapshot {
    fn new(definitions: Arc<RoleDefinitions>, revision: u64) -> Self {
        Self {
            definitions,
            revision,
            loaded_at: Utc::now(),
        }
    }
}

/// Holds the current role definitions and swaps them atomically on reload.
///
/// Readers never block: [`RoleStore::snapshot`] is a single atomic load.
pub struct RoleStore {
    current: ArcSwap<RoleSnapshot>,
}

impl std::fmt::Debug for RoleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.current.load();
        f.debug_struct("RoleStore")
            .field("revision", &current.revision)
            .field("roles", &current.definitions.len())
            .finish()
    }
}

impl RoleStore {
    /// Create a store from already built definitions.
    pub fn new(definitions: RoleDefinitions) -> Self {
        Self {
            current: ArcSwap::from_pointee(RoleSnapshot::new(Arc::new(definitions), 1)),
        }
    }

    /// Create a store from a role definitions file.
    pub fn load(path: impl AsRef<Path>) -> GuardResult<Self> {
        let path = path.as_ref();
        let definitions = read_definitions(path)?;
        tracing::info!(
            path = %path.display(),
            roles = definitions.len(),
            "Loaded role definitions"
        );
        Ok(Self::new(definitions))
    }

    /// Create a store from JSON text.
    pub fn from_json_str(source: &str) -> GuardResult<Self> {
        parse_definitions(source).map(Self::new)
    }

    /// The current snapshot, including its revision metadata.
    pub fn current(&self) -> Arc<RoleSnapshot> {
        self.current.load_full()
    }

    /// The current role definitions.
    pub fn snapshot(&self) -> Arc<RoleDefinitions> {
        Arc::clone(&self.current.load().definitions)
    }

    /// Revision of the current snapshot.
    pub fn revision(&self) -> u64 {
        self.current.load().revision
    }

    /// When the current snapshot was published.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.current.load().loaded_at
    }

    /// Publish new definitions, replacing the current ones wholesale.
    ///
    /// Returns the revision of the published snapshot.
    pub fn replace(&self, definitions: RoleDefinitions) -> u64 {
        let definitions = Arc::new(definitions);
        let previous = self
            .current
            .rcu(|current| RoleSnapshot::new(Arc::clone(&definitions), current.revision + 1));
        let revision = previous.revision + 1;
        tracing::info!(revision, roles = definitions.len(), "Published role definitions");
        revision
    }

    /// Reload definitions from a file.
    ///
    /// On failure the current snapshot stays authoritative.
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> GuardResult<u64> {
        let path = path.as_ref();
        match read_definitions(path) {
            Ok(definitions) => Ok(self.replace(definitions)),
            Err(err) => {
                tracing::error!(
                    path = %path.display(),
                    error = %err,
                    revision = self.revision(),
                    "Role reload failed, keeping current definitions"
                );
                Err(err)
            }
        }
    }

    /// Reload definitions from JSON text.
    ///
    /// On failure the current snapshot stays authoritative.
    pub fn reload_from_str(&self, source: &str) -> GuardResult<u64> {
        match parse_definitions(source) {
            Ok(definitions) => Ok(self.replace(definitions)),
            Err(err) => {
                tracing::error!(
                    error = %err,
                    revision = self.revision(),
                    "Role reload failed, keeping current definitions"
                );
                Err(err)
            }
        }
    }
}

fn read_definitions(path: &Path) -> GuardResult<RoleDefinitions> {
    let source = std::fs::read_to_string(path).map_err(|source| GuardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_definitions(&source)
}

fn parse_definitions(source: &str) -> GuardResult<RoleDefinitions> {
    Ok(RoleDefinitions::from_json_str(source)?)
}
