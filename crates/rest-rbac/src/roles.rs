//! # Role Definitions
//!
//! Roles map a name to an ordered list of [`Permission`] rules. A role source
//! is a JSON object:
//!
//! ```json
//! {
//!   "accountant": [
//!     { "action": ["list", "show"], "resource": "posts" },
//!     { "type": "deny", "action": "read", "resource": "posts.views" }
//!   ],
//!   "admin": [
//!     { "action": "*", "resource": "*" }
//!   ]
//! }
//! ```
//!
//! Parsing is lenient about field values and strict about shape: the document
//! must be an object of arrays of objects. `null` is accepted for the whole
//! document (no roles), for a role's rule list (no rules) and for a single
//! rule (a rule with every field absent).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{RbacError, RbacResult};
use crate::permissions::{self, Permission};

/// The ordered rules of one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleDefinition {
    rules: Vec<Permission>,
}

impl RoleDefinition {
    /// Create a role from its rules.
    pub fn new(rules: Vec<Permission>) -> Self {
        Self { rules }
    }

    /// The rules in source order.
    pub fn rules(&self) -> &[Permission] {
        &self.rules
    }

    /// Decide whether this role may perform `action` on `resource`.
    pub fn can_access(&self, action: &str, resource: &str) -> bool {
        permissions::can_access(&self.rules, action, resource)
    }

    /// Check whether this role has any access to `resource`.
    pub fn has_any_access(&self, resource: &str) -> bool {
        permissions::has_any_access(&self.rules, resource)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the role has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Permission> for RoleDefinition {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Source shape accepted for role definitions.
type RawDefinitions = HashMap<String, Option<Vec<Option<Map<String, Value>>>>>;

/// All roles known to an authorizer.
///
/// Built once per configuration load and never mutated; reloads build a new
/// value. Share it behind an `Arc` for concurrent decisions.
///
/// # Example
///
/// ```
/// use rest_rbac::RoleDefinitions;
///
/// let roles = RoleDefinitions::from_json_str(r#"{
///     "accountant": [
///         { "action": ["list", "show"], "resource": "posts" },
///         { "type": "deny", "action": "read", "resource": "posts.views" }
///     ]
/// }"#).unwrap();
///
/// assert_eq!(roles.can_access("accountant", "list", "posts"), Some(true));
/// assert_eq!(roles.can_access("accountant", "read", "posts.views"), Some(false));
/// assert_eq!(roles.can_access("intern", "list", "posts"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleDefinitions {
    roles: HashMap<String, RoleDefinition>,
}

impl RoleDefinitions {
    /// Create an empty set of roles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse role definitions from JSON text.
    pub fn from_json_str(source: &str) -> RbacResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parse role definitions from JSON bytes.
    pub fn from_json_slice(source: &[u8]) -> RbacResult<Self> {
        Ok(serde_json::from_slice(source)?)
    }

    /// Parse role definitions from an already decoded JSON value.
    pub fn from_json_value(value: Value) -> RbacResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    fn from_raw(raw: RawDefinitions) -> Self {
        raw.into_iter()
            .map(|(name, rules)| {
                let definition: RoleDefinition = rules
                    .unwrap_or_default()
                    .iter()
                    .map(|rule| match rule {
                        Some(object) => Permission::from_object(object),
                        None => Permission::from_object(&Map::new()),
                    })
                    .collect();
                (name, definition)
            })
            .collect()
    }

    /// Add or replace a role while building a definition set.
    pub fn insert(&mut self, name: impl Into<String>, definition: RoleDefinition) {
        self.roles.insert(name.into(), definition);
    }

    /// Look up a role.
    pub fn get(&self, role: &str) -> Option<&RoleDefinition> {
        self.roles.get(role)
    }

    /// Check if a role is defined.
    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Decide whether `role` may perform `action` on `resource`.
    ///
    /// Returns `None` when the role is not defined, so callers can report an
    /// unknown role separately from a denial.
    pub fn can_access(&self, role: &str, action: &str, resource: &str) -> Option<bool> {
        self.get(role)
            .map(|definition| definition.can_access(action, resource))
    }

    /// Role names, sorted.
    pub fn roles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.roles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if no roles are defined.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl<'de> Deserialize<'de> for RoleDefinitions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawDefinitions>::deserialize(deserializer)
            .map(|raw| Self::from_raw(raw.unwrap_or_default()))
    }
}

impl<S: Into<String>> FromIterator<(S, RoleDefinition)> for RoleDefinitions {
    fn from_iter<T: IntoIterator<Item = (S, RoleDefinition)>>(iter: T) -> Self {
        Self {
            roles: iter
                .into_iter()
                .map(|(name, definition)| (name.into(), definition))
                .collect(),
        }
    }
}

impl std::str::FromStr for RoleDefinitions {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}
