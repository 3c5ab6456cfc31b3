//! # Permissions
//!
//! Permission rules and the decision engine evaluating them.
//!
//! A rule allows or denies a set of actions on a resource pattern. A role's
//! rules are evaluated in two passes:
//!
//! 1. if any deny rule matches the request, access is denied;
//! 2. otherwise, if any allow rule matches, access is granted;
//! 3. otherwise access is denied.
//!
//! Rule order is irrelevant to the outcome.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::actions::{ActionSet, ACTION_WILDCARD};
use crate::resources;

/// Effect of a rule.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PermissionType {
    /// Grants access when matched.
    #[default]
    Allow,
    /// Refuses access when matched, overriding any allow rule.
    Deny,
}

impl PermissionType {
    /// Get the string representation of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionType::Allow => "allow",
            PermissionType::Deny => "deny",
        }
    }

    /// Parse a type, treating anything other than `"deny"` as allow.
    pub fn parse(s: &str) -> Self {
        if s == "deny" {
            PermissionType::Deny
        } else {
            PermissionType::Allow
        }
    }
}

/// A single allow or deny rule.
///
/// # Example
///
/// ```
/// use rest_rbac::permissions::Permission;
///
/// let rule = Permission::allow(["list", "show"], "posts");
/// assert!(rule.matches_target("show", "posts"));
/// assert!(!rule.matches_target("create", "posts"));
/// ```
///
/// Deserializing a rule accepts any JSON object and reads it the same way
/// role definitions do; see [`Permission::from_object`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permission {
    /// Whether the rule grants or refuses access.
    #[serde(rename = "type")]
    pub permission_type: PermissionType,
    /// Actions covered by the rule.
    pub action: ActionSet,
    /// Resource pattern covered by the rule.
    pub resource: String,
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(|object| Self::from_object(&object))
    }
}

impl Permission {
    /// Create a rule.
    pub fn new(
        permission_type: PermissionType,
        action: impl Into<ActionSet>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            permission_type,
            action: action.into(),
            resource: resource.into(),
        }
    }

    /// Create an allow rule.
    pub fn allow<I, S>(actions: I, resource: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PermissionType::Allow, actions.into_iter().collect::<ActionSet>(), resource)
    }

    /// Create a deny rule.
    pub fn deny<I, S>(actions: I, resource: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PermissionType::Deny, actions.into_iter().collect::<ActionSet>(), resource)
    }

    /// Build a rule from a loosely typed JSON object.
    ///
    /// Fields of the wrong type are treated as absent: `type` defaults to
    /// allow, `resource` to the empty string, `action` to the empty set.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let permission_type = object
            .get("type")
            .and_then(Value::as_str)
            .map(PermissionType::parse)
            .unwrap_or_default();
        let resource = object
            .get("resource")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let action = object
            .get("action")
            .map(ActionSet::from_value)
            .unwrap_or_default();

        Self {
            permission_type,
            action,
            resource,
        }
    }

    /// Check if this is a deny rule.
    pub fn is_deny(&self) -> bool {
        self.permission_type == PermissionType::Deny
    }

    /// Check if the rule covers a requested action and resource.
    ///
    /// An empty or `"*"` action matches on resource alone.
    pub fn matches_target(&self, action: &str, resource: &str) -> bool {
        resources::matches(&self.resource, resource) && self.action.matches(action)
    }
}

/// Decide whether rules grant `action` on `resource`.
///
/// Deny rules win over allow rules wherever they appear; no match denies.
///
/// # Example
///
/// ```
/// use rest_rbac::permissions::{can_access, Permission};
///
/// let rules = vec![
///     Permission::allow(["list", "show"], "posts"),
///     Permission::deny(["read"], "posts.views"),
/// ];
///
/// assert!(!can_access(&rules, "read", "posts.views"));
/// assert!(can_access(&rules, "list", "posts"));
/// assert!(!can_access(&rules, "delete", "posts"));
/// ```
pub fn can_access(rules: &[Permission], action: &str, resource: &str) -> bool {
    if rules
        .iter()
        .any(|rule| rule.is_deny() && rule.matches_target(action, resource))
    {
        return false;
    }

    rules
        .iter()
        .any(|rule| !rule.is_deny() && rule.matches_target(action, resource))
}

/// Check whether rules grant any access at all to `resource`.
pub fn has_any_access(rules: &[Permission], resource: &str) -> bool {
    can_access(rules, ACTION_WILDCARD, resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn posts_rules() -> Vec<Permission> {
        vec![
            Permission::allow(["list", "show"], "posts"),
            Permission::new(PermissionType::Deny, ActionSet::single("read"), "posts.views"),
        ]
    }

    #[test]
    fn test_posts_scenario() {
        let rules = posts_rules();
        assert!(!can_access(&rules, "read", "posts.views"));
        assert!(can_access(&rules, "list", "posts"));
        assert!(can_access(&rules, "show", "posts"));
        assert!(!can_access(&rules, "delete", "posts"));
    }

    #[test]
    fn test_empty_rules_deny_everything() {
        let rules: Vec<Permission> = Vec::new();
        for action in ["", "*", "list", "show", "create", "edit", "delete"] {
            for resource in ["", "posts", "posts.views", "*"] {
                assert!(!can_access(&rules, action, resource));
            }
        }
    }

    #[test]
    fn test_deny_wins_regardless_of_order() {
        let allow_all = Permission::allow(["*"], "*");
        let allow_edit = Permission::allow(["edit"], "posts");
        let deny_edit = Permission::deny(["edit"], "posts");

        let orders = [
            vec![allow_all.clone(), allow_edit.clone(), deny_edit.clone()],
            vec![deny_edit.clone(), allow_all.clone(), allow_edit.clone()],
            vec![allow_edit.clone(), deny_edit.clone(), allow_all.clone()],
        ];

        for rules in &orders {
            assert!(!can_access(rules, "edit", "posts"));
            assert!(can_access(rules, "show", "posts"));
            assert!(can_access(rules, "edit", "comments"));
        }
    }

    #[test]
    fn test_deny_with_prefix_pattern() {
        let rules = vec![
            Permission::allow(["*"], "posts*"),
            Permission::deny(["*"], "posts.secret*"),
        ];
        assert!(can_access(&rules, "show", "posts"));
        assert!(can_access(&rules, "show", "posts.public"));
        assert!(!can_access(&rules, "show", "posts.secret"));
        assert!(!can_access(&rules, "list", "posts.secret.drafts"));
    }

    #[test]
    fn test_no_match_denies() {
        let rules = vec![Permission::allow(["list"], "posts")];
        assert!(!can_access(&rules, "list", "comments"));
        assert!(!can_access(&rules, "create", "posts"));
    }

    #[test]
    fn test_empty_action_list_never_matches_concrete_action() {
        let rules = vec![Permission::allow(Vec::<String>::new(), "posts")];
        for action in ["list", "show", "create", "edit", "delete"] {
            assert!(!can_access(&rules, action, "posts"));
        }
    }

    #[test]
    fn test_generic_query_matches_on_resource() {
        let rules = vec![Permission::allow(["show"], "posts")];
        assert!(can_access(&rules, "", "posts"));
        assert!(can_access(&rules, "*", "posts"));
        assert!(has_any_access(&rules, "posts"));
        assert!(!has_any_access(&rules, "comments"));
    }

    #[test]
    fn test_actionless_deny_shadows_allows_for_resource() {
        // A deny rule without actions still denies generic queries, so it
        // shadows every allow rule on that resource for "any access" checks.
        let rules = vec![
            Permission::allow(["*"], "posts"),
            Permission::from_object(json!({ "type": "deny", "resource": "posts" }).as_object().unwrap()),
        ];

        assert!(!can_access(&rules, "", "posts"));
        assert!(!can_access(&rules, "*", "posts"));
        assert!(!has_any_access(&rules, "posts"));

        // Concrete actions are not matched by the empty deny.
        assert!(can_access(&rules, "list", "posts"));
    }

    #[test]
    fn test_permission_type_parse() {
        assert_eq!(PermissionType::parse("deny"), PermissionType::Deny);
        assert_eq!(PermissionType::parse("allow"), PermissionType::Allow);
        assert_eq!(PermissionType::parse("DENY"), PermissionType::Allow);
        assert_eq!(PermissionType::parse("forbid"), PermissionType::Allow);
        assert_eq!(PermissionType::default(), PermissionType::Allow);
    }

    #[test]
    fn test_permission_from_object() {
        let object = json!({ "type": "deny", "action": ["edit", "delete"], "resource": "posts" });
        let rule = Permission::from_object(object.as_object().unwrap());
        assert!(rule.is_deny());
        assert_eq!(rule.resource, "posts");
        assert_eq!(rule.action.len(), 2);

        let object = json!({ "type": 1, "action": "show", "resource": ["posts"] });
        let rule = Permission::from_object(object.as_object().unwrap());
        assert!(!rule.is_deny());
        assert_eq!(rule.resource, "");
        assert_eq!(rule.action, ActionSet::single("show"));
    }

    #[test]
    fn test_deserialize_matches_from_object() {
        let value = json!({ "type": "DENY", "action": ["list", 3], "resource": "posts" });

        let from_object = Permission::from_object(value.as_object().unwrap());
        let deserialized: Permission = serde_json::from_value(value).unwrap();

        assert_eq!(deserialized, from_object);
        assert_eq!(deserialized.permission_type, PermissionType::Allow);
        assert_eq!(deserialized.action, ActionSet::single("list"));
        assert_eq!(deserialized.resource, "posts");
    }

    #[test]
    fn test_deserialize_rejects_non_objects() {
        assert!(serde_json::from_value::<Permission>(json!(["posts"])).is_err());
        assert!(serde_json::from_value::<Permission>(json!("posts")).is_err());
    }

    #[test]
    fn test_permission_serde_shape() {
        let rule: Permission =
            serde_json::from_value(json!({ "action": "show", "resource": "posts" })).unwrap();
        assert_eq!(rule.permission_type, PermissionType::Allow);
        assert_eq!(rule.action, ActionSet::single("show"));

        let value = serde_json::to_value(Permission::deny(["edit"], "posts")).unwrap();
        assert_eq!(value, json!({ "type": "deny", "action": ["edit"], "resource": "posts" }));
    }
}
