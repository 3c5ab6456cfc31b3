//! # Actions
//!
//! Semantic REST actions and the sets of action identifiers carried by rules.
//!
//! Requests are mapped to one of five actions derived from the HTTP method and
//! whether the path names a single record. Rules, however, may reference any
//! identifier (`"read"`, `"export"`, ...) so action sets are kept as strings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier matching every action.
pub const ACTION_WILDCARD: &str = "*";

/// Actions derived from REST requests.
///
/// | method         | record id | action   |
/// |----------------|-----------|----------|
/// | `GET`          | no        | `list`   |
/// | `GET`          | yes       | `show`   |
/// | `POST`         | any       | `create` |
/// | `PUT`, `PATCH` | any       | `edit`   |
/// | `DELETE`       | any       | `delete` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Browse a collection.
    List,
    /// Read a single record.
    Show,
    /// Create a record.
    Create,
    /// Modify a record, fully or partially.
    Edit,
    /// Remove a record.
    Delete,
}

impl Action {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Show => "show",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }

    /// Parse action from its string representation.
    ///
    /// # Example
    ///
    /// ```
    /// use rest_rbac::actions::Action;
    ///
    /// assert_eq!(Action::parse("show"), Some(Action::Show));
    /// assert_eq!(Action::parse("read"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "list" => Some(Action::List),
            "show" => Some(Action::Show),
            "create" => Some(Action::Create),
            "edit" => Some(Action::Edit),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }

    /// Get all actions.
    pub fn all() -> Vec<Self> {
        vec![
            Action::List,
            Action::Show,
            Action::Create,
            Action::Edit,
            Action::Delete,
        ]
    }

    /// Determine the action for an HTTP method.
    ///
    /// Methods are matched exactly, as sent on the wire. Anything outside the
    /// table above (`HEAD`, `OPTIONS`, lowercase spellings...) yields `None`.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `has_identifier` - whether the request path names a single record
    ///
    /// # Example
    ///
    /// ```
    /// use rest_rbac::actions::Action;
    ///
    /// assert_eq!(Action::from_method("GET", false), Some(Action::List));
    /// assert_eq!(Action::from_method("GET", true), Some(Action::Show));
    /// assert_eq!(Action::from_method("HEAD", false), None);
    /// ```
    pub fn from_method(method: &str, has_identifier: bool) -> Option<Self> {
        match method {
            "GET" if has_identifier => Some(Action::Show),
            "GET" => Some(Action::List),
            "POST" => Some(Action::Create),
            "PUT" | "PATCH" => Some(Action::Edit),
            "DELETE" => Some(Action::Delete),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the action name for a request.
///
/// Returns the empty string when the method is unsupported. Callers must
/// reject such requests outright rather than asking the decision engine,
/// since an empty action is treated there as "any action".
pub fn resolve_action(method: &str, has_identifier: bool) -> &'static str {
    Action::from_method(method, has_identifier)
        .map(|action| action.as_str())
        .unwrap_or("")
}

/// The actions a rule applies to.
///
/// Role sources may give a single identifier or a list; both are normalized
/// into this set. `"*"` is stored as a literal member and matches any action.
/// An empty set is valid and matches no concrete action.
///
/// Deserialization goes through [`ActionSet::from_value`], so it never fails
/// on a well-formed JSON value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<String>")]
pub struct ActionSet {
    actions: Vec<String>,
}

impl<'de> Deserialize<'de> for ActionSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}

impl From<ActionSet> for Vec<String> {
    fn from(set: ActionSet) -> Self {
        set.actions
    }
}

impl ActionSet {
    /// Create a set holding one action.
    pub fn single(action: impl Into<String>) -> Self {
        Self {
            actions: vec![action.into()],
        }
    }

    /// Create a set matching every action.
    pub fn any() -> Self {
        Self::single(ACTION_WILDCARD)
    }

    /// Build a set from a loosely typed JSON value.
    ///
    /// Strings become a single-member set; arrays keep their string members
    /// and drop the rest. Any other value yields an empty set.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(action) => Self::single(action.clone()),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Self::default(),
        }
    }

    /// Check whether a requested action is covered by this set.
    ///
    /// An empty or `"*"` request is a generic "any access" query and matches
    /// every set, including an empty one.
    ///
    /// # Example
    ///
    /// ```
    /// use rest_rbac::actions::ActionSet;
    ///
    /// let set: ActionSet = ["list", "show"].into_iter().collect();
    /// assert!(set.matches("list"));
    /// assert!(!set.matches("create"));
    /// ```
    pub fn matches(&self, action: &str) -> bool {
        if action.is_empty() || action == ACTION_WILDCARD {
            return true;
        }
        self.actions
            .iter()
            .any(|candidate| candidate == ACTION_WILDCARD || candidate == action)
    }

    /// Check if the set holds the wildcard.
    pub fn is_any(&self) -> bool {
        self.actions.iter().any(|a| a == ACTION_WILDCARD)
    }

    /// Iterate over the identifiers in source order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(String::as_str)
    }

    /// Number of identifiers.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ActionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            actions: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Action> for ActionSet {
    fn from(action: Action) -> Self {
        Self::single(action.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_action_table() {
        assert_eq!(resolve_action("GET", false), "list");
        assert_eq!(resolve_action("GET", true), "show");
        assert_eq!(resolve_action("POST", false), "create");
        assert_eq!(resolve_action("POST", true), "create");
        assert_eq!(resolve_action("PUT", true), "edit");
        assert_eq!(resolve_action("PATCH", false), "edit");
        assert_eq!(resolve_action("PATCH", true), "edit");
        assert_eq!(resolve_action("DELETE", true), "delete");
        assert_eq!(resolve_action("DELETE", false), "delete");
    }

    #[test]
    fn test_unsupported_methods_resolve_empty() {
        assert_eq!(resolve_action("HEAD", false), "");
        assert_eq!(resolve_action("HEAD", true), "");
        assert_eq!(resolve_action("OPTIONS", false), "");
        assert_eq!(resolve_action("get", false), "");
        assert_eq!(resolve_action("", false), "");
    }

    #[test]
    fn test_action_parse_roundtrip() {
        for action in Action::all() {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
        assert_eq!(Action::parse("read"), None);
        assert_eq!(Action::Edit.to_string(), "edit");
    }

    #[test]
    fn test_action_set_list_matching() {
        let set: ActionSet = ["list", "show"].into_iter().collect();
        assert!(set.matches("list"));
        assert!(set.matches("show"));
        assert!(!set.matches("create"));
        assert!(!set.is_any());
    }

    #[test]
    fn test_action_set_wildcard_matches_everything() {
        let set = ActionSet::any();
        for action in ["list", "show", "create", "edit", "delete", "read"] {
            assert!(set.matches(action));
        }
        assert!(set.is_any());

        let mixed: ActionSet = ["show", "*"].into_iter().collect();
        assert!(mixed.matches("delete"));
    }

    #[test]
    fn test_generic_request_matches_any_set() {
        let empty = ActionSet::default();
        assert!(!empty.matches("list"));
        assert!(empty.matches(""));
        assert!(empty.matches("*"));

        let set = ActionSet::single("show");
        assert!(set.matches(""));
        assert!(set.matches("*"));
    }

    #[test]
    fn test_action_set_from_value() {
        assert_eq!(ActionSet::from_value(&json!("read")), ActionSet::single("read"));
        assert_eq!(
            ActionSet::from_value(&json!(["list", 3, "show", null])),
            ["list", "show"].into_iter().collect::<ActionSet>()
        );
        assert!(ActionSet::from_value(&json!(42)).is_empty());
        assert!(ActionSet::from_value(&json!(null)).is_empty());
        assert!(ActionSet::from_value(&json!([])).is_empty());
    }

    #[test]
    fn test_action_set_deserializes_both_forms() {
        let single: ActionSet = serde_json::from_value(json!("edit")).unwrap();
        assert_eq!(single.iter().collect::<Vec<_>>(), vec!["edit"]);

        let multiple: ActionSet = serde_json::from_value(json!(["list", "show"])).unwrap();
        assert_eq!(multiple.len(), 2);

        assert_eq!(serde_json::to_value(&single).unwrap(), json!(["edit"]));
    }

    #[test]
    fn test_action_set_deserialize_is_lenient() {
        let mixed: ActionSet = serde_json::from_value(json!(["list", 3, null])).unwrap();
        assert_eq!(mixed, ActionSet::single("list"));

        let other: ActionSet = serde_json::from_value(json!({ "list": true })).unwrap();
        assert!(other.is_empty());
    }
}
