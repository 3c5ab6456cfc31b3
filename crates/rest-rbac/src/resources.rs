//! # Resource Patterns
//!
//! Rules name the resources they cover with a pattern:
//!
//! ```text
//! "*"          - any resource
//! "posts"      - exactly "posts"
//! "posts.*"    - any resource starting with "posts."
//! ```
//!
//! Only one trailing wildcard is recognized. A `*` anywhere else is compared
//! literally.

/// Marker for "any resource" and, as a suffix, for prefix patterns.
pub const RESOURCE_WILDCARD: &str = "*";

/// Check whether a resource pattern covers a concrete resource.
///
/// # Example
///
/// ```
/// use rest_rbac::resources::matches;
///
/// assert!(matches("*", "anything"));
/// assert!(matches("posts.*", "posts.views"));
/// assert!(!matches("posts.*", "posts"));
/// assert!(!matches("foo", "foobar"));
/// ```
pub fn matches(pattern: &str, resource: &str) -> bool {
    ResourcePattern::parse(pattern).matches(resource)
}

/// Classification of a resource pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourcePattern<'a> {
    /// Matches every resource.
    Any,
    /// Matches resources starting with the prefix.
    Prefix(&'a str),
    /// Matches exactly one resource.
    Exact(&'a str),
}

impl<'a> ResourcePattern<'a> {
    /// Classify a pattern string.
    pub fn parse(pattern: &'a str) -> Self {
        if pattern == RESOURCE_WILDCARD {
            return ResourcePattern::Any;
        }
        match pattern.strip_suffix(RESOURCE_WILDCARD) {
            Some(prefix) => ResourcePattern::Prefix(prefix),
            None => ResourcePattern::Exact(pattern),
        }
    }

    /// Check whether this pattern covers a concrete resource.
    pub fn matches(&self, resource: &str) -> bool {
        match self {
            ResourcePattern::Any => true,
            ResourcePattern::Prefix(prefix) => resource.starts_with(prefix),
            ResourcePattern::Exact(exact) => *exact == resource,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_pattern() {
        assert!(matches("posts.*", "posts.views"));
        assert!(matches("posts.*", "posts.average_note"));
        assert!(matches("posts.*", "posts."));
        assert!(!matches("posts.*", "posts"));
        assert!(!matches("posts.*", "comments.views"));
    }

    #[test]
    fn test_universal_pattern() {
        assert!(matches("*", "posts"));
        assert!(matches("*", "posts.views"));
        assert!(matches("*", ""));
    }

    #[test]
    fn test_exact_pattern() {
        assert!(matches("foo", "foo"));
        assert!(!matches("foo", "foobar"));
        assert!(!matches("foo", "fo"));
        assert!(!matches("foo", ""));
        assert!(matches("", ""));
    }

    #[test]
    fn test_bare_prefix_wildcard() {
        // "posts*" has no separator, so it also covers "postscript".
        assert!(matches("posts*", "posts"));
        assert!(matches("posts*", "postscript"));
    }

    #[test]
    fn test_embedded_wildcard_is_literal() {
        assert!(!matches("po*ts", "posts"));
        assert!(matches("po*ts", "po*ts"));
    }

    #[test]
    fn test_pattern_classification() {
        assert_eq!(ResourcePattern::parse("*"), ResourcePattern::Any);
        assert_eq!(ResourcePattern::parse("posts.*"), ResourcePattern::Prefix("posts."));
        assert_eq!(ResourcePattern::parse("posts"), ResourcePattern::Exact("posts"));
        assert_eq!(ResourcePattern::parse("po*ts"), ResourcePattern::Exact("po*ts"));
    }

    #[test]
    fn test_matches_agrees_with_classification() {
        let resources = ["", "posts", "posts.", "posts.views", "postscript", "po*ts", "posts.*"];
        for pattern in ["*", "posts", "posts.*", "posts*", "po*ts", ""] {
            let parsed = ResourcePattern::parse(pattern);
            for resource in resources {
                assert_eq!(matches(pattern, resource), parsed.matches(resource));
            }
        }

        // A pattern always covers a resource spelled the same way.
        assert!(matches("posts.*", "posts.*"));
        assert!(ResourcePattern::Prefix("posts.").matches("posts.*"));
    }
}
