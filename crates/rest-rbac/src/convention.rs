//! # Request Conventions
//!
//! A convention turns an HTTP method and path into the resource, record
//! identifier and action that the decision engine reasons about.
//!
//! [`RestConvention`] implements the usual collection/record layout:
//!
//! ```text
//! GET    /posts        -> resource "posts", action "list"
//! GET    /posts/1      -> resource "posts", id "1", action "show"
//! POST   /posts        -> resource "posts", action "create"
//! PATCH  /posts/1      -> resource "posts", id "1", action "edit"
//! GET    /posts/1/tags -> resource "posts", id "1", action "show"
//! GET    /             -> unprotected
//! ```
//!
//! Hosts with other layouts implement [`RequestConvention`] themselves.

use crate::actions::Action;

/// Segments of a request path relevant to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegments<'a> {
    /// First non-empty segment.
    pub resource: &'a str,
    /// Second non-empty segment, if any.
    pub identifier: Option<&'a str>,
}

impl<'a> PathSegments<'a> {
    /// Split a path into resource and identifier.
    ///
    /// Empty segments are skipped, so `//posts/` and `/posts` are the same.
    /// Segments after the identifier are ignored. Returns `None` when the path
    /// has no segments at all.
    ///
    /// # Example
    ///
    /// ```
    /// use rest_rbac::convention::PathSegments;
    ///
    /// let segments = PathSegments::parse("/posts/1/comments").unwrap();
    /// assert_eq!(segments.resource, "posts");
    /// assert_eq!(segments.identifier, Some("1"));
    ///
    /// assert!(PathSegments::parse("/").is_none());
    /// ```
    pub fn parse(path: &'a str) -> Option<Self> {
        let mut parts = path.split('/').filter(|part| !part.is_empty());
        let resource = parts.next()?;
        Some(Self {
            resource,
            identifier: parts.next(),
        })
    }

    /// Check if the path names a single record.
    pub fn has_identifier(&self) -> bool {
        self.identifier.is_some()
    }
}

/// Extract the resource name from a path, or `""` when there is none.
pub fn extract_resource(path: &str) -> &str {
    PathSegments::parse(path).map_or("", |segments| segments.resource)
}

/// Extract the record identifier from a path, or `""` when there is none.
pub fn extract_identifier(path: &str) -> &str {
    PathSegments::parse(path)
        .and_then(|segments| segments.identifier)
        .unwrap_or("")
}

/// What a request targets, as seen by a convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    /// The request does not address a protected resource; skip authorization.
    Unprotected,
    /// The request addresses a resource but no action could be determined.
    /// Reject without consulting the decision engine.
    Unsupported {
        /// Resource name.
        resource: String,
        /// Record identifier, if the path names one.
        identifier: Option<String>,
    },
    /// The request must be authorized for `action` on `resource`.
    Protected {
        /// Resource name.
        resource: String,
        /// Record identifier, if the path names one.
        identifier: Option<String>,
        /// Action name.
        action: String,
    },
}

/// Maps a request's method and path to an authorization target.
pub trait RequestConvention: Send + Sync {
    /// Resolve the target of a request.
    fn resolve(&self, method: &str, path: &str) -> RequestTarget;
}

/// Collection/record REST convention.
///
/// The first path segment is the resource, the second the record identifier.
/// The action follows [`Action::from_method`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RestConvention;

impl RequestConvention for RestConvention {
    fn resolve(&self, method: &str, path: &str) -> RequestTarget {
        let Some(segments) = PathSegments::parse(path) else {
            return RequestTarget::Unprotected;
        };

        let resource = segments.resource.to_string();
        let identifier = segments.identifier.map(str::to_string);

        match Action::from_method(method, segments.has_identifier()) {
            Some(action) => RequestTarget::Protected {
                resource,
                identifier,
                action: action.as_str().to_string(),
            },
            None => RequestTarget::Unsupported {
                resource,
                identifier,
            },
        }
    }
}

impl<F> RequestConvention for F
where
    F: Fn(&str, &str) -> RequestTarget + Send + Sync,
{
    fn resolve(&self, method: &str, path: &str) -> RequestTarget {
        self(method, path)
    }
}
