//! Resource identifiers
//!
//! Every Stormpath resource is addressed by an `href`; its short ID is the last
//! `/`-delimited segment of that locator. [`ResourceId`] is the only way the
//! exporter turns one into the other.

use super::errors::ExportError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical short identifier of a remote resource
///
/// # Examples
///
/// ```
/// use stormpath_export::domain::ids::ResourceId;
///
/// let id = ResourceId::from_href("https://api.stormpath.com/v1/applications/app1").unwrap();
/// assert_eq!(id.as_str(), "app1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a ResourceId from an already-extracted identifier
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ExportError::InvalidResource(
                "Resource ID cannot be empty".to_string(),
            ));
        }
        if id.contains('/') {
            return Err(ExportError::InvalidResource(format!(
                "Resource ID cannot contain '/': {id}"
            )));
        }
        Ok(Self(id))
    }

    /// Resolves the identifier from a resource locator
    ///
    /// Query strings and fragments are ignored, so
    /// `.../accounts/abc?expand=customData` resolves to `abc`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidResource`] when the locator is empty or
    /// its final segment is empty (e.g. a trailing slash).
    pub fn from_href(href: &str) -> Result<Self> {
        let path = href
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .trim();

        if path.is_empty() {
            return Err(ExportError::InvalidResource(
                "Resource has no href".to_string(),
            ));
        }

        let segment = path.rsplit('/').next().unwrap_or_default();
        if segment.is_empty() {
            return Err(ExportError::InvalidResource(format!(
                "Resource href has no identifier segment: {href}"
            )));
        }

        Self::new(segment)
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_href_takes_last_segment() {
        let id = ResourceId::from_href("https://api.stormpath.com/v1/tenants/abc123").unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_from_href_ignores_query() {
        let id =
            ResourceId::from_href("https://api.stormpath.com/v1/accounts/xyz?expand=customData")
                .unwrap();
        assert_eq!(id.as_str(), "xyz");
    }

    #[test]
    fn test_from_href_empty_fails() {
        assert!(matches!(
            ResourceId::from_href(""),
            Err(ExportError::InvalidResource(_))
        ));
        assert!(ResourceId::from_href("   ").is_err());
    }

    #[test]
    fn test_from_href_trailing_slash_fails() {
        assert!(ResourceId::from_href("https://api.stormpath.com/v1/groups/").is_err());
    }

    #[test]
    fn test_from_href_bare_identifier() {
        assert_eq!(ResourceId::from_href("plain").unwrap().as_str(), "plain");
    }

    #[test]
    fn test_new_rejects_slash() {
        assert!(ResourceId::new("a/b").is_err());
        assert!(ResourceId::new("").is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let id: ResourceId = "dir1".parse().unwrap();
        assert_eq!(format!("{id}"), "dir1");
        assert_eq!(id.into_inner(), "dir1");
    }
}
