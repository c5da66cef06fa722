#![forbid(unsafe_code)]

//! Route identity.
//!
//! A [`RouteId`] is the opaque identifier of the active view, usually a URL
//! path such as `/services`. It is compared by exact, case-sensitive string
//! equality: `/work` and `/work/` are different routes, and so are `/Work`
//! and `/work`. No normalization is applied anywhere in the crate.

use std::fmt;
use std::sync::Arc;

/// Identifier of the currently active view.
///
/// Cloning is cheap (shared immutable string).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RouteId(Arc<str>);

impl RouteId {
    /// Wrap a path.
    #[must_use]
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Arc::from(path.as_ref()))
    }

    /// The site root, `/`.
    #[must_use]
    pub fn root() -> Self {
        Self::new("/")
    }

    /// Borrow the raw path.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({:?})", &*self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RouteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for RouteId {
    fn from(path: String) -> Self {
        Self(Arc::from(path))
    }
}

impl PartialEq<str> for RouteId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for RouteId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_exact() {
        assert_eq!(RouteId::new("/work"), RouteId::from("/work"));
        assert_ne!(RouteId::new("/work"), RouteId::new("/work/"));
        assert_ne!(RouteId::new("/work"), RouteId::new("/Work"));
        assert_ne!(RouteId::new("/work"), RouteId::new("/work?tab=1"));
    }

    #[test]
    fn compares_against_str() {
        let route = RouteId::root();
        assert!(route == "/");
        assert_eq!(route.as_str(), "/");
        assert_eq!(route.to_string(), "/");
    }

    #[test]
    fn clones_share_storage() {
        let a = RouteId::from(String::from("/resume"));
        let b = a.clone();
        assert!(std::ptr::eq(a.as_str(), b.as_str()));
    }

    #[test]
    fn debug_shows_path() {
        assert_eq!(format!("{:?}", RouteId::new("/contact")), "RouteId(\"/contact\")");
    }
}
