#![forbid(unsafe_code)]

//! Static navigation link list.
//!
//! The list is configuration: built once at startup, shared read-only, never
//! recomputed per render. The active link is the one whose path equals the
//! current [`RouteId`] exactly.

use std::sync::Arc;

use crate::error::{ConfigurationError, Result};
use crate::route::RouteId;

/// One entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavLink {
    /// Lower-case display name, e.g. `"services"`.
    pub name: String,
    /// Target route.
    pub path: RouteId,
}

impl NavLink {
    /// Create a link.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<RouteId>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Display label with the first letter of each word upper-cased.
    #[must_use]
    pub fn label(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut at_word_start = true;
        for ch in self.name.chars() {
            if at_word_start && ch.is_alphabetic() {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            at_word_start = ch.is_whitespace();
        }
        out
    }

    /// Whether this link points at `route`.
    #[inline]
    #[must_use]
    pub fn is_active(&self, route: &RouteId) -> bool {
        self.path == *route
    }
}

/// Immutable, ordered navigation link list.
///
/// Cloning shares the underlying list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinks {
    links: Arc<[NavLink]>,
}

impl NavLinks {
    /// Validate and freeze a link list.
    ///
    /// Rejects an empty list and duplicate paths (two links can never both be
    /// active).
    pub fn new(links: impl IntoIterator<Item = NavLink>) -> Result<Self> {
        let links: Vec<NavLink> = links.into_iter().collect();
        if links.is_empty() {
            return Err(ConfigurationError::EmptyNavigation);
        }
        for (i, link) in links.iter().enumerate() {
            if links[..i].iter().any(|prev| prev.path == link.path) {
                return Err(ConfigurationError::DuplicatePath {
                    path: link.path.to_string(),
                });
            }
        }
        Ok(Self {
            links: Arc::from(links),
        })
    }

    /// The portfolio site's links: home, services, resume, work, contact.
    #[must_use]
    pub fn site_default() -> Self {
        let links: Vec<NavLink> = [
            ("home", "/"),
            ("services", "/services"),
            ("resume", "/resume"),
            ("work", "/work"),
            ("contact", "/contact"),
        ]
        .into_iter()
        .map(|(name, path)| NavLink::new(name, path))
        .collect();
        Self {
            links: Arc::from(links),
        }
    }

    /// Links in display order.
    #[must_use]
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Always `false` for a validated list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The link matching `route`, if any.
    #[must_use]
    pub fn active(&self, route: &RouteId) -> Option<&NavLink> {
        self.links.iter().find(|link| link.is_active(route))
    }

    /// Index of the link matching `route`, if any.
    #[must_use]
    pub fn active_index(&self, route: &RouteId) -> Option<usize> {
        self.links.iter().position(|link| link.is_active(route))
    }

    /// Links paired with their active flag for `route`.
    pub fn with_state<'a>(
        &'a self,
        route: &'a RouteId,
    ) -> impl Iterator<Item = (&'a NavLink, bool)> + 'a {
        self.links.iter().map(move |link| (link, link.is_active(route)))
    }
}

impl Default for NavLinks {
    fn default() -> Self {
        Self::site_default()
    }
}
