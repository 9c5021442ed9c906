//! Shared types for pressroom
//!
//! Identifier newtypes used by the article repository and its consumers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Primary lookup key of an article, derived from its source filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(pub String);

impl Slug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Derive a slug from a path-like document identifier.
    ///
    /// The slug is the basename with its last extension removed. Both `/`
    /// and `\` count as separators so bundled and on-disk identifiers
    /// behave the same. Returns `None` when nothing is left.
    ///
    /// ```
    /// use pressroom_types::Slug;
    ///
    /// assert_eq!(Slug::from_path("articles/my-article.md").unwrap().as_str(), "my-article");
    /// assert!(Slug::from_path("articles/").is_none());
    /// ```
    pub fn from_path(path: &str) -> Option<Self> {
        let basename = path.rsplit(['/', '\\']).next().unwrap_or(path);
        let stem = match basename.rfind('.') {
            // Dotfiles keep their name
            Some(0) | None => basename,
            Some(idx) => &basename[..idx],
        };

        if stem.is_empty() {
            None
        } else {
            Some(Self(stem.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Slug {
    fn from(slug: &str) -> Self {
        Slug(slug.to_string())
    }
}

impl Borrow<str> for Slug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Externally supplied article identifier. Uniqueness is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
