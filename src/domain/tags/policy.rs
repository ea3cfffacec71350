//! The closed set of tags a post may declare

use std::collections::BTreeSet;

/// Content tags accepted when the site config doesn't list its own
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "Accessibility",
    "Career",
    "C Programming",
    "Compilers",
    "Systems",
    "General Programming",
];

/// Collection markers used by the site generator itself. Always valid, never
/// displayed.
pub const DEFAULT_RESERVED_TAGS: &[&str] = &["all", "nav", "post", "posts"];

/// Allowed content tags plus reserved system tags.
///
/// Built once per build and passed by reference; there is no way to mutate it
/// after construction. Membership is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPolicy {
    allowed: BTreeSet<String>,
    reserved: BTreeSet<String>,
}

impl TagPolicy {
    pub fn new<A, R>(allowed: A, reserved: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            reserved: reserved.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `tag` is either an allowed content tag or a reserved tag
    pub fn is_valid(&self, tag: &str) -> bool {
        self.allowed.contains(tag) || self.reserved.contains(tag)
    }

    pub fn is_reserved(&self, tag: &str) -> bool {
        self.reserved.contains(tag)
    }

    /// A post's tags as shown to readers: reserved tags removed, order kept
    pub fn display_tags<'a>(&self, tags: &'a [String]) -> Vec<&'a str> {
        tags.iter()
            .map(String::as_str)
            .filter(|tag| !self.is_reserved(tag))
            .collect()
    }

    pub fn allowed(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }

    pub fn reserved(&self) -> impl Iterator<Item = &str> {
        self.reserved.iter().map(String::as_str)
    }
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_TAGS.iter().copied(),
            DEFAULT_RESERVED_TAGS.iter().copied(),
        )
    }
}
