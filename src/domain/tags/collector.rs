//! Tag collection - validate, deduplicate, filter and sort tags for one audience

use super::TagPolicy;
use crate::domain::Post;
use crate::error::{BlogError, Result};
use std::collections::BTreeSet;

/// Collects the tags shown on an audience's tag index
pub struct TagCollector;

impl TagCollector {
    /// Collect the display tags of every post accepted by `filter`.
    ///
    /// Fails on the first tag outside the policy; no partial list is returned.
    /// Reserved tags are validated but left out of the result. The result is
    /// sorted and free of duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use blogforge::domain::tags::{TagCollector, TagPolicy};
    /// use blogforge::domain::{Audience, Post};
    ///
    /// let posts = vec![
    ///     Post::new("a", vec!["Systems".to_string(), "posts".to_string()], false),
    ///     Post::new("b", vec!["Career".to_string(), "Systems".to_string()], false),
    /// ];
    ///
    /// let tags = TagCollector::collect(&TagPolicy::default(), &posts, |p| {
    ///     Audience::Regular.matches(p)
    /// })
    /// .unwrap();
    /// assert_eq!(tags, vec!["Career", "Systems"]);
    /// ```
    pub fn collect<F>(policy: &TagPolicy, posts: &[Post], filter: F) -> Result<Vec<String>>
    where
        F: Fn(&Post) -> bool,
    {
        let mut tags = BTreeSet::new();

        for post in posts.iter().filter(|p| filter(p)) {
            for tag in &post.tags {
                if !policy.is_valid(tag) {
                    return Err(BlogError::InvalidTag {
                        tag: tag.clone(),
                        post: post.slug.clone(),
                    });
                }
                tags.insert(tag.as_str());
            }
        }

        Ok(tags
            .into_iter()
            .filter(|tag| !policy.is_reserved(tag))
            .map(str::to_string)
            .collect())
    }
}
