//! Site data use case
//!
//! Produces everything the page templates need from this crate in one pass:
//! the tag index for each audience and, for every post, its display tags,
//! neighbours and comment thread.

use crate::domain::comments::{CommentMap, CommentTreeBuilder, RenderedComment};
use crate::domain::navigation::{next_post, previous_post};
use crate::domain::tags::{TagCollector, TagPolicy};
use crate::domain::{Audience, Post};
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, SiteRepository};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Navigation and per-post render data for the whole site
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData {
    /// Tags of regular posts
    pub tag_list: Vec<String>,

    /// Tags of "Today I Learned" posts
    pub til_tag_list: Vec<String>,

    pub posts: Vec<PostContext>,
}

/// Render context attached to a single post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostContext {
    pub slug: String,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub is_today_learned: bool,

    /// Declared tags without reserved ones
    pub tags: Vec<String>,

    /// Slug of the previous post of the same audience
    pub previous: Option<String>,

    /// Slug of the next post of the same audience
    pub next: Option<String>,

    /// Comment thread, oldest top-level comment first
    pub staticman_entries: Vec<RenderedComment>,
}

impl SiteData {
    /// Assemble site data from posts in display order. `comments_for` is
    /// asked once per post for its raw comments.
    pub fn assemble<F>(policy: &TagPolicy, posts: &[Post], mut comments_for: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<Option<CommentMap>>,
    {
        let tag_list = TagCollector::collect(policy, posts, |p| Audience::Regular.matches(p))?;
        let til_tag_list =
            TagCollector::collect(policy, posts, |p| Audience::TodayLearned.matches(p))?;

        let mut contexts = Vec::with_capacity(posts.len());
        for post in posts {
            let audience = post.audience();
            let raw = comments_for(&post.slug)?;

            contexts.push(PostContext {
                slug: post.slug.clone(),
                title: post.title.clone(),
                date: post.date,
                is_today_learned: post.is_today_learned,
                tags: policy
                    .display_tags(&post.tags)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                previous: previous_post(posts, &post.slug, audience).map(|p| p.slug.clone()),
                next: next_post(posts, &post.slug, audience).map(|p| p.slug.clone()),
                staticman_entries: CommentTreeBuilder::build(raw.as_ref())?,
            });
        }

        Ok(SiteData {
            tag_list,
            til_tag_list,
            posts: contexts,
        })
    }
}

/// Service for building the site data file
pub struct SiteDataService {
    repository: FileSystemRepository,
}

impl SiteDataService {
    /// Create new site data service
    pub fn new(repository: FileSystemRepository) -> Self {
        SiteDataService { repository }
    }

    /// Load posts and comments and assemble the site data
    pub fn build(&self) -> Result<SiteData> {
        let config = self.repository.load_config()?;
        let policy = config.tag_policy();
        let posts = self.repository.load_posts(&config)?;

        let data = SiteData::assemble(&policy, &posts, |slug| {
            self.repository.load_comments(&config, slug)
        })?;

        info!(
            "Built site data: {} posts, {} tags, {} TIL tags",
            data.posts.len(),
            data.tag_list.len(),
            data.til_tag_list.len()
        );
        Ok(data)
    }

    /// Write site data as pretty JSON. Relative paths are resolved against
    /// the site root. Returns the path written.
    pub fn write(&self, data: &SiteData, output: &Path) -> Result<PathBuf> {
        let output_path = if output.is_absolute() {
            output.to_path_buf()
        } else {
            self.repository.root().join(output)
        };

        if let Some(parent) = output_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&output_path, serde_json::to_string_pretty(data)?)?;
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comments::RawComment;
    use crate::error::BlogError;

    fn post(slug: &str, tags: &[&str], til: bool) -> Post {
        Post::new(slug, tags.iter().map(|t| t.to_string()).collect(), til)
    }

    fn posts() -> Vec<Post> {
        vec![
            post("first", &["posts", "Systems"], false),
            post("til-one", &["Compilers"], true),
            post("second", &["Career"], false),
        ]
    }

    #[test]
    fn test_assemble_tag_lists() {
        let data = SiteData::assemble(&TagPolicy::default(), &posts(), |_| Ok(None)).unwrap();
        assert_eq!(data.tag_list, vec!["Career", "Systems"]);
        assert_eq!(data.til_tag_list, vec!["Compilers"]);
    }

    #[test]
    fn test_assemble_post_context() {
        let data = SiteData::assemble(&TagPolicy::default(), &posts(), |_| Ok(None)).unwrap();

        let first = &data.posts[0];
        assert_eq!(first.tags, vec!["Systems"]);
        assert_eq!(first.previous, None);
        assert_eq!(first.next.as_deref(), Some("second"));
        assert!(first.staticman_entries.is_empty());

        let til = &data.posts[1];
        assert_eq!(til.previous, None);
        assert_eq!(til.next, None);
    }

    #[test]
    fn test_assemble_attaches_comments() {
        let data = SiteData::assemble(&TagPolicy::default(), &posts(), |slug| {
            if slug != "second" {
                return Ok(None);
            }
            let mut map = CommentMap::new();
            map.insert("c1".to_string(), RawComment::new("c1", None, "hi", 100.0));
            Ok(Some(map))
        })
        .unwrap();

        assert!(data.posts[0].staticman_entries.is_empty());
        assert_eq!(data.posts[2].staticman_entries[0].id, "c1");
    }

    #[test]
    fn test_assemble_invalid_tag_aborts() {
        let mut posts = posts();
        posts.push(post("bad", &["Systems", "not-a-real-tag"], true));

        match SiteData::assemble(&TagPolicy::default(), &posts, |_| Ok(None)).unwrap_err() {
            BlogError::InvalidTag { tag, .. } => assert_eq!(tag, "not-a-real-tag"),
            other => panic!("Expected InvalidTag, got {:?}", other),
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let data = SiteData::assemble(&TagPolicy::default(), &posts(), |_| Ok(None)).unwrap();
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("tagList").is_some());
        assert!(json.get("tilTagList").is_some());
        assert_eq!(json["posts"][1]["isTodayLearned"], true);
        assert!(json["posts"][0]["staticmanEntries"].is_array());
    }
}
