//! Comment thread use case

use crate::domain::comments::{CommentTreeBuilder, RenderedComment};
use crate::error::{BlogError, Result};
use crate::infrastructure::{FileSystemRepository, SiteRepository};

/// Service for building the comment thread of a single post
pub struct CommentThreadService {
    repository: FileSystemRepository,
}

impl CommentThreadService {
    /// Create a new comment thread service
    pub fn new(repository: FileSystemRepository) -> Self {
        CommentThreadService { repository }
    }

    /// Build the thread for the post named by `slug`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No post has this slug
    /// - A comment entry is malformed
    /// - A comment fails to render
    pub fn execute(&self, slug: &str) -> Result<Vec<RenderedComment>> {
        let config = self.repository.load_config()?;

        let posts = self.repository.load_posts(&config)?;
        if !posts.iter().any(|p| p.slug == slug) {
            return Err(BlogError::PostNotFound(slug.to_string()));
        }

        let raw = self.repository.load_comments(&config, slug)?;
        CommentTreeBuilder::build(raw.as_ref())
    }
}
