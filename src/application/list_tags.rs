//! List tags use case

use crate::domain::tags::TagCollector;
use crate::domain::Audience;
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, SiteRepository};
use log::info;

/// Service for listing the validated tags of one audience.
pub struct ListTagsService {
    repository: FileSystemRepository,
}

impl ListTagsService {
    /// Create a new list tags service.
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    /// Validate every post of `audience` and return its sorted display tags.
    pub fn execute(&self, audience: Audience) -> Result<Vec<String>> {
        let config = self.repository.load_config()?;
        let policy = config.tag_policy();
        let posts = self.repository.load_posts(&config)?;

        let tags = TagCollector::collect(&policy, &posts, |post| audience.matches(post))?;
        info!("Collected {} {} tags", tags.len(), audience);
        Ok(tags)
    }
}
