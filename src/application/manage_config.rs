//! Config management use case

use crate::error::{BlogError, Result};
use crate::infrastructure::{Config, FileSystemRepository, SiteRepository};
use std::path::PathBuf;

const VALID_KEYS: &str = "posts_dir, comments_dir, allowed_tags, reserved_tags";

/// Service for managing site configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "posts_dir" => Ok(config.posts_dir.display().to_string()),
            "comments_dir" => Ok(config.comments_dir.display().to_string()),
            "allowed_tags" => Ok(config.allowed_tags.join(",")),
            "reserved_tags" => Ok(config.reserved_tags.join(",")),
            _ => Err(BlogError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value. Tag lists are comma separated.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "posts_dir" => config.posts_dir = PathBuf::from(value),
            "comments_dir" => config.comments_dir = PathBuf::from(value),
            "allowed_tags" => config.allowed_tags = split_list(value),
            "reserved_tags" => config.reserved_tags = split_list(value),
            _ => {
                return Err(BlogError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service() -> (TempDir, ConfigService) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::default()).unwrap();
        (temp, ConfigService::new(repo))
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("Systems, C Programming ,,Career"),
            vec!["Systems", "C Programming", "Career"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_set_and_get_allowed_tags() {
        let (_temp, service) = service();
        service.set("allowed_tags", "Rust, Systems").unwrap();
        assert_eq!(service.get("allowed_tags").unwrap(), "Rust,Systems");
        assert_eq!(service.list().unwrap().allowed_tags, vec!["Rust", "Systems"]);
    }

    #[test]
    fn test_set_posts_dir() {
        let (_temp, service) = service();
        service.set("posts_dir", "content/posts").unwrap();
        assert_eq!(service.get("posts_dir").unwrap(), "content/posts");
    }

    #[test]
    fn test_unknown_key() {
        let (_temp, service) = service();
        assert!(service.get("theme").is_err());
        assert!(service.set("theme", "dark").is_err());
    }
}
