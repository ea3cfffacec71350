//! Site configuration

use crate::domain::tags::{TagPolicy, DEFAULT_ALLOWED_TAGS, DEFAULT_RESERVED_TAGS};
use crate::error::{BlogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the marker directory holding the site configuration
pub const SITE_DIR: &str = ".blogforge";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Post sources, relative to the site root
    pub posts_dir: PathBuf,

    /// Comment entries, one subdirectory per post slug
    pub comments_dir: PathBuf,

    pub allowed_tags: Vec<String>,

    pub reserved_tags: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            posts_dir: PathBuf::from("src/posts"),
            comments_dir: PathBuf::from("src/_data/comments"),
            allowed_tags: DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
            reserved_tags: DEFAULT_RESERVED_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load config from .blogforge/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(SITE_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BlogError::NotSiteDirectory(path.to_path_buf())
            } else {
                BlogError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| BlogError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .blogforge/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let site_dir = path.join(SITE_DIR);
        let config_path = site_dir.join("config.toml");

        if !site_dir.exists() {
            fs::create_dir(&site_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| BlogError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// The tag policy for this site. Built once and handed to every tag check.
    pub fn tag_policy(&self) -> TagPolicy {
        TagPolicy::new(self.allowed_tags.iter().cloned(), self.reserved_tags.iter().cloned())
    }
}
