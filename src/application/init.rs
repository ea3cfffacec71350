//! Initialize site use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, SiteRepository};
use std::fs;
use std::path::Path;

/// Initialize a new site at the specified path.
///
/// `allowed_tags` replaces the built-in allow-list when given.
pub fn init(path: &Path, allowed_tags: Option<Vec<String>>) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let mut config = Config::default();
    if let Some(tags) = allowed_tags {
        config.allowed_tags = tags;
    }
    repo.save_config(&config)?;

    println!("Initialized blogforge site at {}", path.display());
    println!("Allowed tags: {}", config.allowed_tags.join(", "));

    Ok(())
}
