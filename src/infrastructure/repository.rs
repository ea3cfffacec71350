//! File system repository

use crate::domain::comments::{index_comments, CommentMap, RawComment};
use crate::domain::post::{sort_by_date, Post};
use crate::error::{BlogError, Result};
use crate::infrastructure::config::{Config, SITE_DIR};
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MARKDOWN_EXTENSION: &str = "md";
const BUNDLE_INDEX: &str = "index.md";

/// Abstract repository for site operations
pub trait SiteRepository {
    /// Get the root directory of this site
    fn root(&self) -> &Path;

    /// Load configuration from .blogforge/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .blogforge/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .blogforge directory exists
    fn is_initialized(&self) -> bool;

    /// Create .blogforge directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of SiteRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover site root by walking up from current directory
    /// First checks BLOGFORGE_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("BLOGFORGE_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_site_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(BlogError::Config(format!(
                    "BLOGFORGE_ROOT is set to '{}' but no .blogforge directory found. \
                    Run 'blogforge init' in that directory or unset BLOGFORGE_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover site root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_site_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(BlogError::NotSiteDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_site_dir(path: &Path) -> bool {
        path.join(SITE_DIR).is_dir()
    }
}

impl SiteRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_site_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let site_dir = self.root.join(SITE_DIR);

        if site_dir.exists() {
            return Err(BlogError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&site_dir)?;
        Ok(())
    }
}

// Content loading (not part of trait - filesystem-specific)
impl FileSystemRepository {
    /// Load every post under the configured posts directory, oldest first.
    ///
    /// `foo.md` has slug `foo`; a bundle `foo/index.md` also has slug `foo`.
    /// Hidden directories are skipped. A missing posts directory means no posts.
    /// Two files resolving to the same slug are rejected.
    pub fn load_posts(&self, config: &Config) -> Result<Vec<Post>> {
        let posts_dir = self.root.join(&config.posts_dir);
        if !posts_dir.is_dir() {
            warn!("Posts directory not found: {}", posts_dir.display());
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(&posts_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || entry
                        .file_name()
                        .to_str()
                        .map_or(true, |name| !name.starts_with('.'))
            });

        let mut posts = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        for entry in walker {
            let entry = entry.map_err(|e| BlogError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(MARKDOWN_EXTENSION) {
                continue;
            }
            let Some(slug) = Self::slug_for(path) else {
                warn!("Skipping post with non UTF-8 name: {}", path.display());
                continue;
            };

            if let Some(first) = seen.get(&slug) {
                return Err(BlogError::DuplicateSlug {
                    slug,
                    first: self.relative(first),
                    second: self.relative(path),
                });
            }
            seen.insert(slug.clone(), path.to_path_buf());

            let contents = fs::read_to_string(path)?;
            posts.push(Post::from_source(&slug, &contents, path)?);
        }

        debug!("Loaded {} posts from {}", posts.len(), posts_dir.display());
        sort_by_date(&mut posts);
        Ok(posts)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    fn slug_for(path: &Path) -> Option<String> {
        let is_bundle = path.file_name().and_then(|n| n.to_str()) == Some(BUNDLE_INDEX);
        let name = if is_bundle {
            path.parent()?.file_name()?
        } else {
            path.file_stem()?
        };
        name.to_str().map(str::to_string)
    }

    /// Load the raw comments stored for a post.
    ///
    /// Comments live in `<comments_dir>/<slug>/*.json`, one entry per file.
    /// Returns `None` when the post has no comment directory.
    pub fn load_comments(&self, config: &Config, slug: &str) -> Result<Option<CommentMap>> {
        let dir = self.root.join(&config.comments_dir).join(slug);
        if !dir.is_dir() {
            return Ok(None);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();

        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            let origin = self.relative(&path).display().to_string();
            let json = fs::read_to_string(&path)?;
            let comment = RawComment::from_json(&origin, &json)?;
            entries.push((origin, comment));
        }

        debug!("Loaded {} comments for '{}'", entries.len(), slug);
        index_comments(entries).map(Some)
    }
}
