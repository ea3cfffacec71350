//! Error types for blogforge

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for blogforge
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Not a blogforge site: {0}")]
    NotSiteDirectory(PathBuf),

    #[error("Post '{post}' has invalid tag: {tag}")]
    InvalidTag { tag: String, post: String },

    #[error("Failed to render comment '{comment}': {reason}")]
    Render { comment: String, reason: String },

    #[error("Malformed comment in {origin}: {reason}")]
    MalformedComment { origin: String, reason: String },

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Duplicate post slug '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid front matter in {path}: {reason}")]
    FrontMatter { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl BlogError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BlogError::NotSiteDirectory(_) => 2,
            BlogError::InvalidTag { .. } => 3,
            BlogError::Render { .. } => 4,
            BlogError::MalformedComment { .. } => 5,
            BlogError::PostNotFound(_) => 6,
            BlogError::DuplicateSlug { .. } => 7,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            BlogError::NotSiteDirectory(path) => {
                format!(
                    "Not a blogforge site: {}\n\n\
                    Suggestions:\n\
                    • Run 'blogforge init' in your site directory\n\
                    • Navigate to an existing site directory\n\
                    • Set BLOGFORGE_ROOT environment variable to your site path",
                    path.display()
                )
            }
            BlogError::InvalidTag { tag, post } => {
                format!(
                    "Post '{}' has invalid tag: {}\n\n\
                    Suggestions:\n\
                    • Tags are case-sensitive; check the spelling in the front matter\n\
                    • Run 'blogforge config allowed_tags' to see the allowed tags\n\
                    • Add the tag with 'blogforge config allowed_tags \"A,B,{}\"'",
                    post, tag, tag
                )
            }
            BlogError::MalformedComment { origin, reason } => {
                format!(
                    "Malformed comment in {}: {}\n\n\
                    Each comment file needs:\n\
                    • \"_id\": a non-empty string\n\
                    • \"message\": the comment text\n\
                    • \"date\": seconds since the epoch",
                    origin, reason
                )
            }
            BlogError::PostNotFound(slug) => {
                format!(
                    "Post not found: {}\n\n\
                    Suggestions:\n\
                    • The slug is the post's file name without '.md'\n\
                    • For bundles ('<dir>/index.md') the slug is the directory name",
                    slug
                )
            }
            BlogError::DuplicateSlug {
                slug,
                first,
                second,
            } => {
                format!(
                    "Duplicate post slug '{}':\n  {}\n  {}\n\n\
                    Suggestions:\n\
                    • Rename one of the files so every post has its own slug\n\
                    • 'foo.md' and 'foo/index.md' both have slug 'foo'",
                    slug,
                    first.display(),
                    second.display()
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using BlogError
pub type Result<T> = std::result::Result<T, BlogError>;
