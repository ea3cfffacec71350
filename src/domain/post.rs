//! Posts, audiences and front matter parsing

use crate::error::{BlogError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which section of the site a post is listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Audience {
    /// Long-form posts
    #[default]
    Regular,
    /// Short "Today I Learned" posts
    TodayLearned,
}

impl Audience {
    /// Whether a post belongs to this audience
    pub fn matches(&self, post: &Post) -> bool {
        post.audience() == *self
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::Regular => write!(f, "regular"),
            Audience::TodayLearned => write!(f, "today-learned"),
        }
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regular" => Ok(Audience::Regular),
            "today-learned" | "til" => Ok(Audience::TodayLearned),
            _ => Err(format!(
                "Invalid audience: '{}'. Valid audiences are: regular, today-learned",
                s
            )),
        }
    }
}

/// A blog post as seen by the build core. The body is left to the site
/// generator; only front matter is interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Stable identifier derived from the file name
    pub slug: String,

    pub title: String,

    /// Publication date, if the front matter has one
    pub date: Option<NaiveDate>,

    /// Declared tags in front matter order
    pub tags: Vec<String>,

    pub is_today_learned: bool,
}

impl Post {
    pub fn new(slug: impl Into<String>, tags: Vec<String>, is_today_learned: bool) -> Self {
        Self {
            slug: slug.into(),
            title: String::new(),
            date: None,
            tags,
            is_today_learned,
        }
    }

    pub fn audience(&self) -> Audience {
        if self.is_today_learned {
            Audience::TodayLearned
        } else {
            Audience::Regular
        }
    }

    /// Parse a post from its Markdown source.
    ///
    /// Front matter is optional YAML between `---` fences at the very start
    /// of the file. `path` is only used in error messages.
    pub fn from_source(slug: &str, input: &str, path: &Path) -> Result<Self> {
        let front_matter = match front_matter_block(input) {
            FrontMatterBlock::Absent => FrontMatter::default(),
            FrontMatterBlock::Unterminated => {
                return Err(BlogError::FrontMatter {
                    path: path.to_path_buf(),
                    reason: "missing closing `---`".to_string(),
                })
            }
            FrontMatterBlock::Present(yaml) if yaml.trim().is_empty() => FrontMatter::default(),
            FrontMatterBlock::Present(yaml) => {
                serde_yaml::from_str(yaml).map_err(|e| BlogError::FrontMatter {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?
            }
        };

        let date = match front_matter.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_date(raw).ok_or_else(|| BlogError::FrontMatter {
                path: path.to_path_buf(),
                reason: format!("invalid date '{}', expected YYYY-MM-DD", raw),
            })?),
        };

        Ok(Post {
            slug: slug.to_string(),
            title: front_matter.title,
            date,
            tags: front_matter.tags.map(TagField::into_vec).unwrap_or_default(),
            is_today_learned: front_matter.is_today_learned,
        })
    }
}

/// Sort posts oldest first. Undated posts go last; ties break on slug.
pub fn sort_by_date(posts: &mut [Post]) {
    posts.sort_by(|a, b| match (a.date, b.date) {
        (Some(da), Some(db)) => da.cmp(&db).then_with(|| a.slug.cmp(&b.slug)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.slug.cmp(&b.slug),
    });
}

// Accepts `2024-03-01` as well as full timestamps like `2024-03-01T10:00:00Z`.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrontMatter {
    #[serde(default)]
    title: String,

    #[serde(default)]
    date: Option<String>,

    #[serde(default)]
    tags: Option<TagField>,

    #[serde(default)]
    is_today_learned: bool,
}

/// Front matter allows `tags: Systems` as shorthand for a one-element list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagField {
    One(String),
    Many(Vec<String>),
}

impl TagField {
    fn into_vec(self) -> Vec<String> {
        match self {
            TagField::One(tag) => vec![tag],
            TagField::Many(tags) => tags,
        }
    }
}

enum FrontMatterBlock<'a> {
    Absent,
    Unterminated,
    Present(&'a str),
}

fn front_matter_block(input: &str) -> FrontMatterBlock<'_> {
    const FENCE: &str = "---";

    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let Some(rest) = input.strip_prefix(FENCE) else {
        return FrontMatterBlock::Absent;
    };
    let Some(rest) = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
    else {
        return FrontMatterBlock::Absent;
    };

    if rest.starts_with(FENCE) {
        return FrontMatterBlock::Present("");
    }
    match rest.find("\n---") {
        Some(offset) => FrontMatterBlock::Present(&rest[..offset]),
        None => FrontMatterBlock::Unterminated,
    }
}
