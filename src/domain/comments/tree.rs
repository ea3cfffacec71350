//! Comment tree construction
//!
//! Flat comment records are rendered, split into top-level comments and
//! replies, and reassembled into a two-level thread. Top-level comments are
//! ordered oldest first; replies inside a thread newest first.

use super::markdown;
use super::raw::{CommentMap, RawComment};
use crate::error::{BlogError, Result};
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// A comment ready for templates: message rendered to HTML and timestamp
/// resolved. Only top-level comments carry `children`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedComment {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Sanitized HTML
    pub message: String,

    pub date: DateTime<Utc>,

    #[serde(flatten)]
    pub author: BTreeMap<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RenderedComment>>,
}

impl RenderedComment {
    fn from_raw(raw: &RawComment) -> Result<Self> {
        let message = markdown::to_html(&raw.message).map_err(|e| BlogError::Render {
            comment: raw.id.clone(),
            reason: e.to_string(),
        })?;

        let date = raw.datetime().ok_or_else(|| BlogError::MalformedComment {
            origin: raw.id.clone(),
            reason: format!("`date` out of range: {}", raw.date),
        })?;

        Ok(RenderedComment {
            id: raw.id.clone(),
            parent: raw.parent.clone(),
            message,
            date,
            author: raw.author.clone(),
            children: None,
        })
    }
}

pub struct CommentTreeBuilder;

impl CommentTreeBuilder {
    /// Build the comment thread for one post.
    ///
    /// `None` or an empty map yields an empty thread. A reply whose parent is
    /// not a top-level comment (unknown id, or a reply to a reply) is left out
    /// of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use blogforge::domain::comments::{CommentMap, CommentTreeBuilder, RawComment};
    ///
    /// let mut raw = CommentMap::new();
    /// raw.insert("c1".to_string(), RawComment::new("c1", None, "hi", 100.0));
    /// raw.insert("c2".to_string(), RawComment::new("c2", Some("c1"), "reply", 200.0));
    ///
    /// let thread = CommentTreeBuilder::build(Some(&raw)).unwrap();
    /// assert_eq!(thread.len(), 1);
    /// assert_eq!(thread[0].children.as_ref().unwrap()[0].id, "c2");
    /// ```
    pub fn build(raw: Option<&CommentMap>) -> Result<Vec<RenderedComment>> {
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        let rendered = raw
            .values()
            .map(RenderedComment::from_raw)
            .collect::<Result<Vec<_>>>()?;

        let mut top_level: Vec<RenderedComment> = Vec::new();
        let mut orphans: HashMap<String, Vec<RenderedComment>> = HashMap::new();
        for comment in rendered {
            match &comment.parent {
                None => top_level.push(comment),
                Some(parent) => orphans.entry(parent.clone()).or_default().push(comment),
            }
        }

        for comment in &mut top_level {
            if let Some(mut children) = orphans.remove(&comment.id) {
                children.sort_by(newest_first);
                comment.children = Some(children);
            }
        }

        let dropped: usize = orphans.values().map(Vec::len).sum();
        if dropped > 0 {
            debug!(
                "Dropped {} repl{} without a top-level parent",
                dropped,
                if dropped == 1 { "y" } else { "ies" }
            );
        }

        top_level.sort_by(oldest_first);
        Ok(top_level)
    }
}

fn oldest_first(a: &RenderedComment, b: &RenderedComment) -> Ordering {
    a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id))
}

fn newest_first(a: &RenderedComment, b: &RenderedComment) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id))
}
