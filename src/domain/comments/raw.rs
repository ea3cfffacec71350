//! Raw comment records and their validation at the ingestion boundary

use crate::error::{BlogError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Comments for one post keyed by comment id. Iteration order means nothing.
pub type CommentMap = HashMap<String, RawComment>;

/// A single comment as stored by the comment service, before rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RawComment {
    pub id: String,

    /// Id of the comment this replies to; `None` for top-level comments
    pub parent: Option<String>,

    /// Markdown source as typed by the commenter
    pub message: String,

    /// Seconds since the Unix epoch
    pub date: f64,

    /// Everything else on the record (name, email, ...), kept verbatim
    pub author: BTreeMap<String, Value>,
}

impl RawComment {
    pub fn new(
        id: impl Into<String>,
        parent: Option<&str>,
        message: impl Into<String>,
        date: f64,
    ) -> Self {
        Self {
            id: id.into(),
            parent: parent.map(str::to_string),
            message: message.into(),
            date,
            author: BTreeMap::new(),
        }
    }

    /// The timestamp as a UTC point in time, at millisecond precision.
    /// `None` when the value is not finite or out of range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        if !self.date.is_finite() {
            return None;
        }
        let millis = (self.date * 1000.0).round();
        if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
            return None;
        }
        DateTime::from_timestamp_millis(millis as i64)
    }

    /// Parse and validate one JSON comment entry. `origin` names the entry
    /// (usually its file) in error messages.
    pub fn from_json(origin: &str, json: &str) -> Result<Self> {
        let malformed = |reason: String| BlogError::MalformedComment {
            origin: origin.to_string(),
            reason,
        };

        let record: CommentRecord = serde_json::from_str(json).map_err(|e| malformed(e.to_string()))?;
        let mut author = record.author;

        let id = match record.id {
            Some(id) => id,
            None => match author.remove("id") {
                Some(Value::String(id)) => id,
                _ => return Err(malformed("missing field `_id`".to_string())),
            },
        };
        if id.trim().is_empty() {
            return Err(malformed("empty `_id`".to_string()));
        }

        let message = record
            .message
            .ok_or_else(|| malformed("missing field `message`".to_string()))?;

        let date = match record.date {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
            None => return Err(malformed("missing field `date`".to_string())),
        }
        .ok_or_else(|| malformed("`date` must be seconds since the epoch".to_string()))?;

        let comment = RawComment {
            id,
            parent: record.parent.filter(|p| !p.is_empty()),
            message,
            date,
            author,
        };

        if comment.datetime().is_none() {
            return Err(malformed(format!("`date` out of range: {}", date)));
        }

        Ok(comment)
    }
}

/// Key comments by id. Two entries with the same id are rejected.
pub fn index_comments<I>(entries: I) -> Result<CommentMap>
where
    I: IntoIterator<Item = (String, RawComment)>,
{
    let mut comments = CommentMap::new();

    for (origin, comment) in entries {
        if comments.contains_key(&comment.id) {
            return Err(BlogError::MalformedComment {
                origin,
                reason: format!("duplicate comment id '{}'", comment.id),
            });
        }
        comments.insert(comment.id.clone(), comment);
    }

    Ok(comments)
}

#[derive(Debug, Deserialize)]
struct CommentRecord {
    #[serde(rename = "_id", default)]
    id: Option<String>,

    #[serde(default)]
    parent: Option<String>,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    date: Option<Value>,

    #[serde(flatten)]
    author: BTreeMap<String, Value>,
}
