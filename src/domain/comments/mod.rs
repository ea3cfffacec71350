//! Comment threads

pub mod markdown;
pub mod raw;
pub mod tree;

pub use raw::{index_comments, CommentMap, RawComment};
pub use tree::{CommentTreeBuilder, RenderedComment};
