//! Tag system

pub mod collector;
pub mod policy;

// Re-export main types
pub use collector::TagCollector;
pub use policy::{TagPolicy, DEFAULT_ALLOWED_TAGS, DEFAULT_RESERVED_TAGS};
