//! blogforge - Build core for a static blog
//!
//! Validates and collects post tags against a closed allow-list, and turns
//! flat comment records into rendered two-level comment threads.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::BlogError;
