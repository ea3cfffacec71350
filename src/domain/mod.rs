//! Domain layer - Business logic and domain models

pub mod comments;
pub mod navigation;
pub mod post;
pub mod tags;

pub use post::{Audience, Post};
