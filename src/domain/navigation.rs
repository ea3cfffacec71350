//! Previous/next links between posts of the same audience

use super::post::{Audience, Post};

/// The closest post before `slug` in `posts` that belongs to `audience`.
///
/// `posts` is expected in display order (oldest first). Returns `None` when
/// `slug` is unknown or no earlier post matches.
pub fn previous_post<'a>(posts: &'a [Post], slug: &str, audience: Audience) -> Option<&'a Post> {
    let position = posts.iter().position(|p| p.slug == slug)?;
    posts[..position]
        .iter()
        .rev()
        .find(|p| audience.matches(p))
}

/// The closest post after `slug` in `posts` that belongs to `audience`.
pub fn next_post<'a>(posts: &'a [Post], slug: &str, audience: Audience) -> Option<&'a Post> {
    let position = posts.iter().position(|p| p.slug == slug)?;
    posts[position + 1..].iter().find(|p| audience.matches(p))
}
