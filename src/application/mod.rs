//! Application layer - Use cases and orchestration

pub mod comment_thread;
pub mod init;
pub mod list_tags;
pub mod manage_config;
pub mod site_data;

pub use comment_thread::CommentThreadService;
pub use list_tags::ListTagsService;
pub use manage_config::ConfigService;
pub use site_data::{PostContext, SiteData, SiteDataService};
