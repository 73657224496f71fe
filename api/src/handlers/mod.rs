//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod feed;
pub mod posts;
pub mod profile;
pub mod tags;

pub use feed::{get_personalised_feed, get_tag_feed};
pub use posts::{create_post, get_post, list_bookmarks, list_my_posts, list_posts};
pub use profile::get_me;
pub use tags::list_tags;
