//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services compose the backend's single-collection lookups into the views
//! readers see.

pub mod cancel;
pub mod feed_service;
pub mod post_service;
pub mod profile_service;
pub mod tag_service;

pub use cancel::CancelToken;
pub use feed_service::{FeedOrder, FeedService, PersonalisedFeed, TagFeedOptions};
pub use post_service::PostService;
pub use profile_service::ProfileService;
pub use tag_service::TagService;
