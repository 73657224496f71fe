//! Feed handlers
//!
//! Tag-filtered views over the post catalog. Tags arrive as a
//! comma-separated `tags` query parameter.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::app::{CancelToken, FeedOrder, PersonalisedFeed, TagFeedOptions};
use crate::domain::entities::{DecoratedPost, Session, TagId, TagSelection};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for tag-filtered feeds
#[derive(Debug, Default, Deserialize)]
pub struct TagFeedQuery {
    /// Comma-separated tag ids
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub order: Option<FeedOrder>,
    /// Attribute posts to their authors
    #[serde(default)]
    pub authors: Option<bool>,
}

impl TagFeedQuery {
    /// Parse the tag list into a bounded selection
    pub fn selection(&self) -> Result<TagSelection, AppError> {
        let ids = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(TagId::from);
        Ok(TagSelection::new(ids)?)
    }

    pub fn options(&self) -> TagFeedOptions {
        TagFeedOptions {
            order: self.order.unwrap_or_default(),
            include_authors: self.authors.unwrap_or(false),
        }
    }
}

/// GET /feed/tags
///
/// Posts carrying any of the selected tags, each listed once.
pub async fn get_tag_feed(
    State(state): State<AppState>,
    Query(query): Query<TagFeedQuery>,
) -> Result<Json<Vec<DecoratedPost>>, AppError> {
    let selection = query.selection()?;
    let cancel = CancelToken::new();
    let _guard = cancel.drop_guard();

    let posts = state
        .feed_service
        .tag_feed(&selection, query.options(), &cancel)
        .await?;

    Ok(Json(posts))
}

/// GET /me/feed
///
/// The reader's own posts alongside their tag feed.
pub async fn get_personalised_feed(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<TagFeedQuery>,
) -> Result<Json<PersonalisedFeed>, AppError> {
    let selection = query.selection()?;
    let cancel = CancelToken::new();
    let _guard = cancel.drop_guard();

    let feed = state
        .feed_service
        .personalised_feed(&session.user_id, &selection, query.options(), &cancel)
        .await?;

    Ok(Json(feed))
}
