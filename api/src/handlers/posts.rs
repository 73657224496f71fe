//! Post handlers
//!
//! Catalog listing, single-post detail, and the reader's own lists.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::app::{CancelToken, FeedOrder};
use crate::domain::entities::{DecoratedPost, NewPost, PostId, Session};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for ordered listings
#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub order: Option<FeedOrder>,
}

/// GET /posts
///
/// Every post, newest first unless `order=store`.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<DecoratedPost>>, AppError> {
    let cancel = CancelToken::new();
    let _guard = cancel.drop_guard();

    let order = query.order.unwrap_or(FeedOrder::NewestFirst);
    let posts = state.feed_service.global_feed(order, &cancel).await?;
    Ok(Json(posts))
}

/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DecoratedPost>, AppError> {
    let cancel = CancelToken::new();
    let _guard = cancel.drop_guard();

    let post_id = PostId(id);
    let post = state
        .feed_service
        .post_detail(&post_id, &cancel)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

    Ok(Json(post))
}

/// POST /posts
///
/// Create a post authored by the signed-in reader.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(body): Json<NewPost>,
) -> Result<(StatusCode, Json<DecoratedPost>), AppError> {
    let cancel = CancelToken::new();
    let _guard = cancel.drop_guard();

    let post = state
        .post_service
        .create_post(&session.user_id, body, &cancel)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /me/posts
pub async fn list_my_posts(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<DecoratedPost>>, AppError> {
    let cancel = CancelToken::new();
    let _guard = cancel.drop_guard();

    let posts = state
        .feed_service
        .own_posts(&session.user_id, query.order.unwrap_or_default(), &cancel)
        .await?;
    Ok(Json(posts))
}

/// GET /me/bookmarks
pub async fn list_bookmarks(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<DecoratedPost>>, AppError> {
    let cancel = CancelToken::new();
    let _guard = cancel.drop_guard();

    let posts = state
        .feed_service
        .bookmarks(&session.user_id, &cancel)
        .await?;
    Ok(Json(posts))
}
