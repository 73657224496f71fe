//! Tag catalog handlers

use axum::{extract::State, Json};

use crate::app::CancelToken;
use crate::domain::entities::Tag;
use crate::error::AppError;
use crate::AppState;

/// GET /tags
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, AppError> {
    let cancel = CancelToken::new();
    let _guard = cancel.drop_guard();

    let tags = state.tag_service.list_tags(&cancel).await?;
    Ok(Json(tags))
}
