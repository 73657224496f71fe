//! Profile handlers

use axum::{extract::State, Extension, Json};

use crate::app::CancelToken;
use crate::domain::entities::{Profile, Session};
use crate::error::AppError;
use crate::AppState;

/// GET /me
///
/// The signed-in reader's profile. A verified session without a `Users`
/// row is a 404.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Profile>, AppError> {
    let cancel = CancelToken::new();
    let _guard = cancel.drop_guard();

    let profile = state
        .profile_service
        .get_profile(&session.user_id, &cancel)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", session.user_id)))?;

    Ok(Json(profile))
}
