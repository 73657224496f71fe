//! Session authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::domain::entities::Session;
use crate::error::AppError;
use crate::AppState;

/// Extract the access token from the Authorization header
fn extract_bearer(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware
///
/// Verifies the bearer token and injects the `Session` into request
/// extensions. Routes that act on behalf of a reader sit behind this.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(&request).ok_or(AppError::Unauthorized)?;

    let user_id = state
        .sessions
        .verify(token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    tracing::debug!(user_id = %user_id, "Session verified");
    request.extensions_mut().insert(Session { user_id });

    Ok(next.run(request).await)
}
