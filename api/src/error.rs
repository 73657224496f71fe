//! Unified error types for the tagfeed API
//!
//! This module defines error types for each layer:
//! - `StoreError`: hosted backend (REST + auth) client errors
//! - `DomainError`: Core business rule violations
//! - `FeedError`: Feed resolution errors, tagged with the failing lookup stage
//! - `AppError`: Application layer errors (wraps the above for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Hosted backend client errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid backend key")]
    Unauthorized,

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}

/// Domain layer errors - pure business rule violations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid tag selection: at most {max} tags may be selected, got {actual}")]
    InvalidSelection { max: usize, actual: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// The lookup a feed resolution was performing when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    /// Tag -> post fan-out over the association collection
    Association,
    /// Batched post record fetch
    Posts,
    /// Batched author display-name fetch
    Authors,
    Bookmarks,
    Tags,
    Profile,
    CreatePost,
    TagPost,
}

impl std::fmt::Display for LookupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LookupStage::Association => "association",
            LookupStage::Posts => "posts",
            LookupStage::Authors => "authors",
            LookupStage::Bookmarks => "bookmarks",
            LookupStage::Tags => "tags",
            LookupStage::Profile => "profile",
            LookupStage::CreatePost => "create_post",
            LookupStage::TagPost => "tag_post",
        };
        write!(f, "{}", name)
    }
}

/// Feed resolution errors
///
/// A resolution either assembles the whole view or fails with one of these;
/// partial results are never returned.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Invalid tag selection: at most {max} tags may be selected, got {actual}")]
    InvalidSelection { max: usize, actual: usize },

    #[error("Lookup failed at {stage} stage: {source}")]
    LookupFailure {
        stage: LookupStage,
        #[source]
        source: StoreError,
    },

    #[error("Resolution cancelled")]
    Cancelled,
}

impl FeedError {
    pub fn lookup(stage: LookupStage, source: StoreError) -> Self {
        FeedError::LookupFailure { stage, source }
    }

    /// The failing stage, if this is a lookup failure
    pub fn stage(&self) -> Option<LookupStage> {
        match self {
            FeedError::LookupFailure { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Feed(#[from] FeedError),

    #[error("Backend error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::InvalidSelection { .. })
            | AppError::Feed(FeedError::InvalidSelection { .. }) => (
                StatusCode::BAD_REQUEST,
                "Invalid tag selection",
                Some(self.to_string()),
            ),
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Feed(FeedError::LookupFailure { stage, source }) => {
                tracing::error!(stage = %stage, "Backend lookup failed: {}", source);
                (
                    StatusCode::BAD_GATEWAY,
                    "Backend lookup failed",
                    Some(stage.to_string()),
                )
            }
            AppError::Feed(FeedError::Cancelled) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Request cancelled",
                None,
            ),
            AppError::Store(e) => {
                tracing::error!("Backend error: {}", e);
                match e {
                    StoreError::RateLimited => {
                        (StatusCode::TOO_MANY_REQUESTS, "Rate limited", None)
                    }
                    _ => (StatusCode::BAD_GATEWAY, "Backend error", None),
                }
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
