//! Post domain entity
//!
//! A post as stored in the `Posts` collection, and the decorated form the
//! feed resolver hands back to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient_timestamp, opaque_id, optional_opaque_id, TagId, UserId};
use crate::domain::image::first_image_locator;

/// Unique identifier for a post
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(#[serde(deserialize_with = "opaque_id")] pub String);

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A post record as returned by the backend
///
/// `image_urls` is kept raw: legacy rows hold a single URL string, newer rows
/// hold an array or a JSON-encoded array string.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_urls: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "optional_opaque_id")]
    pub author_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn author(&self) -> Option<UserId> {
        self.author_id.clone().map(UserId)
    }

    /// Decorate without author attribution
    pub fn decorate(self) -> DecoratedPost {
        let image_locator = first_image_locator(self.image_urls.as_ref());
        let author_id = self.author();
        DecoratedPost {
            id: self.id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image_locator,
            author_id,
            author_display_name: None,
            created_at: self.created_at,
        }
    }
}

/// A post ready for display: normalized image, optional author name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecoratedPost {
    pub id: PostId,
    pub title: String,
    pub description: String,
    /// First usable image locator; `None` means "no image"
    pub image_locator: Option<String>,
    pub author_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_display_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Data needed to create a new post
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tag_id: Option<TagId>,
}

impl NewPost {
    /// Names of required fields that are blank or missing
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.image_url.trim().is_empty() {
            missing.push("image_url");
        }
        if self.tag_id.is_none() {
            missing.push("tag_id");
        }
        missing
    }
}
