//! Domain entities
//!
//! Pure domain models for the records held by the hosted backend.
//! Identifiers are opaque: the backend may hand them out as strings or
//! integers, and both are carried as strings here.

pub mod post;
pub mod tag;
pub mod user;

pub use post::{DecoratedPost, NewPost, Post, PostId};
pub use tag::{PostTag, Tag, TagId, TagSelection, MAX_SELECTED_TAGS};
pub use user::{Bookmark, Profile, Session, User, UserId};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Signed(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
        }
    }
}

/// Deserialize an identifier that may arrive as a JSON string or number
pub(crate) fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Like [`opaque_id`] but tolerates a null or missing reference
pub(crate) fn optional_opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

/// Deserialize a backend timestamp.
///
/// Accepts RFC 3339 (`timestamptz`) and naive `timestamp` values, the latter
/// interpreted as UTC. Null or unparseable values become `None`.
pub(crate) fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_timestamp(&s)))
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
