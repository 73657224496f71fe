//! Test fixtures
//!
//! Factory functions for creating backend records with sensible defaults,
//! plus a small seeded world most service tests start from.

use serde_json::{json, Value};

use crate::domain::entities::{NewPost, TagId, TagSelection};
use crate::domain::ports::Collection;
use crate::test_utils::InMemoryQueryClient;

/// A `Posts` row with an array-encoded image
pub fn post_record(id: &str, author_id: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Post {}", id),
        "description": format!("Description of {}", id),
        "image_urls": [format!("https://img/{}.png", id)],
        "author_id": author_id,
        "created_at": created_at,
    })
}

/// A `Users` row
pub fn user_record(id: &str, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "created_at": "2023-12-01T09:00:00+00:00",
    })
}

/// A `Tags` row; the id doubles as the name
pub fn tag_record(id: &str) -> Value {
    json!({ "id": id, "name": id })
}

/// A `Post_tags` row
pub fn post_tag_record(post_id: &str, tag_id: &str) -> Value {
    json!({ "post_id": post_id, "tag_id": tag_id })
}

/// A `Post_upvotes` row
pub fn upvote_record(post_id: &str, user_id: &str) -> Value {
    json!({ "post_id": post_id, "user_id": user_id })
}

/// Selection from tag ids
pub fn selection_of(ids: &[&str]) -> TagSelection {
    TagSelection::unchecked(ids.iter().map(|id| TagId::from(*id)))
}

/// A valid post submission
pub fn test_new_post() -> NewPost {
    NewPost {
        title: "Sunset".to_string(),
        description: "Over the bay".to_string(),
        image_url: "https://img/sunset.png".to_string(),
        tag_id: Some(TagId::from("travel")),
    }
}

/// A small world:
///
/// - users `u1` (alice) and `u2` (bob)
/// - `p1` by u1, tagged rust + travel
/// - `p2` by u1, tagged rust, no image
/// - `p3` by u2, tagged travel, image stored as a JSON string
/// - `p4` with no author, no timestamp, untagged
/// - tags `rust`, `travel` and `unused` (no posts)
pub fn seeded_store() -> InMemoryQueryClient {
    let mut p2 = post_record("p2", "u1", "2024-02-01T00:00:00Z");
    p2["image_urls"] = Value::Null;
    let mut p3 = post_record("p3", "u2", "2024-03-01T00:00:00Z");
    p3["image_urls"] = json!("[\"https://img/p3.png\"]");

    InMemoryQueryClient::new()
        .with_record(Collection::Users, user_record("u1", "alice"))
        .with_record(Collection::Users, user_record("u2", "bob"))
        .with_record(
            Collection::Posts,
            post_record("p1", "u1", "2024-01-01T00:00:00Z"),
        )
        .with_record(Collection::Posts, p2)
        .with_record(Collection::Posts, p3)
        .with_record(
            Collection::Posts,
            json!({ "id": "p4", "title": "Post p4", "author_id": null, "created_at": null }),
        )
        .with_record(Collection::Tags, tag_record("rust"))
        .with_record(Collection::Tags, tag_record("travel"))
        .with_record(Collection::Tags, tag_record("unused"))
        .with_record(Collection::PostTags, post_tag_record("p1", "rust"))
        .with_record(Collection::PostTags, post_tag_record("p2", "rust"))
        .with_record(Collection::PostTags, post_tag_record("p1", "travel"))
        .with_record(Collection::PostTags, post_tag_record("p3", "travel"))
}
