//! Post authoring service
//!
//! Creates a post and links it to exactly one catalog tag. The two inserts
//! are not transactional: if tagging fails the post stays untagged.

use std::sync::Arc;

use serde_json::json;

use crate::app::cancel::CancelToken;
use crate::domain::entities::{DecoratedPost, NewPost, Post, UserId};
use crate::domain::ports::{Collection, QueryClient};
use crate::error::{AppError, DomainError, FeedError, LookupStage};

pub struct PostService<Q>
where
    Q: QueryClient + ?Sized,
{
    store: Arc<Q>,
}

impl<Q> PostService<Q>
where
    Q: QueryClient + ?Sized,
{
    pub fn new(store: Arc<Q>) -> Self {
        Self { store }
    }

    /// Create a post authored by `author`
    pub async fn create_post(
        &self,
        author: &UserId,
        new_post: NewPost,
        cancel: &CancelToken,
    ) -> Result<DecoratedPost, AppError> {
        let missing = new_post.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))
            .into());
        }
        let tag_id = new_post
            .tag_id
            .ok_or_else(|| DomainError::Validation("missing required fields: tag_id".into()))?;

        let record = json!({
            "title": new_post.title.trim(),
            "description": new_post.description.trim(),
            "image_urls": [new_post.image_url.trim()],
            "author_id": author.0,
        });
        let stored = cancel
            .run(self.store.insert(Collection::Posts, record))
            .await?
            .map_err(|e| FeedError::lookup(LookupStage::CreatePost, e))?;
        let post: Post = serde_json::from_value(stored)
            .map_err(|e| FeedError::lookup(LookupStage::CreatePost, e.into()))?;

        let link = json!({
            "post_id": post.id.0,
            "tag_id": tag_id.0,
        });
        if let Err(e) = cancel.run(self.store.insert(Collection::PostTags, link)).await? {
            tracing::warn!(post_id = %post.id, tag_id = %tag_id, "Post created but tagging failed");
            return Err(FeedError::lookup(LookupStage::TagPost, e).into());
        }

        tracing::info!(post_id = %post.id, author = %author, tag_id = %tag_id, "Post created");
        Ok(post.decorate())
    }
}
