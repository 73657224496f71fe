//! Feed service
//!
//! Resolves the post lists shown to readers. The backend can only filter
//! single collections, so the tag -> association -> post join and the author
//! attribution are composed here from batched lookups.
//!
//! Every resolution either assembles the whole view or fails; nothing is
//! cached between calls.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::cancel::CancelToken;
use crate::domain::entities::{
    Bookmark, DecoratedPost, Post, PostId, PostTag, TagSelection, User, UserId, MAX_SELECTED_TAGS,
};
use crate::domain::ports::{Collection, Query, QueryClient};
use crate::error::{FeedError, LookupStage};

/// Ordering applied to a resolved list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedOrder {
    /// Keep whatever order the backend returned
    #[default]
    Store,
    /// Most recent `created_at` first; undated posts last
    #[serde(rename = "newest")]
    NewestFirst,
}

/// Options for the tag-filtered view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagFeedOptions {
    pub order: FeedOrder,
    /// Attribute posts to their authors (costs one extra lookup)
    pub include_authors: bool,
}

/// Both halves of the personalised feed
#[derive(Debug, Clone, Serialize)]
pub struct PersonalisedFeed {
    pub own_posts: Vec<DecoratedPost>,
    pub tag_posts: Vec<DecoratedPost>,
}

/// Service resolving post lists against the backend
pub struct FeedService<Q>
where
    Q: QueryClient + ?Sized,
{
    store: Arc<Q>,
}

impl<Q> FeedService<Q>
where
    Q: QueryClient + ?Sized,
{
    pub fn new(store: Arc<Q>) -> Self {
        Self { store }
    }

    /// Posts written by `user_id`, attributed to the author
    pub async fn own_posts(
        &self,
        user_id: &UserId,
        order: FeedOrder,
        cancel: &CancelToken,
    ) -> Result<Vec<DecoratedPost>, FeedError> {
        let query = Query::table(Collection::Posts).eq("author_id", user_id.0.as_str());
        let posts: Vec<Post> = self.fetch(query, LookupStage::Posts, cancel).await?;

        let decorated = self.attribute(posts, cancel).await?;
        Ok(apply_order(decorated, order))
    }

    /// Deduplicated union of the posts tagged with any selected tag
    pub async fn tag_feed(
        &self,
        selection: &TagSelection,
        options: TagFeedOptions,
        cancel: &CancelToken,
    ) -> Result<Vec<DecoratedPost>, FeedError> {
        if selection.len() > MAX_SELECTED_TAGS {
            return Err(FeedError::InvalidSelection {
                max: MAX_SELECTED_TAGS,
                actual: selection.len(),
            });
        }
        if selection.is_empty() {
            return Ok(Vec::new());
        }

        let query = Query::table(Collection::PostTags)
            .select("post_id,tag_id")
            .is_in("tag_id", selection.ids().iter().map(|id| id.0.clone()));
        let associations: Vec<PostTag> =
            self.fetch(query, LookupStage::Association, cancel).await?;

        let post_ids = unique(associations.into_iter().map(|a| a.post_id));
        if post_ids.is_empty() {
            tracing::debug!(tags = selection.len(), "Tag selection matched no posts");
            return Ok(Vec::new());
        }

        let posts = self.posts_by_ids(&post_ids, cancel).await?;
        let decorated = if options.include_authors {
            self.attribute(posts, cancel).await?
        } else {
            posts.into_iter().map(Post::decorate).collect()
        };

        Ok(apply_order(decorated, options.order))
    }

    /// Every post, attributed to its author
    pub async fn global_feed(
        &self,
        order: FeedOrder,
        cancel: &CancelToken,
    ) -> Result<Vec<DecoratedPost>, FeedError> {
        let query = Query::table(Collection::Posts);
        let posts: Vec<Post> = self.fetch(query, LookupStage::Posts, cancel).await?;

        let decorated = self.attribute(posts, cancel).await?;
        Ok(apply_order(decorated, order))
    }

    /// Posts bookmarked by `user_id`, in backend order
    pub async fn bookmarks(
        &self,
        user_id: &UserId,
        cancel: &CancelToken,
    ) -> Result<Vec<DecoratedPost>, FeedError> {
        let query = Query::table(Collection::PostUpvotes)
            .select("post_id")
            .eq("user_id", user_id.0.as_str());
        let bookmarks: Vec<Bookmark> = self.fetch(query, LookupStage::Bookmarks, cancel).await?;

        let post_ids = unique(bookmarks.into_iter().map(|b| b.post_id));
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let posts = self.posts_by_ids(&post_ids, cancel).await?;
        self.attribute(posts, cancel).await
    }

    /// A single post with its author, if it exists
    pub async fn post_detail(
        &self,
        post_id: &PostId,
        cancel: &CancelToken,
    ) -> Result<Option<DecoratedPost>, FeedError> {
        let query = Query::table(Collection::Posts).eq("id", post_id.0.as_str());
        let posts: Vec<Post> = self.fetch(query, LookupStage::Posts, cancel).await?;

        let Some(post) = posts.into_iter().next() else {
            return Ok(None);
        };
        let mut decorated = self.attribute(vec![post], cancel).await?;
        Ok(decorated.pop())
    }

    /// The reader's own posts and their tag feed, resolved concurrently
    pub async fn personalised_feed(
        &self,
        user_id: &UserId,
        selection: &TagSelection,
        options: TagFeedOptions,
        cancel: &CancelToken,
    ) -> Result<PersonalisedFeed, FeedError> {
        let (own_posts, tag_posts) = tokio::try_join!(
            self.own_posts(user_id, options.order, cancel),
            self.tag_feed(selection, options, cancel),
        )?;

        Ok(PersonalisedFeed {
            own_posts,
            tag_posts,
        })
    }

    /// One batched lookup for an id set
    async fn posts_by_ids(
        &self,
        post_ids: &[PostId],
        cancel: &CancelToken,
    ) -> Result<Vec<Post>, FeedError> {
        let query = Query::table(Collection::Posts)
            .is_in("id", post_ids.iter().map(|id| id.0.clone()));
        self.fetch(query, LookupStage::Posts, cancel).await
    }

    /// Decorate posts, resolving author display names in one lookup
    async fn attribute(
        &self,
        posts: Vec<Post>,
        cancel: &CancelToken,
    ) -> Result<Vec<DecoratedPost>, FeedError> {
        let author_ids = unique(posts.iter().filter_map(Post::author));

        let names: HashMap<UserId, String> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            let query = Query::table(Collection::Users)
                .select("id,username")
                .is_in("id", author_ids.iter().map(|id| id.0.clone()));
            let users: Vec<User> = self.fetch(query, LookupStage::Authors, cancel).await?;
            users
                .into_iter()
                .filter_map(|u| u.username.map(|name| (u.id, name)))
                .collect()
        };

        Ok(posts
            .into_iter()
            .map(|post| {
                let name = post.author().and_then(|id| names.get(&id).cloned());
                let mut decorated = post.decorate();
                decorated.author_display_name = name;
                decorated
            })
            .collect())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        query: Query,
        stage: LookupStage,
        cancel: &CancelToken,
    ) -> Result<Vec<T>, FeedError> {
        tracing::debug!(
            stage = %stage,
            collection = %query.collection,
            filters = query.filters.len(),
            "Issuing lookup"
        );

        let rows = cancel
            .run(self.store.fetch(&query))
            .await?
            .map_err(|e| FeedError::lookup(stage, e))?;

        decode_rows(rows, stage)
    }
}

pub(crate) fn decode_rows<T: DeserializeOwned>(
    rows: Vec<Value>,
    stage: LookupStage,
) -> Result<Vec<T>, FeedError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| FeedError::lookup(stage, e.into())))
        .collect()
}

/// Distinct items in first-seen order
fn unique<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn apply_order(mut posts: Vec<DecoratedPost>, order: FeedOrder) -> Vec<DecoratedPost> {
    if order == FeedOrder::NewestFirst {
        // Stable: equal timestamps keep backend order
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
    posts
}
