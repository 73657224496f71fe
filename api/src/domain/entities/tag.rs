//! Tag domain entities
//!
//! Tags are a global, read-only catalog. Posts link to tags through the
//! `Post_tags` association collection.

use serde::{Deserialize, Serialize};

use super::{opaque_id, PostId};
use crate::error::DomainError;

/// Most tags a reader may select for a personalised feed at once
pub const MAX_SELECTED_TAGS: usize = 5;

/// Unique identifier for a tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(#[serde(deserialize_with = "opaque_id")] pub String);

impl From<&str> for TagId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// One row of the post/tag association
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostTag {
    pub post_id: PostId,
    pub tag_id: TagId,
}

/// A reader's tag selection: distinct tag ids in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    ids: Vec<TagId>,
}

impl TagSelection {
    /// Build a selection, collapsing duplicates.
    ///
    /// Fails with `InvalidSelection` when more than [`MAX_SELECTED_TAGS`]
    /// distinct tags are given.
    pub fn new<I>(ids: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = TagId>,
    {
        let selection = Self::unchecked(ids);
        if selection.len() > MAX_SELECTED_TAGS {
            return Err(DomainError::InvalidSelection {
                max: MAX_SELECTED_TAGS,
                actual: selection.len(),
            });
        }
        Ok(selection)
    }

    /// Build a selection without the size bound; the resolver re-checks it
    pub fn unchecked<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = TagId>,
    {
        let mut selection = Self::default();
        for id in ids {
            if !selection.ids.contains(&id) {
                selection.ids.push(id);
            }
        }
        selection
    }

    /// Select or deselect a tag.
    ///
    /// Deselecting always succeeds; selecting only succeeds while fewer than
    /// [`MAX_SELECTED_TAGS`] are selected. Returns whether anything changed.
    pub fn toggle(&mut self, id: TagId) -> bool {
        if let Some(pos) = self.ids.iter().position(|t| *t == id) {
            self.ids.remove(pos);
            true
        } else if self.ids.len() < MAX_SELECTED_TAGS {
            self.ids.push(id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: &TagId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[TagId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
