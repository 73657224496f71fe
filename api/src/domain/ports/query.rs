//! Structured query port
//!
//! The backend is schema-only: it answers equality and set-membership
//! filters over named collections and nothing more. Joins and aggregation
//! happen in the application layer on top of this interface.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Collections held by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Posts,
    Tags,
    PostTags,
    Users,
    PostUpvotes,
}

impl Collection {
    /// Backend table name
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Posts => "Posts",
            Collection::Tags => "Tags",
            Collection::PostTags => "Post_tags",
            Collection::Users => "Users",
            Collection::PostUpvotes => "Post_upvotes",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

/// A filter on a named field. Values are compared as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq { field: String, value: String },
    In { field: String, values: Vec<String> },
}

impl Filter {
    pub fn field(&self) -> &str {
        match self {
            Filter::Eq { field, .. } | Filter::In { field, .. } => field,
        }
    }
}

/// A read against one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub collection: Collection,
    /// Column list to return; `*` for every column
    pub columns: String,
    pub filters: Vec<Filter>,
}

impl Query {
    pub fn table(collection: Collection) -> Self {
        Self {
            collection,
            columns: "*".to_string(),
            filters: Vec::new(),
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn eq(mut self, field: &str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn is_in<I, S>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::In {
            field: field.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// Generic structured-query interface over the backend's collections
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Fetch every record of the collection matching all filters
    async fn fetch(&self, query: &Query) -> Result<Vec<Value>, StoreError>;

    /// Insert one record and return it as stored
    async fn insert(&self, collection: Collection, record: Value) -> Result<Value, StoreError>;
}
