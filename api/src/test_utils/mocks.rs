//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::domain::entities::UserId;
use crate::domain::ports::{Collection, Filter, Query, QueryClient, SessionVerifier};
use crate::error::StoreError;

// ============================================================================
// In-Memory Query Client
// ============================================================================

#[derive(Default)]
pub struct InMemoryQueryClient {
    records: Arc<RwLock<HashMap<Collection, Vec<Value>>>>,
    fetches: Arc<RwLock<Vec<Query>>>,
    inserts: Arc<RwLock<Vec<Collection>>>,
    failing: Arc<RwLock<HashSet<Collection>>>,
}

impl InMemoryQueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a collection with a record
    pub fn with_record(self, collection: Collection, record: Value) -> Self {
        self.records
            .write()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(record);
        self
    }

    /// Make every call against `collection` fail
    pub fn failing_on(self, collection: Collection) -> Self {
        self.failing.write().unwrap().insert(collection);
        self
    }

    /// Number of fetches issued against `collection`
    pub fn fetch_count(&self, collection: Collection) -> usize {
        self.fetches
            .read()
            .unwrap()
            .iter()
            .filter(|q| q.collection == collection)
            .count()
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.read().unwrap().len()
    }

    /// Every query issued so far, in order
    pub fn fetches(&self) -> Vec<Query> {
        self.fetches.read().unwrap().clone()
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.read().unwrap().len()
    }

    /// Current contents of a collection
    pub fn records(&self, collection: Collection) -> Vec<Value> {
        self.records
            .read()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check_failing(&self, collection: Collection) -> Result<(), StoreError> {
        if self.failing.read().unwrap().contains(&collection) {
            return Err(StoreError::Api {
                status: 503,
                message: format!("{} unavailable", collection),
            });
        }
        Ok(())
    }
}

/// Render a field the way the backend compares it in filters
fn field_text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches(record: &Value, filter: &Filter) -> bool {
    let actual = field_text(record, filter.field());
    match (filter, actual) {
        (Filter::Eq { value, .. }, Some(actual)) => actual == *value,
        (Filter::In { values, .. }, Some(actual)) => values.contains(&actual),
        (_, None) => false,
    }
}

#[async_trait]
impl QueryClient for InMemoryQueryClient {
    async fn fetch(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        self.fetches.write().unwrap().push(query.clone());
        self.check_failing(query.collection)?;

        let records = self.records.read().unwrap();
        Ok(records
            .get(&query.collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, collection: Collection, record: Value) -> Result<Value, StoreError> {
        self.inserts.write().unwrap().push(collection);
        self.check_failing(collection)?;

        let mut stored = record;
        if let Value::Object(ref mut fields) = stored {
            fields
                .entry("id")
                .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
        }

        self.records
            .write()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }
}

// ============================================================================
// Mock Session Verifier
// ============================================================================

#[derive(Default)]
pub struct MockSessionVerifier {
    tokens: Arc<RwLock<HashMap<String, UserId>>>,
    pub should_fail: Arc<RwLock<bool>>,
}

impl MockSessionVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let verifier = Self::default();
        *verifier.should_fail.write().unwrap() = true;
        verifier
    }

    /// Accept `token` as a session for `user_id`
    pub fn with_token(self, token: &str, user_id: &str) -> Self {
        self.tokens
            .write()
            .unwrap()
            .insert(token.to_string(), UserId::from(user_id));
        self
    }
}

#[async_trait]
impl SessionVerifier for MockSessionVerifier {
    async fn verify(&self, access_token: &str) -> Result<Option<UserId>, StoreError> {
        if *self.should_fail.read().unwrap() {
            return Err(StoreError::Api {
                status: 500,
                message: "auth unavailable".to_string(),
            });
        }
        Ok(self.tokens.read().unwrap().get(access_token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn fetch_applies_eq_and_in_as_strings() {
        let store = InMemoryQueryClient::new()
            .with_record(Collection::Posts, json!({ "id": 1, "author_id": "u1" }))
            .with_record(Collection::Posts, json!({ "id": 2, "author_id": "u2" }))
            .with_record(Collection::Posts, json!({ "id": 3, "author_id": "u1" }));

        let rows = store
            .fetch(
                &Query::table(Collection::Posts)
                    .eq("author_id", "u1")
                    .is_in("id", ["3", "2"]),
            )
            .await
            .unwrap();

        assert_eq!(rows, vec![json!({ "id": 3, "author_id": "u1" })]);
        assert_eq!(store.fetch_count(Collection::Posts), 1);
    }

    #[tokio::test]
    async fn insert_assigns_id() {
        let store = InMemoryQueryClient::new();

        let stored = store
            .insert(Collection::Posts, json!({ "title": "t" }))
            .await
            .unwrap();

        assert!(stored["id"].is_string());
        assert_eq!(store.records(Collection::Posts).len(), 1);
    }

    #[tokio::test]
    async fn failing_collection_still_counts_calls() {
        let store = InMemoryQueryClient::new().failing_on(Collection::Tags);

        let result = store.fetch(&Query::table(Collection::Tags)).await;

        assert!(result.is_err());
        assert_eq!(store.fetch_count(Collection::Tags), 1);
    }
}
