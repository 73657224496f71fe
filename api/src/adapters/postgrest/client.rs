//! PostgREST client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;

use super::query_string::encode_query;
use crate::domain::entities::UserId;
use crate::domain::ports::{Collection, Query, QueryClient, SessionVerifier};
use crate::error::StoreError;

/// Client for the hosted backend's REST and auth endpoints
pub struct PostgrestClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, StoreError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn table_url(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection.table_name())
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    /// Table requests carry the project key both as `apikey` and as bearer
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            serde_json::from_slice(&body).map_err(StoreError::from)
        } else if status.as_u16() == 401 {
            Err(StoreError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(StoreError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(StoreError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[derive(Deserialize)]
struct AuthUser {
    id: UserId,
}

#[async_trait]
impl QueryClient for PostgrestClient {
    async fn fetch(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        let url = format!(
            "{}?{}",
            self.table_url(query.collection),
            encode_query(query)
        );
        tracing::trace!(%url, "PostgREST fetch");

        let response = self.authorized(self.http.get(&url)).send().await?;
        self.handle_response(response).await
    }

    async fn insert(&self, collection: Collection, record: Value) -> Result<Value, StoreError> {
        let response = self
            .authorized(self.http.post(self.table_url(collection)))
            .header("Prefer", "return=representation")
            .json(&Value::Array(vec![record]))
            .send()
            .await?;

        let mut rows: Vec<Value> = self.handle_response(response).await?;
        if rows.is_empty() {
            return Err(StoreError::Decode(format!(
                "insert into {} returned no rows",
                collection
            )));
        }
        Ok(rows.swap_remove(0))
    }
}

#[async_trait]
impl SessionVerifier for PostgrestClient {
    async fn verify(&self, access_token: &str) -> Result<Option<UserId>, StoreError> {
        let response = self
            .http
            .get(self.auth_url("/user"))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?;

        // Expired or forged tokens are an absent session, not a failure
        if matches!(response.status().as_u16(), 401 | 403) {
            return Ok(None);
        }

        let user: AuthUser = self.handle_response(response).await?;
        Ok(Some(user.id))
    }
}
