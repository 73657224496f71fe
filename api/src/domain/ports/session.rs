//! Session verification port
//!
//! The backend owns authentication. The API only needs to turn a bearer
//! access token into the identity it was issued for.

use async_trait::async_trait;

use crate::domain::entities::UserId;
use crate::error::StoreError;

/// Resolves access tokens to user identities
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Verify an access token.
    ///
    /// Returns `Ok(None)` when the backend rejects the token.
    async fn verify(&self, access_token: &str) -> Result<Option<UserId>, StoreError>;
}
