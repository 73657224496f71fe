//! Profile service

use std::sync::Arc;

use crate::app::cancel::CancelToken;
use crate::app::feed_service::decode_rows;
use crate::domain::entities::{Profile, UserId};
use crate::domain::ports::{Collection, Query, QueryClient};
use crate::error::{FeedError, LookupStage};

pub struct ProfileService<Q>
where
    Q: QueryClient + ?Sized,
{
    store: Arc<Q>,
}

impl<Q> ProfileService<Q>
where
    Q: QueryClient + ?Sized,
{
    pub fn new(store: Arc<Q>) -> Self {
        Self { store }
    }

    /// Profile details for `user_id`, if the user has a profile row
    pub async fn get_profile(
        &self,
        user_id: &UserId,
        cancel: &CancelToken,
    ) -> Result<Option<Profile>, FeedError> {
        let query = Query::table(Collection::Users)
            .select("id,username,created_at")
            .eq("id", user_id.0.as_str());
        let rows = cancel
            .run(self.store.fetch(&query))
            .await?
            .map_err(|e| FeedError::lookup(LookupStage::Profile, e))?;

        let profiles: Vec<Profile> = decode_rows(rows, LookupStage::Profile)?;
        Ok(profiles.into_iter().next())
    }
}
