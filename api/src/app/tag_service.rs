//! Tag catalog service
//!
//! Serves the global tag catalog readers pick from when building a
//! personalised feed.

use std::sync::Arc;

use crate::app::cancel::CancelToken;
use crate::app::feed_service::decode_rows;
use crate::domain::entities::Tag;
use crate::domain::ports::{Collection, Query, QueryClient};
use crate::error::{FeedError, LookupStage};

pub struct TagService<Q>
where
    Q: QueryClient + ?Sized,
{
    store: Arc<Q>,
}

impl<Q> TagService<Q>
where
    Q: QueryClient + ?Sized,
{
    pub fn new(store: Arc<Q>) -> Self {
        Self { store }
    }

    /// Every tag in the catalog, in backend order
    pub async fn list_tags(&self, cancel: &CancelToken) -> Result<Vec<Tag>, FeedError> {
        let query = Query::table(Collection::Tags).select("id,name");
        let rows = cancel
            .run(self.store.fetch(&query))
            .await?
            .map_err(|e| FeedError::lookup(LookupStage::Tags, e))?;

        decode_rows(rows, LookupStage::Tags)
    }
}
