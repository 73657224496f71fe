//! Cooperative cancellation for multi-stage lookups
//!
//! A `CancelToken` is threaded through every stage of a resolution. Once
//! cancelled, the in-flight lookup is abandoned and no further stage is
//! issued. Clones share state.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::FeedError;

#[derive(Clone, Debug)]
pub struct CancelToken {
    state: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            state: Arc::new(tx),
        }
    }

    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolves once the token is cancelled
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this only ends on cancel
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Run `fut` unless the token is cancelled first
    pub async fn run<F, T>(&self, fut: F) -> Result<T, FeedError>
    where
        F: Future<Output = T>,
    {
        if self.is_cancelled() {
            return Err(FeedError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(FeedError::Cancelled),
            out = fut => Ok(out),
        }
    }

    /// Guard that cancels the token when dropped
    pub fn drop_guard(&self) -> CancelOnDrop {
        CancelOnDrop(self.clone())
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancels its token on drop
#[derive(Debug)]
pub struct CancelOnDrop(CancelToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
