//! Snapshot ports
//!
//! A poller fetches through [`SnapshotFetch`] and publishes through an
//! atomic pointer swap; readers observe the result through
//! [`SnapshotSource`]. Readers always see either the previous or the new
//! snapshot in full, never a partial one.

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::PollError;

/// Fetch one complete snapshot from a remote source
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SnapshotFetch<T: Send + Sync + 'static>: Send + Sync {
    /// Fetch a fresh snapshot, classifying any failure
    async fn fetch(&self) -> Result<T, PollError>;
}

/// Read side of a poller's last-good snapshot
pub trait SnapshotSource<T>: Send + Sync {
    /// The most recent successfully fetched snapshot, if any
    fn latest(&self) -> Option<Arc<T>>;

    /// Whether the last completed poll succeeded
    ///
    /// Stays `true` across silent not-ready retries; flips on update
    /// failures.
    fn last_poll_succeeded(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn SnapshotSource<u32>) {}

    #[test]
    fn source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SnapshotSource<u32>>();
        assert_send_sync::<dyn SnapshotFetch<u32>>();
    }

    #[tokio::test]
    async fn mock_fetch_returns_configured_value() {
        let mut mock = MockSnapshotFetch::<u32>::new();
        mock.expect_fetch().returning(|| Ok(7));
        assert_eq!(mock.fetch().await.unwrap(), 7);
    }
}
