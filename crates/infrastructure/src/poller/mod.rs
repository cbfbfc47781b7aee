//! Generic background poller
//!
//! Periodically refreshes a snapshot through a [`SnapshotFetch`] port and
//! publishes it with an atomic pointer swap, so readers always see either
//! the previous complete snapshot or the new one. A failed refresh keeps
//! the stale snapshot in place; availability is tracked separately.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use application::{PollError, SnapshotFetch, SnapshotSource};

/// Counters and timestamps for one poller
#[derive(Debug, Clone)]
pub struct PollerStats {
    /// Poller name as given at construction
    pub name: String,
    /// Number of successful refreshes
    pub success_count: u64,
    /// Number of failed refreshes, silent retries included
    pub failure_count: u64,
    /// When the last refresh attempt completed
    pub last_refresh: Option<DateTime<Utc>>,
    /// Whether a snapshot is published and the last poll succeeded
    pub available: bool,
}

/// Background poller holding the latest published snapshot
pub struct Poller<T> {
    name: String,
    fetch: Arc<dyn SnapshotFetch<T>>,
    snapshot: ArcSwapOption<T>,
    last_success: AtomicBool,
    success_count: AtomicU64,
    failure_count: AtomicU64,
    last_refresh: RwLock<Option<DateTime<Utc>>>,
}

impl<T: Send + Sync> std::fmt::Debug for Poller<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("name", &self.name)
            .field("available", &self.last_poll_succeeded())
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> Poller<T> {
    /// Create a poller over a fetch port
    ///
    /// No snapshot is published until the first successful [`refresh`].
    ///
    /// [`refresh`]: Self::refresh
    pub fn new(name: impl Into<String>, fetch: Arc<dyn SnapshotFetch<T>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            fetch,
            snapshot: ArcSwapOption::const_empty(),
            last_success: AtomicBool::new(false),
            success_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
            last_refresh: RwLock::new(None),
        })
    }

    /// Run one refresh cycle
    ///
    /// On success the new snapshot replaces the published one atomically.
    /// A silent error ([`PollError::is_silent`]) leaves both the snapshot
    /// and the availability flag untouched; any other error marks the
    /// poller unavailable while keeping the stale snapshot for when it
    /// recovers.
    pub async fn refresh(&self) {
        let result = self.fetch.fetch().await;
        *self.last_refresh.write() = Some(Utc::now());

        match result {
            Ok(snapshot) => {
                self.snapshot.store(Some(Arc::new(snapshot)));
                self.last_success.store(true, Ordering::Relaxed);
                self.success_count.fetch_add(1, Ordering::Relaxed);
                debug!(poller = %self.name, "refresh succeeded");
            }
            Err(err) if err.is_silent() => {
                self.failure_count.fetch_add(1, Ordering::Relaxed);
                debug!(poller = %self.name, error = %err, "refresh not ready, will retry");
            }
            Err(err) => {
                self.last_success.store(false, Ordering::Relaxed);
                self.failure_count.fetch_add(1, Ordering::Relaxed);
                warn!(poller = %self.name, error = %err, "refresh failed");
            }
        }
    }

    /// Spawn the polling loop on the current runtime
    ///
    /// The first refresh runs immediately; subsequent refreshes run every
    /// `interval`. Ticks that fall due while a refresh is still in flight
    /// are skipped, so at most one fetch is outstanding per poller.
    pub fn spawn(self: &Arc<Self>, interval: Duration) -> PollerHandle {
        let poller = Arc::clone(self);
        info!(poller = %poller.name, interval_secs = interval.as_secs(), "starting poller");

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                poller.refresh().await;
            }
        });

        PollerHandle { task }
    }

    /// Current counters
    #[must_use]
    pub fn stats(&self) -> PollerStats {
        PollerStats {
            name: self.name.clone(),
            success_count: self.success_count.load(Ordering::Relaxed),
            failure_count: self.failure_count.load(Ordering::Relaxed),
            last_refresh: *self.last_refresh.read(),
            available: self.latest().is_some() && self.last_poll_succeeded(),
        }
    }
}

impl<T> SnapshotSource<T> for Poller<T>
where
    T: Send + Sync,
{
    fn latest(&self) -> Option<Arc<T>> {
        self.snapshot.load_full()
    }

    fn last_poll_succeeded(&self) -> bool {
        self.last_success.load(Ordering::Relaxed)
    }
}

/// Handle to a spawned polling loop
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the polling loop
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Whether the loop has stopped
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
