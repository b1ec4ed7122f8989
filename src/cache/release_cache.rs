use chrono::TimeDelta;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::entry::{BoundedTable, CacheEntry};
use super::snapshot::SnapshotStore;
use crate::songkeeper::models::{ReleaseDetail, ReleaseId, ReleaseSummary};
use crate::songkeeper::{ReleaseSource, SkError, SkResult};

/// Default freshness window for both tables
pub const DEFAULT_TTL_SECS: i64 = 5 * 60;

/// Upper bound on cached release detail records
pub const MAX_DETAIL_ENTRIES: usize = 100;

struct CacheState {
    releases: Option<CacheEntry<Vec<ReleaseSummary>>>,
    details: BoundedTable<ReleaseId, ReleaseDetail>,
}

/// TTL cache in front of a [`ReleaseSource`]
///
/// Holds the current release list and a bounded table of release details.
/// On a transient upstream failure the last known-good data is served: the
/// expired in-memory copy first, then the on-disk snapshot when one is
/// configured. Configuration errors and failures with nothing to fall back
/// on are returned to the caller. Stale data is never re-stamped, so the
/// following read tries the upstream again.
pub struct ReleaseCache {
    source: Arc<dyn ReleaseSource>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    snapshot: Option<SnapshotStore>,
    state: Mutex<CacheState>,
}

impl ReleaseCache {
    pub fn new(source: Arc<dyn ReleaseSource>) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            ttl: TimeDelta::seconds(DEFAULT_TTL_SECS),
            snapshot: None,
            state: Mutex::new(CacheState {
                releases: None,
                details: BoundedTable::new(MAX_DETAIL_ENTRIES),
            }),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_details(mut self, max: usize) -> Self {
        self.state.get_mut().details = BoundedTable::new(max);
        self
    }

    /// Persist every refreshed release list to `path`
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(SnapshotStore::new(path));
        self
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Current release list, fetched when missing or expired
    pub async fn releases(&self) -> SkResult<Vec<ReleaseSummary>> {
        let now = self.clock.now();
        {
            let state = self.state.lock().await;
            if let Some(entry) = state.releases.as_ref().filter(|e| !e.is_expired(now)) {
                debug!("Release list cache hit");
                return Ok(entry.data.clone());
            }
        }

        debug!("Release list cache miss, fetching");
        match self.source.fetch_releases().await {
            Ok(mut releases) => {
                releases.iter_mut().for_each(ReleaseSummary::normalize);
                let stored_at = self.clock.now();
                self.state.lock().await.releases =
                    Some(CacheEntry::new(releases.clone(), stored_at, self.ttl));
                info!("Cached {} releases", releases.len());

                if let Some(store) = &self.snapshot {
                    if let Err(e) = store.save(&releases, stored_at).await {
                        warn!(
                            "Failed to write release snapshot {}: {}",
                            store.path().display(),
                            e
                        );
                    }
                }
                Ok(releases)
            }
            Err(e) if e.is_transient() => self.stale_releases(e).await,
            Err(e) => Err(e),
        }
    }

    async fn stale_releases(&self, err: SkError) -> SkResult<Vec<ReleaseSummary>> {
        let stale = self
            .state
            .lock()
            .await
            .releases
            .as_ref()
            .map(|entry| entry.data.clone());
        if let Some(releases) = stale {
            warn!("Serving stale release list after fetch failure: {}", err);
            return Ok(releases);
        }

        if let Some(store) = &self.snapshot {
            match store.load().await {
                Ok(Some(snapshot)) => {
                    warn!(
                        "Serving release snapshot from {} after fetch failure: {}",
                        snapshot.saved_at, err
                    );
                    return Ok(snapshot.releases);
                }
                Ok(None) => {}
                Err(e) => warn!(
                    "Failed to read release snapshot {}: {}",
                    store.path().display(),
                    e
                ),
            }
        }

        Err(err)
    }

    /// Detail record for `id`; `Ok(None)` when the catalog has no such release
    pub async fn release(&self, id: ReleaseId) -> SkResult<Option<ReleaseDetail>> {
        let now = self.clock.now();
        {
            let state = self.state.lock().await;
            if let Some(entry) = state.details.get(&id).filter(|e| !e.is_expired(now)) {
                debug!("Release {} cache hit", id);
                return Ok(Some(entry.data.clone()));
            }
        }

        debug!("Release {} cache miss, fetching", id);
        match self.source.fetch_release(id).await {
            Ok(Some(mut detail)) => {
                detail.normalize();
                let stored_at = self.clock.now();
                let entry = CacheEntry::new(detail.clone(), stored_at, self.ttl);
                let evicted = self.state.lock().await.details.insert(id, entry, stored_at);
                if let Some(evicted) = evicted {
                    debug!("Evicted release {} to cache release {}", evicted, id);
                }
                Ok(Some(detail))
            }
            Ok(None) => {
                debug!("Release {} not found", id);
                self.state.lock().await.details.remove(&id);
                Ok(None)
            }
            Err(e) if e.is_transient() => {
                let stale = self
                    .state
                    .lock()
                    .await
                    .details
                    .get(&id)
                    .map(|entry| entry.data.clone());
                match stale {
                    Some(detail) => {
                        warn!("Serving stale release {} after fetch failure: {}", id, e);
                        Ok(Some(detail))
                    }
                    None => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Drop all cached data so the next reads go upstream
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.releases = None;
        state.details.clear();
        info!("Release cache invalidated");
    }

    /// Number of release detail records currently held
    pub async fn detail_count(&self) -> usize {
        self.state.lock().await.details.len()
    }

    /// Whether a detail record for `id` is held, fresh or not
    pub async fn holds_release(&self, id: ReleaseId) -> bool {
        self.state.lock().await.details.contains(&id)
    }
}
