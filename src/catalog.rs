use chrono::TimeDelta;
use std::sync::Arc;
use tracing::warn;

use crate::cache::ReleaseCache;
use crate::config::Config;
use crate::seed;
use crate::site::slugify;
use crate::songkeeper::models::{ReleaseDetail, ReleaseId, ReleaseSummary};
use crate::songkeeper::{SkResult, SongKeeperClient};

/// Release data as the site's pages read it
///
/// Wraps the [`ReleaseCache`] with the seed catalog: `show_seed` lists seed
/// releases ahead of live ones, `seed_fallback` serves them when the catalog
/// service fails and no cached data is left. Configuration errors are always
/// returned.
pub struct Catalog {
    cache: ReleaseCache,
    show_seed: bool,
    seed_fallback: bool,
}

impl Catalog {
    pub fn new(cache: ReleaseCache) -> Self {
        Self {
            cache,
            show_seed: false,
            seed_fallback: true,
        }
    }

    /// Build the SongKeeper-backed catalog described by `config`
    pub fn from_config(config: &Config) -> SkResult<Self> {
        let client = SongKeeperClient::new(
            config.songkeeper_api_url.clone(),
            config.songkeeper_access_key.clone(),
        )?;

        let mut cache = ReleaseCache::new(Arc::new(client))
            .with_ttl(TimeDelta::seconds(config.release_cache_ttl_secs));
        if let Some(path) = &config.release_snapshot_path {
            cache = cache.with_snapshot(path);
        }

        Ok(Self::new(cache)
            .with_show_seed(config.show_seed)
            .with_seed_fallback(config.seed_fallback))
    }

    pub fn with_show_seed(mut self, show_seed: bool) -> Self {
        self.show_seed = show_seed;
        self
    }

    pub fn with_seed_fallback(mut self, seed_fallback: bool) -> Self {
        self.seed_fallback = seed_fallback;
        self
    }

    pub fn cache(&self) -> &ReleaseCache {
        &self.cache
    }

    /// All releases for the music page
    pub async fn releases(&self) -> SkResult<Vec<ReleaseSummary>> {
        match self.cache.releases().await {
            Ok(live) if self.show_seed => {
                let mut releases = seed::seed_releases();
                releases.extend(live);
                Ok(releases)
            }
            Ok(live) => Ok(live),
            Err(e) if e.is_transient() && self.seed_fallback => {
                warn!("Release catalog unavailable, serving seed data: {}", e);
                Ok(seed::seed_releases())
            }
            Err(e) => Err(e),
        }
    }

    /// One release for its detail page; `None` renders as "not found"
    pub async fn release(&self, id: ReleaseId) -> SkResult<Option<ReleaseDetail>> {
        match self.cache.release(id).await {
            Ok(Some(detail)) => Ok(Some(detail)),
            Ok(None) if self.show_seed => Ok(seed_detail(id)),
            Ok(None) => Ok(None),
            Err(e) if e.is_transient() && (self.seed_fallback || self.show_seed) => {
                match seed_detail(id) {
                    Some(detail) => {
                        warn!("Release {} unavailable, serving seed data: {}", id, e);
                        Ok(Some(detail))
                    }
                    None => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Release whose slugified title is `slug`
    pub async fn release_by_slug(&self, slug: &str) -> SkResult<Option<ReleaseDetail>> {
        let releases = self.releases().await?;
        match releases.iter().find(|r| slugify(&r.title) == slug) {
            Some(summary) => self.release(summary.id).await,
            None => Ok(None),
        }
    }

    /// "Try again": drop cached data so the next read goes upstream
    pub async fn retry(&self) {
        self.cache.invalidate().await;
    }
}

fn seed_detail(id: ReleaseId) -> Option<ReleaseDetail> {
    seed::seed_release(id).map(|summary| ReleaseDetail::from(&summary))
}
