use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{GraphSnapshot, ProfileId};
use crate::services::snapshot::{SnapshotError, SnapshotSource};

/// Short-lived in-memory snapshot cache
///
/// Screens tend to ask for several widgets in a row; within the TTL they all
/// read the same point-in-time snapshot instead of refetching it.
pub struct CachedSnapshotSource {
    inner: Arc<dyn SnapshotSource>,
    cache: moka::future::Cache<String, Arc<GraphSnapshot>>,
}

impl CachedSnapshotSource {
    pub fn new(inner: Arc<dyn SnapshotSource>, capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    /// Drop the cached snapshot of one caller
    pub async fn invalidate(&self, profile_id: &ProfileId) {
        self.cache.invalidate(&CacheKey::snapshot(profile_id)).await;
    }
}

#[async_trait]
impl SnapshotSource for CachedSnapshotSource {
    async fn load_snapshot(&self, profile_id: &ProfileId) -> Result<Arc<GraphSnapshot>, SnapshotError> {
        let key = CacheKey::snapshot(profile_id);

        if let Some(snapshot) = self.cache.get(&key).await {
            tracing::trace!("Snapshot cache hit: {}", key);
            return Ok(snapshot);
        }

        tracing::trace!("Snapshot cache miss: {}", key);
        let snapshot = self.inner.load_snapshot(profile_id).await?;
        self.cache.insert(key, Arc::clone(&snapshot)).await;
        Ok(snapshot)
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a caller's snapshot
    pub fn snapshot(profile_id: &ProfileId) -> String {
        format!("snapshot:{}", profile_id)
    }
}
