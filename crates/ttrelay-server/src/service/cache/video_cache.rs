//! In-memory extraction result cache with lazy TTL expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use ttrelay_tikwm::VideoResult;

/// Tracing target for cache operations.
const TRACING_TARGET: &str = "ttrelay_server::service::cache";

/// Default entry lifetime: one hour, for all entries alike.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Namespace prefix for video entries, so the cache can hold other entity
/// kinds later without key collisions.
const KEY_NAMESPACE: &str = "video_";

/// Derives the cache key for a source URL.
///
/// The key is the verbatim input URL behind a namespace prefix. No trimming,
/// case-folding, or query canonicalization happens here: two URLs that differ
/// textually are distinct entries even when they name the same video.
#[must_use]
pub fn cache_key(source_url: &str) -> String {
    format!("{KEY_NAMESPACE}{source_url}")
}

/// A cached result and its expiry deadline.
struct CacheEntry {
    value: VideoResult,
    expires_at: Instant,
}

struct VideoCacheInner {
    entries: RwLock<HashMap<String, CacheEntry>>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    ttl: Duration,
}

/// Single-process, in-memory store for extraction results.
///
/// Shields the upstream service from duplicate requests for the same resource
/// within the TTL window. Expiry is lazy: an entry past its deadline is
/// treated as absent at read time and reaped on the spot, so no background
/// sweeper is needed.
///
/// This is not a request-coalescing barrier. Concurrent lookups for the same
/// missing key each miss independently and each trigger their own upstream
/// fetch; the last write wins.
///
/// # Thread Safety
///
/// This type is `Clone` and all clones share the same underlying map through
/// `Arc`. Lookups return clones of the stored value, never an aliased view.
#[derive(Clone)]
pub struct VideoCache {
    inner: Arc<VideoCacheInner>,
}

/// Monotonic cache counters since process start, for observability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of live entries currently held.
    pub entry_count: u64,
    /// Number of reads answered from the cache.
    pub hit_count: u64,
    /// Number of reads that found nothing usable.
    pub miss_count: u64,
}

impl VideoCache {
    /// Creates a cache with the default one-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with a custom TTL applied to every entry.
    pub fn with_ttl(ttl: Duration) -> Self {
        tracing::info!(
            target: TRACING_TARGET,
            ttl_secs = ttl.as_secs(),
            "video cache initialized"
        );

        Self {
            inner: Arc::new(VideoCacheInner {
                entries: RwLock::new(HashMap::new()),
                hit_count: AtomicU64::new(0),
                miss_count: AtomicU64::new(0),
                ttl,
            }),
        }
    }

    /// Returns the TTL applied to entries.
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Returns the cached value for `key` if present and not expired.
    ///
    /// A pure read: never triggers a fetch. An expired entry counts as a miss
    /// and is removed so its memory is reclaimed.
    pub async fn get(&self, key: &str) -> Option<VideoResult> {
        {
            let entries = self.inner.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    self.inner.hit_count.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
                // Expired, reap below under a write lock.
                Some(_) => {}
                None => {
                    self.inner.miss_count.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        // Another task may have replaced the entry between the locks, so
        // re-check the deadline before removing.
        let mut entries = self.inner.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(key);
            tracing::debug!(target: TRACING_TARGET, key = %key, "expired entry reaped");
        }

        self.inner.miss_count.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Stores `value` under `key` with expiry = now + TTL.
    ///
    /// Overwrites any prior entry for that key.
    pub async fn insert(&self, key: String, value: VideoResult) {
        let expires_at = Instant::now() + self.inner.ttl;

        let mut entries = self.inner.entries.write().await;
        entries.insert(key, CacheEntry { value, expires_at });
    }

    /// Returns the current counters.
    pub async fn stats(&self) -> CacheStats {
        let entries = self.inner.entries.read().await;

        CacheStats {
            entry_count: entries.len() as u64,
            hit_count: self.inner.hit_count.load(Ordering::Relaxed),
            miss_count: self.inner.miss_count.load(Ordering::Relaxed),
        }
    }

    /// Drops every entry. Counters are left untouched.
    ///
    /// Not part of the default request flow; exposed for process-wide resets.
    pub async fn clear(&self) {
        let mut entries = self.inner.entries.write().await;
        entries.clear();

        tracing::info!(target: TRACING_TARGET, "video cache cleared");
    }
}

impl Default for VideoCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VideoCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoCache")
            .field("ttl", &self.inner.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use ttrelay_tikwm::VideoStats;

    use super::*;

    fn sample_result(url: &str) -> VideoResult {
        VideoResult {
            video_url: url.to_owned(),
            video_url_watermark: None,
            audio_url: None,
            cover_url: None,
            title: Some("t".to_owned()),
            author: Some("A".to_owned()),
            stats: VideoStats::default(),
        }
    }

    #[test]
    fn test_cache_key_is_prefixed_verbatim() {
        let url = "https://www.tiktok.com/@user/video/123";
        assert_eq!(cache_key(url), format!("video_{url}"));

        // No normalization: textual differences stay distinct.
        assert_ne!(cache_key("https://a/V?x=1"), cache_key("https://a/v?x=1"));
        assert_ne!(cache_key("https://a/v"), cache_key("https://a/v "));
    }

    #[tokio::test]
    async fn test_get_returns_inserted_value() {
        let cache = VideoCache::new();
        let key = cache_key("https://www.tiktok.com/@user/video/123");

        cache.insert(key.clone(), sample_result("http://x/v.mp4")).await;

        let value = cache.get(&key).await.expect("entry present");
        assert_eq!(value.video_url, "http://x/v.mp4");
    }

    #[tokio::test]
    async fn test_miss_and_hit_counters() {
        let cache = VideoCache::new();
        let key = cache_key("https://www.tiktok.com/@user/video/123");

        assert!(cache.get(&key).await.is_none());
        cache.insert(key.clone(), sample_result("http://x/v.mp4")).await;
        assert!(cache.get(&key).await.is_some());
        assert!(cache.get(&key).await.is_some());

        let stats = cache.stats().await;
        assert_eq!(stats.entry_count, 1);
        assert_eq!(stats.hit_count, 2);
        assert_eq!(stats.miss_count, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent_and_reaped() {
        let cache = VideoCache::with_ttl(Duration::from_millis(20));
        let key = cache_key("https://www.tiktok.com/@user/video/123");

        cache.insert(key.clone(), sample_result("http://x/v.mp4")).await;
        assert!(cache.get(&key).await.is_some());

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(cache.get(&key).await.is_none());
        let stats = cache.stats().await;
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.miss_count, 1);
    }

    #[tokio::test]
    async fn test_insert_overwrites_prior_entry() {
        let cache = VideoCache::new();
        let key = cache_key("https://www.tiktok.com/@user/video/123");

        cache.insert(key.clone(), sample_result("http://x/old.mp4")).await;
        cache.insert(key.clone(), sample_result("http://x/new.mp4")).await;

        let value = cache.get(&key).await.expect("entry present");
        assert_eq!(value.video_url, "http://x/new.mp4");
        assert_eq!(cache.stats().await.entry_count, 1);
    }

    #[tokio::test]
    async fn test_lookup_returns_a_copy() {
        let cache = VideoCache::new();
        let key = cache_key("https://www.tiktok.com/@user/video/123");

        cache.insert(key.clone(), sample_result("http://x/v.mp4")).await;

        let mut copy = cache.get(&key).await.expect("entry present");
        copy.title = Some("mutated".to_owned());

        let fresh = cache.get(&key).await.expect("entry present");
        assert_eq!(fresh.title.as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn test_clear_drops_entries_but_keeps_counters() {
        let cache = VideoCache::new();
        let key = cache_key("https://www.tiktok.com/@user/video/123");

        cache.insert(key.clone(), sample_result("http://x/v.mp4")).await;
        assert!(cache.get(&key).await.is_some());

        cache.clear().await;

        assert!(cache.get(&key).await.is_none());
        let stats = cache.stats().await;
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
    }
}
