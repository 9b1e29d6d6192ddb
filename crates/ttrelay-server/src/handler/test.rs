//! Shared helpers for handler tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use ttrelay_tikwm::{VideoResult, VideoStats};

use crate::handler::routes;
use crate::service::{RateLimiter, ServiceConfig, ServiceState, VideoCache, VideoProvider};

/// Upstream double that returns a fixed outcome and counts invocations.
pub(crate) struct StubProvider {
    result: Option<VideoResult>,
    calls: AtomicUsize,
}

impl StubProvider {
    /// A provider that resolves every URL to the same result.
    pub(crate) fn succeeding(video_url: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Some(VideoResult {
                video_url: video_url.to_owned(),
                video_url_watermark: Some(format!("{video_url}?wm=1")),
                audio_url: None,
                cover_url: None,
                title: Some("t".to_owned()),
                author: Some("A".to_owned()),
                stats: VideoStats {
                    plays: Some(5),
                    ..Default::default()
                },
            }),
            calls: AtomicUsize::new(0),
        })
    }

    /// A provider that fails every fetch.
    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// Number of fetches the handlers issued.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoProvider for StubProvider {
    async fn fetch_video(&self, _source_url: &str) -> Option<VideoResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// State with default configuration around a stub provider.
pub(crate) fn test_state(provider: Arc<StubProvider>) -> ServiceState {
    ServiceState::with_provider(provider, &ServiceConfig::default())
}

/// State with a custom cache TTL, for expiry tests.
pub(crate) fn test_state_with_ttl(provider: Arc<StubProvider>, ttl: Duration) -> ServiceState {
    ServiceState {
        provider,
        video_cache: VideoCache::with_ttl(ttl),
        rate_limiter: RateLimiter::default(),
    }
}

/// Test server over the full route surface.
pub(crate) fn create_test_server(state: ServiceState) -> anyhow::Result<TestServer> {
    TestServer::new(routes(state))
}
