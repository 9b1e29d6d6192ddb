//! Upstream extraction provider seam.

use std::sync::Arc;

use async_trait::async_trait;
use ttrelay_tikwm::{TikwmClient, VideoResult};

/// Resolves a source page URL into a normalized extraction result.
///
/// The seam between the request handlers and the outbound HTTP call. The
/// contract mirrors the client boundary: `None` is the uniform failure
/// signal for every failure mode, and implementations must not panic or
/// surface transport errors.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Fetches the extraction result for `source_url`, or `None` on failure.
    async fn fetch_video(&self, source_url: &str) -> Option<VideoResult>;
}

/// Shared, object-safe provider handle used for dependency injection.
pub type DynVideoProvider = Arc<dyn VideoProvider>;

#[async_trait]
impl VideoProvider for TikwmClient {
    async fn fetch_video(&self, source_url: &str) -> Option<VideoResult> {
        TikwmClient::fetch_video(self, source_url).await
    }
}
