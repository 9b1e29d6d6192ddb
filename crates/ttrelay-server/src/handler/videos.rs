//! Video resolution handler.
//!
//! Orchestrates the relay flow: validate the source URL, consult the cache,
//! fall through to the upstream provider on a miss, and cache only successful
//! results. Failures are never cached, so a transient upstream outage cannot
//! poison an entry for the full TTL.

use axum::extract::State;
use axum::routing::post;
use axum::Router;

use crate::extract::Json;
use crate::handler::request::DownloadRequest;
use crate::handler::response::DownloadResponse;
use crate::handler::{ErrorKind, Result};
use crate::service::{DynVideoProvider, ServiceState, VideoCache, cache_key};

/// Tracing target for video resolution operations.
const TRACING_TARGET: &str = "ttrelay_server::handler::videos";

#[tracing::instrument(skip_all)]
async fn download_video(
    State(video_cache): State<VideoCache>,
    State(provider): State<DynVideoProvider>,
    Json(request): Json<DownloadRequest>,
) -> Result<Json<DownloadResponse>> {
    let source_url = request.validated_url()?;
    let key = cache_key(source_url);

    if let Some(video) = video_cache.get(&key).await {
        tracing::debug!(
            target: TRACING_TARGET,
            url = %source_url,
            "resolved from cache"
        );

        return Ok(Json::new(DownloadResponse::cached(video)));
    }

    // Cache miss. Concurrent misses for the same key each fetch on their own;
    // the cache is not an in-flight barrier and the last write wins.
    let Some(video) = provider.fetch_video(source_url).await else {
        tracing::warn!(
            target: TRACING_TARGET,
            url = %source_url,
            "upstream extraction failed"
        );

        return Err(ErrorKind::UpstreamFailed.into());
    };

    video_cache.insert(key, video.clone()).await;

    tracing::info!(
        target: TRACING_TARGET,
        url = %source_url,
        "resolved from upstream"
    );

    Ok(Json::new(DownloadResponse::fresh(video)))
}

/// Returns a [`Router`] with the video resolution routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/download", post(download_video))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;

    use super::*;
    use crate::handler::test::{StubProvider, create_test_server, test_state, test_state_with_ttl};

    fn download_body(url: &str) -> serde_json::Value {
        serde_json::json!({ "url": url })
    }

    const VIDEO_PAGE: &str = "https://www.tiktok.com/@user/video/123";

    #[tokio::test]
    async fn test_successful_fetch_is_cached() -> anyhow::Result<()> {
        let provider = StubProvider::succeeding("http://x/video.mp4");
        let state = test_state(provider.clone());
        let server = create_test_server(state)?;

        let first = server.post("/api/download").json(&download_body(VIDEO_PAGE)).await;
        first.assert_status_ok();

        let body = first.json::<DownloadResponse>();
        assert!(body.success);
        assert_eq!(body.video.video_url, "http://x/video.mp4");
        assert_eq!(body.cached, None);

        let second = server.post("/api/download").json(&download_body(VIDEO_PAGE)).await;
        second.assert_status_ok();

        let body = second.json::<DownloadResponse>();
        assert_eq!(body.cached, Some(true));
        assert_eq!(body.video.video_url, "http://x/video.mp4");

        // The upstream must have been called exactly once.
        assert_eq!(provider.calls(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_without_side_effects() -> anyhow::Result<()> {
        let provider = StubProvider::succeeding("http://x/video.mp4");
        let state = test_state(provider.clone());
        let server = create_test_server(state.clone())?;

        for body in [
            serde_json::json!({}),
            download_body(""),
            download_body("https://example.com/watch?v=1"),
        ] {
            let response = server.post("/api/download").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let error = response.json::<serde_json::Value>();
            assert_eq!(error["success"], false);
            assert_eq!(error["error"], "Invalid TikTok URL");
        }

        assert_eq!(provider.calls(), 0);
        assert_eq!(state.video_cache.stats().await.entry_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_upstream_failure_returns_500_and_caches_nothing() -> anyhow::Result<()> {
        let provider = StubProvider::failing();
        let state = test_state(provider.clone());
        let server = create_test_server(state.clone())?;

        let response = server.post("/api/download").json(&download_body(VIDEO_PAGE)).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let error = response.json::<serde_json::Value>();
        assert_eq!(error["success"], false);
        assert_eq!(error["error"], "Failed to fetch video");

        assert_eq!(state.video_cache.stats().await.entry_count, 0);

        // A later request misses again and retries the upstream.
        let _ = server.post("/api/download").json(&download_body(VIDEO_PAGE)).await;
        assert_eq!(provider.calls(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_entry_triggers_fresh_fetch() -> anyhow::Result<()> {
        let provider = StubProvider::succeeding("http://x/video.mp4");
        let state = test_state_with_ttl(provider.clone(), Duration::from_millis(30));
        let server = create_test_server(state)?;

        server.post("/api/download").json(&download_body(VIDEO_PAGE)).await.assert_status_ok();
        assert_eq!(provider.calls(), 1);

        tokio::time::sleep(Duration::from_millis(60)).await;

        let response = server.post("/api/download").json(&download_body(VIDEO_PAGE)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<DownloadResponse>().cached, None);
        assert_eq!(provider.calls(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_textually_distinct_urls_are_distinct_entries() -> anyhow::Result<()> {
        let provider = StubProvider::succeeding("http://x/video.mp4");
        let state = test_state(provider.clone());
        let server = create_test_server(state)?;

        let trailing_slash = format!("{VIDEO_PAGE}/");
        server.post("/api/download").json(&download_body(VIDEO_PAGE)).await.assert_status_ok();
        server
            .post("/api/download")
            .json(&download_body(&trailing_slash))
            .await
            .assert_status_ok();

        assert_eq!(provider.calls(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_client_error() -> anyhow::Result<()> {
        let provider = StubProvider::succeeding("http://x/video.mp4");
        let state = test_state(provider.clone());
        let server = create_test_server(state)?;

        let response = server
            .post("/api/download")
            .content_type("application/json")
            .text("{not json")
            .await;
        assert!(response.status_code().is_client_error());

        let error = response.json::<serde_json::Value>();
        assert_eq!(error["success"], false);
        assert_eq!(provider.calls(), 0);

        Ok(())
    }
}
