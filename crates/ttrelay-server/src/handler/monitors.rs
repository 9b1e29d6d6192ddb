//! Health and status check handlers.

use axum::Router;
use axum::extract::State;
use axum::routing::get;

use crate::extract::Json;
use crate::handler::response::HealthResponse;
use crate::service::{ServiceState, VideoCache};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "ttrelay_server::handler::monitors";

/// Read-only introspection: current cache counters plus the server clock.
/// No side effects, no cache mutation.
#[tracing::instrument(skip_all)]
async fn health_status(State(video_cache): State<VideoCache>) -> Json<HealthResponse> {
    let cache_stats = video_cache.stats().await;

    tracing::debug!(
        target: TRACING_TARGET,
        entry_count = cache_stats.entry_count,
        hit_count = cache_stats.hit_count,
        miss_count = cache_stats.miss_count,
        "health status requested"
    );

    Json::new(HealthResponse::ok(cache_stats))
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::{StubProvider, create_test_server, test_state};

    #[tokio::test]
    async fn test_health_endpoint_reports_counters_and_timestamp() -> anyhow::Result<()> {
        let provider = StubProvider::succeeding("http://x/video.mp4");
        let state = test_state(provider);
        let server = create_test_server(state.clone())?;

        let response = server.get("/api/health").await;
        response.assert_status_ok();

        let health = response.json::<HealthResponse>();
        assert_eq!(health.status, "ok");
        assert_eq!(health.cache_stats.entry_count, 0);
        assert_eq!(health.cache_stats.hit_count, 0);
        assert_eq!(health.cache_stats.miss_count, 0);

        // The timestamp round-trips through ISO-8601.
        let raw = response.json::<serde_json::Value>();
        let rendered = raw["timestamp"].as_str().expect("timestamp is a string");
        assert!(rendered.parse::<jiff::Timestamp>().is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn test_health_reflects_cache_activity() -> anyhow::Result<()> {
        let provider = StubProvider::succeeding("http://x/video.mp4");
        let state = test_state(provider);
        let server = create_test_server(state.clone())?;

        let body = serde_json::json!({ "url": "https://www.tiktok.com/@user/video/123" });
        server.post("/api/download").json(&body).await.assert_status_ok();
        server.post("/api/download").json(&body).await.assert_status_ok();

        let health = server.get("/api/health").await.json::<HealthResponse>();
        assert_eq!(health.cache_stats.entry_count, 1);
        assert_eq!(health.cache_stats.hit_count, 1);
        assert_eq!(health.cache_stats.miss_count, 1);

        Ok(())
    }
}
