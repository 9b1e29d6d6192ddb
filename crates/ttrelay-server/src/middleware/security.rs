//! Security middleware for HTTP requests.
//!
//! The relay is an anonymous public API consumed from arbitrary web origins,
//! so CORS is wide open by default.

use axum::Router;
use tower_http::cors::CorsLayer;

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt {
    /// Layers a permissive CORS policy allowing any origin, method, and
    /// request header.
    fn with_permissive_cors(self) -> Self;
}

impl RouterSecurityExt for Router {
    fn with_permissive_cors(self) -> Self {
        self.layer(CorsLayer::permissive())
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[tokio::test]
    async fn test_cors_headers_are_present() -> anyhow::Result<()> {
        async fn ping() -> &'static str {
            "pong"
        }

        let app = Router::new().route("/ping", get(ping)).with_permissive_cors();
        let server = TestServer::new(app)?;

        let response = server.get("/ping").add_header("Origin", "https://example.com").await;
        response.assert_status_ok();

        let allow_origin = response
            .maybe_header("access-control-allow-origin")
            .expect("CORS header present");
        assert_eq!(allow_origin, "*");

        Ok(())
    }
}
