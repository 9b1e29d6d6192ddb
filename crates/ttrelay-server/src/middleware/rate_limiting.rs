//! IP-based rate limiting middleware.

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum_client_ip::ClientIp;

use crate::service::{RateLimitKey, RateLimiter, ServiceState};

/// Rate limits requests by client IP address.
///
/// The relay's sole admission-control mechanism: requests beyond the
/// fixed-window budget are rejected here, before any handler, cache, or
/// upstream interaction.
///
/// Requires an `axum_client_ip::ClientIpSource` extension on the router so
/// the client IP can be resolved.
pub async fn rate_limit_by_ip(
    ClientIp(ip_address): ClientIp,
    State(rate_limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let key = RateLimitKey::from_ip(ip_address);

    match rate_limiter.check(key).await {
        Ok(()) => next.run(request).await,
        Err(error) => error.into_response(),
    }
}

/// Extension trait for `axum::`[`Router`] to apply rate limiting.
pub trait RouterRateLimitExt {
    /// Layers per-IP rate limiting over every route added so far.
    fn with_rate_limiting(self, state: ServiceState) -> Self;
}

impl RouterRateLimitExt for Router {
    fn with_rate_limiting(self, state: ServiceState) -> Self {
        self.layer(from_fn_with_state(state, rate_limit_by_ip))
    }
}
