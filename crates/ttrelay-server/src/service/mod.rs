//! Application state and dependency injection.

mod cache;
mod config;
mod security;
mod upstream;

use ttrelay_tikwm::TikwmClient;

pub use crate::service::cache::{CacheStats, DEFAULT_TTL, VideoCache, cache_key};
pub use crate::service::config::ServiceConfig;
pub use crate::service::security::{RateLimitConfig, RateLimitKey, RateLimiter};
pub use crate::service::upstream::{DynVideoProvider, VideoProvider};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Constructed once
/// at process start and torn down at process stop; there is no hidden global
/// state behind it.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub provider: DynVideoProvider,

    // Internal services:
    pub video_cache: VideoCache,
    pub rate_limiter: RateLimiter,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Builds the TikWM client and the internal services it fronts.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let client = TikwmClient::new(config.tikwm_config())?;

        Ok(Self::with_provider(std::sync::Arc::new(client), config))
    }

    /// Initializes application state around an explicit provider.
    ///
    /// The seam used by handler tests to substitute the upstream call.
    pub fn with_provider(provider: DynVideoProvider, config: &ServiceConfig) -> Self {
        Self {
            provider,
            video_cache: VideoCache::with_ttl(config.cache_ttl()),
            rate_limiter: RateLimiter::new(config.rate_limit_config()),
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+ $(,)?) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di! {
    provider: DynVideoProvider,
    video_cache: VideoCache,
    rate_limiter: RateLimiter,
}
