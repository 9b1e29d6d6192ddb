//! Service configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use ttrelay_tikwm::TikwmClientConfig;

use crate::service::RateLimitConfig;

/// Configuration for the relay's internal services.
///
/// # Environment Variables
///
/// With the `config` feature enabled, all options can be set via environment
/// variables:
/// - `CACHE_TTL` - cache entry lifetime in seconds (default: 3600)
/// - `RATE_LIMIT_MAX` - requests admitted per window and client (default: 100)
/// - `RATE_LIMIT_WINDOW` - rate limit window in seconds (default: 900)
/// - `TIKWM_BASE_URL` - upstream extraction endpoint
/// - `TIKWM_TIMEOUT` - upstream request timeout in seconds (default: 10)
/// - `TIKWM_PREFER_HD` - request the HD rendition (default: true)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Cache entry lifetime in seconds.
    #[cfg_attr(feature = "config", arg(long, env = "CACHE_TTL", default_value_t = 3600))]
    pub cache_ttl: u64,

    /// Requests admitted per rate limit window for one client key.
    #[cfg_attr(feature = "config", arg(long, env = "RATE_LIMIT_MAX", default_value_t = 100))]
    pub rate_limit_max: u32,

    /// Rate limit window length in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "RATE_LIMIT_WINDOW", default_value_t = 900)
    )]
    pub rate_limit_window: u64,

    /// Base URL of the upstream extraction endpoint.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "TIKWM_BASE_URL", default_value = ttrelay_tikwm::DEFAULT_BASE_URL)
    )]
    pub tikwm_base_url: String,

    /// Upstream request timeout in seconds.
    #[cfg_attr(feature = "config", arg(long, env = "TIKWM_TIMEOUT", default_value_t = 10))]
    pub tikwm_timeout: u64,

    /// Whether to request the high-definition rendition.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "TIKWM_PREFER_HD", default_value_t = true)
    )]
    pub tikwm_prefer_hd: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: 3600,
            rate_limit_max: 100,
            rate_limit_window: 900,
            tikwm_base_url: ttrelay_tikwm::DEFAULT_BASE_URL.to_owned(),
            tikwm_timeout: 10,
            tikwm_prefer_hd: true,
        }
    }
}

impl ServiceConfig {
    /// Returns the cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Returns the rate limiter configuration.
    pub fn rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig::new(
            self.rate_limit_max,
            Duration::from_secs(self.rate_limit_window),
        )
    }

    /// Returns the upstream client configuration.
    pub fn tikwm_config(&self) -> TikwmClientConfig {
        TikwmClientConfig::default()
            .with_base_url(self.tikwm_base_url.clone())
            .with_timeout(Duration::from_secs(self.tikwm_timeout))
            .with_prefer_hd(self.tikwm_prefer_hd)
    }
}
