//! In-memory rate limiter using fixed time windows.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::handler::{ErrorKind, Result as HandlerResult};

/// Logging target for rate limiter operations
const RATE_LIMITER_TARGET: &str = "ttrelay_server::service::security::rate_limiter";

/// Client identity a request budget is tracked under.
///
/// The relay identifies clients by IP address only.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct RateLimitKey(IpAddr);

impl RateLimitKey {
    /// Creates a key from an IP address
    pub fn from_ip(ip: IpAddr) -> Self {
        Self(ip)
    }
}

/// Request counter for one fixed window
#[derive(Debug, Clone, Copy)]
struct FixedWindow {
    /// Requests admitted in the current window
    count: u32,
    /// When the current window opened
    opened_at: Instant,
}

impl FixedWindow {
    fn new() -> Self {
        Self {
            count: 0,
            opened_at: Instant::now(),
        }
    }

    /// Opens a fresh window if the current one has elapsed
    fn roll(&mut self, window: Duration) {
        if self.opened_at.elapsed() >= window {
            self.count = 0;
            self.opened_at = Instant::now();
        }
    }

    /// Attempts to admit one request into the window
    fn try_admit(&mut self, max_requests: u32, window: Duration) -> bool {
        self.roll(window);

        if self.count < max_requests {
            self.count += 1;
            true
        } else {
            false
        }
    }

    /// Returns time until the current window rolls over
    fn time_until_reset(&self, window: Duration) -> Duration {
        window.saturating_sub(self.opened_at.elapsed())
    }
}

/// Rate limiter configuration
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Maximum number of requests allowed per window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl RateLimitConfig {
    /// Creates a new rate limit configuration
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

impl Default for RateLimitConfig {
    /// 100 requests per 15-minute window.
    fn default() -> Self {
        Self::new(100, Duration::from_secs(15 * 60))
    }
}

/// In-memory rate limiter counting requests per key in fixed windows.
///
/// The first request for a key opens its window; once `max_requests` have
/// been admitted, further requests are rejected until the window elapses and
/// the counter resets. Windows are per key, not globally aligned.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<RwLock<HashMap<RateLimitKey, FixedWindow>>>,
    config: RateLimitConfig,
    cleanup_interval: Duration,
}

impl RateLimiter {
    /// Creates a new rate limiter with the given configuration
    pub fn new(config: RateLimitConfig) -> Self {
        let limiter = Self {
            windows: Arc::new(RwLock::new(HashMap::new())),
            config,
            cleanup_interval: Duration::from_secs(300), // 5 minutes
        };

        // Start cleanup task
        limiter.start_cleanup_task();

        tracing::info!(
            target: RATE_LIMITER_TARGET,
            max_requests = config.max_requests,
            window_secs = config.window.as_secs(),
            "rate limiter initialized"
        );

        limiter
    }

    /// Checks if a request is allowed for the given key
    pub async fn check(&self, key: RateLimitKey) -> HandlerResult<()> {
        let mut windows = self.windows.write().await;

        let window = windows.entry(key).or_insert_with(FixedWindow::new);

        if window.try_admit(self.config.max_requests, self.config.window) {
            Ok(())
        } else {
            let retry_after = window.time_until_reset(self.config.window);
            tracing::warn!(
                target: RATE_LIMITER_TARGET,
                key = ?key,
                retry_after_secs = retry_after.as_secs(),
                "rate limit exceeded"
            );
            Err(ErrorKind::TooManyRequests.with_context(format!(
                "rate limit exceeded, window resets in {} seconds",
                retry_after.as_secs()
            )))
        }
    }

    /// Resets the rate limit for a specific key
    pub async fn reset(&self, key: &RateLimitKey) {
        let mut windows = self.windows.write().await;
        windows.remove(key);
        tracing::debug!(
            target: RATE_LIMITER_TARGET,
            key = ?key,
            "rate limit reset"
        );
    }

    /// Returns the number of tracked keys
    pub async fn size(&self) -> usize {
        let windows = self.windows.read().await;
        windows.len()
    }

    /// Starts a background task to clean up elapsed windows
    fn start_cleanup_task(&self) {
        let windows = Arc::clone(&self.windows);
        let window_length = self.config.window;
        let interval = self.cleanup_interval;

        tokio::spawn(async move {
            let mut cleanup_interval = tokio::time::interval(interval);
            loop {
                cleanup_interval.tick().await;

                let mut windows = windows.write().await;
                let before_count = windows.len();

                // An elapsed window carries no admission state worth keeping
                windows.retain(|_, w| w.opened_at.elapsed() < window_length);

                let removed = before_count - windows.len();
                if removed > 0 {
                    tracing::debug!(
                        target: RATE_LIMITER_TARGET,
                        removed_count = removed,
                        remaining_count = windows.len(),
                        "cleaned up elapsed rate limit windows"
                    );
                }
            }
        });
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .field("cleanup_interval", &self.cleanup_interval)
            .finish()
    }
}
