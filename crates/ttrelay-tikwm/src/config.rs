//! Configuration for the TikWM client.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default timeout for extraction requests: 10 seconds.
///
/// TikWM occasionally stalls on videos it cannot resolve; the relay treats
/// anything slower than this as a failed fetch rather than holding the
/// inbound request open.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default base URL of the TikWM extraction endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.tikwm.com/api/";

/// Configuration for the TikWM HTTP client.
#[derive(Debug, Clone)]
pub struct TikwmClientConfig {
    /// Base URL of the extraction endpoint.
    pub base_url: String,
    /// Timeout applied to every outbound request.
    pub timeout: Duration,
    /// User-Agent header to send with requests.
    pub user_agent: String,
    /// Whether to request the high-definition rendition when available.
    pub prefer_hd: bool,
}

impl Default for TikwmClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: Self::default_user_agent(),
            prefer_hd: true,
        }
    }
}

impl TikwmClientConfig {
    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("ttrelay/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Creates a new configuration with the specified base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Creates a new configuration with the specified timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates a new configuration with the specified user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Creates a new configuration with the specified quality preference.
    pub fn with_prefer_hd(mut self, prefer_hd: bool) -> Self {
        self.prefer_hd = prefer_hd;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base URL must not be empty".to_owned()));
        }

        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be non-zero".to_owned()));
        }

        Ok(())
    }

    /// Returns the effective user agent, using default if empty.
    pub fn effective_user_agent(&self) -> String {
        if self.user_agent.is_empty() {
            Self::default_user_agent()
        } else {
            self.user_agent.clone()
        }
    }
}
