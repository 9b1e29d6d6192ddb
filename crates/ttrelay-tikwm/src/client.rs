//! TikWM client implementation using reqwest.

use std::sync::Arc;

use reqwest::Client;

use crate::config::TikwmClientConfig;
use crate::error::Result;
use crate::response::TikwmResponse;
use crate::types::VideoResult;

/// Tracing target for TikWM client operations.
pub const TRACING_TARGET: &str = "ttrelay_tikwm::client";

/// Inner client that holds the HTTP client and configuration.
struct TikwmClientInner {
    http: Client,
    config: TikwmClientConfig,
}

impl std::fmt::Debug for TikwmClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TikwmClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Client for the TikWM extraction API.
///
/// Translates a source page URL into a normalized [`VideoResult`] via exactly
/// one outbound call with a bounded timeout. The client never surfaces
/// transport or payload errors to callers; every failure mode collapses into
/// an absent result after being logged. There are no retries.
///
/// # Examples
///
/// ```rust,ignore
/// use ttrelay_tikwm::{TikwmClient, TikwmClientConfig};
///
/// let client = TikwmClient::new(TikwmClientConfig::default())?;
/// match client.fetch_video("https://www.tiktok.com/@user/video/123").await {
///     Some(result) => println!("resolved {}", result.video_url),
///     None => println!("extraction failed"),
/// }
/// ```
#[derive(Clone, Debug)]
pub struct TikwmClient {
    inner: Arc<TikwmClientInner>,
}

impl TikwmClient {
    /// Creates a new TikWM client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: TikwmClientConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis(),
            prefer_hd = config.prefer_hd,
            "creating TikWM client"
        );

        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.effective_user_agent())
            .build()?;

        let inner = TikwmClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new TikWM client with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(TikwmClientConfig::default())
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &TikwmClientConfig {
        &self.inner.config
    }

    /// Resolves a source page URL into a normalized [`VideoResult`].
    ///
    /// Returns `None` on any failure: network error, timeout, non-success
    /// HTTP status, malformed payload, embedded error status, or a payload
    /// without a playable URL. Failures are logged with detail for operator
    /// visibility but never propagate past this boundary.
    pub async fn fetch_video(&self, source_url: &str) -> Option<VideoResult> {
        match self.try_fetch(source_url).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    timeout = error.is_timeout(),
                    "TikWM request failed"
                );
                None
            }
        }
    }

    async fn try_fetch(&self, source_url: &str) -> Result<Option<VideoResult>> {
        let config = &self.inner.config;
        let hd = if config.prefer_hd { "1" } else { "0" };

        let response = self
            .inner
            .http
            .get(&config.base_url)
            .query(&[("url", source_url), ("hd", hd)])
            .send()
            .await?
            .error_for_status()?;

        // Parsed from text instead of `Response::json` so a malformed payload
        // can be logged with its leading bytes.
        let body = response.text().await?;
        let payload: TikwmResponse = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    body_prefix = body.chars().take(128).collect::<String>(),
                    "TikWM payload was not valid JSON"
                );
                return Err(error.into());
            }
        };

        if !payload.is_success() {
            tracing::debug!(
                target: TRACING_TARGET,
                code = payload.code,
                msg = payload.msg.as_deref().unwrap_or(""),
                "TikWM returned an embedded error status"
            );
        }

        Ok(payload.into_video_result())
    }
}
