use serde::{Deserialize, Serialize};

use crate::handler::{ErrorKind, Result};

/// Domain substring a source URL must contain to be accepted.
const RECOGNIZED_DOMAIN: &str = "tiktok.com";

/// Request body of `POST /api/download`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Source page URL to resolve.
    pub url: Option<String>,
}

impl DownloadRequest {
    /// Validates the request and returns the accepted source URL.
    ///
    /// The URL must be present, non-empty, and contain the recognized domain
    /// substring. Nothing else is checked and the URL is never rewritten; the
    /// verbatim text becomes the cache key downstream.
    pub fn validated_url(&self) -> Result<&str> {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() && url.contains(RECOGNIZED_DOMAIN) => Ok(url),
            _ => Err(ErrorKind::InvalidVideoUrl.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: Option<&str>) -> DownloadRequest {
        DownloadRequest {
            url: url.map(str::to_owned),
        }
    }

    #[test]
    fn test_accepts_recognized_domain() {
        let request = request(Some("https://www.tiktok.com/@user/video/123"));
        assert_eq!(
            request.validated_url().expect("accepted"),
            "https://www.tiktok.com/@user/video/123"
        );
    }

    #[test]
    fn test_rejects_missing_url() {
        assert!(request(None).validated_url().is_err());
    }

    #[test]
    fn test_rejects_empty_url() {
        assert!(request(Some("")).validated_url().is_err());
    }

    #[test]
    fn test_rejects_unrecognized_domain() {
        assert!(request(Some("https://example.com/watch?v=1")).validated_url().is_err());
    }
}
