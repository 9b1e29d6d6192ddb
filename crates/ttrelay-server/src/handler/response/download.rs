use serde::{Deserialize, Serialize};
use ttrelay_tikwm::VideoResult;

/// Successful response body of `POST /api/download`.
///
/// The normalized result is flattened into the body next to the `success`
/// flag. `cached` is only present (and `true`) when the result came out of
/// the cache; fresh results omit the field entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResponse {
    /// Always `true` for successful responses.
    pub success: bool,
    /// The normalized extraction result.
    #[serde(flatten)]
    pub video: VideoResult,
    /// Present and `true` when served from the cache.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

impl DownloadResponse {
    /// Wraps a result fetched from the upstream on this request.
    pub fn fresh(video: VideoResult) -> Self {
        Self {
            success: true,
            video,
            cached: None,
        }
    }

    /// Wraps a result served from the cache.
    pub fn cached(video: VideoResult) -> Self {
        Self {
            success: true,
            video,
            cached: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use ttrelay_tikwm::VideoStats;

    use super::*;

    fn sample_result() -> VideoResult {
        VideoResult {
            video_url: "http://x/video.mp4".to_owned(),
            video_url_watermark: None,
            audio_url: None,
            cover_url: None,
            title: Some("t".to_owned()),
            author: Some("A".to_owned()),
            stats: VideoStats {
                plays: Some(5),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_fresh_response_omits_cached_flag() {
        let json = serde_json::to_value(DownloadResponse::fresh(sample_result()))
            .expect("serializes");

        assert_eq!(json["success"], true);
        assert_eq!(json["video_url"], "http://x/video.mp4");
        assert_eq!(json["stats"]["plays"], 5);
        assert!(json.get("cached").is_none());
    }

    #[test]
    fn test_cached_response_carries_flag() {
        let json = serde_json::to_value(DownloadResponse::cached(sample_result()))
            .expect("serializes");

        assert_eq!(json["cached"], true);
    }
}
