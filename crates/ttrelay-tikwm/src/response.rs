//! Wire model of the TikWM API response.
//!
//! The upstream schema is consumed as-is: a numeric status code, an optional
//! message, and a nested data object whose fields may all be absent. Every
//! field is modeled explicitly as an `Option` so the mapping into
//! [`VideoResult`] is exhaustive rather than relying on lookups that silently
//! swallow shape changes.

use serde::Deserialize;

use crate::types::{VideoResult, VideoStats};

/// Status code the upstream embeds in a successful response body.
const STATUS_OK: i64 = 0;

/// Top-level TikWM response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TikwmResponse {
    /// Embedded status code; `0` means success.
    pub code: i64,
    /// Human-readable status message.
    #[serde(default)]
    pub msg: Option<String>,
    /// Extraction payload, absent on errors.
    #[serde(default)]
    pub data: Option<TikwmData>,
}

/// Extraction payload of a TikWM response.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TikwmData {
    /// High-definition rendition URL.
    #[serde(default)]
    pub hdplay: Option<String>,
    /// Standard rendition URL.
    #[serde(default)]
    pub play: Option<String>,
    /// Watermarked rendition URL.
    #[serde(default)]
    pub wmplay: Option<String>,
    /// Audio track URL.
    #[serde(default)]
    pub music: Option<String>,
    /// Cover image URL.
    #[serde(default)]
    pub cover: Option<String>,
    /// Video title.
    #[serde(default)]
    pub title: Option<String>,
    /// Author record.
    #[serde(default)]
    pub author: Option<TikwmAuthor>,
    /// Play count.
    #[serde(default)]
    pub play_count: Option<u64>,
    /// Like count.
    #[serde(default)]
    pub digg_count: Option<u64>,
    /// Comment count.
    #[serde(default)]
    pub comment_count: Option<u64>,
    /// Share count.
    #[serde(default)]
    pub share_count: Option<u64>,
}

/// Author record nested in a TikWM payload.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TikwmAuthor {
    /// Display name.
    #[serde(default)]
    pub nickname: Option<String>,
    /// Stable handle, used as a fallback display name.
    #[serde(default)]
    pub unique_id: Option<String>,
}

/// Drops empty strings, which the upstream emits for missing URLs.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl TikwmResponse {
    /// Returns `true` if the embedded status code signals success and a
    /// payload is present.
    pub fn is_success(&self) -> bool {
        self.code == STATUS_OK && self.data.is_some()
    }

    /// Maps a structurally successful response into a [`VideoResult`].
    ///
    /// Returns `None` when the embedded status code signals an error, the
    /// payload is absent, or no playable URL is present. The HD rendition is
    /// preferred, falling back to the standard one.
    pub fn into_video_result(self) -> Option<VideoResult> {
        if self.code != STATUS_OK {
            return None;
        }

        let data = self.data?;
        let video_url = non_empty(data.hdplay).or_else(|| non_empty(data.play))?;

        let author = data
            .author
            .and_then(|author| non_empty(author.nickname).or_else(|| non_empty(author.unique_id)));

        Some(VideoResult {
            video_url,
            video_url_watermark: non_empty(data.wmplay),
            audio_url: non_empty(data.music),
            cover_url: non_empty(data.cover),
            title: non_empty(data.title),
            author,
            stats: VideoStats {
                plays: data.play_count,
                likes: data.digg_count,
                comments: data.comment_count,
                shares: data.share_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> TikwmResponse {
        serde_json::from_str(json).expect("valid response JSON")
    }

    #[test]
    fn test_maps_successful_response() {
        let response = parse(
            r#"{
                "code": 0,
                "msg": "success",
                "data": {
                    "play": "http://x/video.mp4",
                    "wmplay": "http://x/wm.mp4",
                    "music": "http://x/audio.mp3",
                    "cover": "http://x/cover.jpg",
                    "title": "t",
                    "author": {"nickname": "A", "unique_id": "a_id"},
                    "play_count": 5,
                    "digg_count": 2,
                    "comment_count": 1,
                    "share_count": 0
                }
            }"#,
        );
        assert!(response.is_success());

        let result = response.into_video_result().expect("valid result");
        assert_eq!(result.video_url, "http://x/video.mp4");
        assert_eq!(result.video_url_watermark.as_deref(), Some("http://x/wm.mp4"));
        assert_eq!(result.audio_url.as_deref(), Some("http://x/audio.mp3"));
        assert_eq!(result.cover_url.as_deref(), Some("http://x/cover.jpg"));
        assert_eq!(result.title.as_deref(), Some("t"));
        assert_eq!(result.author.as_deref(), Some("A"));
        assert_eq!(result.stats.plays, Some(5));
        assert_eq!(result.stats.shares, Some(0));
    }

    #[test]
    fn test_prefers_hd_rendition() {
        let response = parse(
            r#"{"code": 0, "data": {"hdplay": "http://x/hd.mp4", "play": "http://x/sd.mp4"}}"#,
        );
        let result = response.into_video_result().expect("valid result");
        assert_eq!(result.video_url, "http://x/hd.mp4");
    }

    #[test]
    fn test_empty_hd_falls_back_to_standard() {
        let response =
            parse(r#"{"code": 0, "data": {"hdplay": "", "play": "http://x/sd.mp4"}}"#);
        let result = response.into_video_result().expect("valid result");
        assert_eq!(result.video_url, "http://x/sd.mp4");
    }

    #[test]
    fn test_author_falls_back_to_unique_id() {
        let response = parse(
            r#"{"code": 0, "data": {"play": "http://x/v.mp4", "author": {"unique_id": "a_id"}}}"#,
        );
        let result = response.into_video_result().expect("valid result");
        assert_eq!(result.author.as_deref(), Some("a_id"));
    }

    #[test]
    fn test_missing_stats_stay_unknown() {
        let response = parse(r#"{"code": 0, "data": {"play": "http://x/v.mp4"}}"#);
        let result = response.into_video_result().expect("valid result");
        assert_eq!(result.stats, VideoStats::default());
    }

    #[test]
    fn test_error_code_yields_none() {
        let response = parse(r#"{"code": -1, "msg": "Url parsing is failed!"}"#);
        assert!(!response.is_success());
        assert!(response.into_video_result().is_none());
    }

    #[test]
    fn test_missing_payload_yields_none() {
        let response = parse(r#"{"code": 0}"#);
        assert!(response.into_video_result().is_none());
    }

    #[test]
    fn test_payload_without_playable_url_yields_none() {
        let response = parse(r#"{"code": 0, "data": {"title": "t"}}"#);
        assert!(response.into_video_result().is_none());
    }
}
