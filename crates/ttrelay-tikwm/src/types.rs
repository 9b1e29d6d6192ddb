//! Normalized extraction result types.

use serde::{Deserialize, Serialize};

/// Normalized result of a successful extraction.
///
/// Every field except [`video_url`] is optional; absent fields are omitted
/// from the serialized form rather than rendered as nulls. A result is only
/// considered valid when the primary video URL is present, which the client
/// enforces before handing a result out.
///
/// [`video_url`]: VideoResult::video_url
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    /// Primary (watermark-free) video URL.
    pub video_url: String,
    /// Watermarked video URL, when the upstream provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url_watermark: Option<String>,
    /// Extracted audio track URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Cover image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// Video title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Engagement counters.
    pub stats: VideoStats,
}

/// Engagement counters attached to a [`VideoResult`].
///
/// Counters the upstream did not report are `None` ("unknown"), never zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStats {
    /// Play count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plays: Option<u64>,
    /// Like count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    /// Comment count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    /// Share count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
}
