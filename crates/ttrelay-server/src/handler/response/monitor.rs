use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::service::CacheStats;

/// Response body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Fixed liveness marker.
    pub status: String,
    /// Current cache counters.
    pub cache_stats: CacheStats,
    /// Server time at the moment of the check, ISO-8601.
    pub timestamp: Timestamp,
}

impl HealthResponse {
    /// Builds an "ok" report around the given cache counters.
    pub fn ok(cache_stats: CacheStats) -> Self {
        Self {
            status: "ok".to_owned(),
            cache_stats,
            timestamp: Timestamp::now(),
        }
    }
}
