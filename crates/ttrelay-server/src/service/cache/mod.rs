//! Cache management services and utilities.
//!
//! All cache implementations use atomic counters and are thread-safe.
//!
//! ## Available Services
//!
//! - [`VideoCache`] - extraction result caching with a fixed TTL

mod video_cache;

pub use video_cache::{CacheStats, DEFAULT_TTL, VideoCache, cache_key};
