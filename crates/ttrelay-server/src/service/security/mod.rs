//! Admission control services.

mod rate_limiter;

pub use rate_limiter::{RateLimitConfig, RateLimitKey, RateLimiter};
