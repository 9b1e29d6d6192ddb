//! Middleware for `axum::Router` and HTTP request processing.
//!
//! This module provides middleware for:
//! - Rate limiting (per-IP admission control)
//! - Error handling (panics, timeouts)
//! - Security (CORS)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ttrelay_server::handler::routes;
//! use ttrelay_server::middleware::{RouterRateLimitExt, RouterRecoveryExt, RouterSecurityExt};
//! use ttrelay_server::service::{ServiceConfig, ServiceState};
//!
//! # fn example() -> ttrelay_server::Result<()> {
//! let state = ServiceState::from_config(&ServiceConfig::default())?;
//!
//! let app = routes(state.clone())
//!     .with_rate_limiting(state)
//!     .with_permissive_cors()
//!     .with_default_recovery();
//! # Ok(())
//! # }
//! ```

mod rate_limiting;
mod recovery;
mod security;

pub use rate_limiting::{RouterRateLimitExt, rate_limit_by_ip};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::RouterSecurityExt;
