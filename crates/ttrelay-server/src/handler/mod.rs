//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use ttrelay_server::handler::routes;
//! use ttrelay_server::service::{ServiceConfig, ServiceState};
//!
//! # fn example() -> ttrelay_server::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config)?;
//!
//! let router = routes(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
mod request;
mod response;
#[cfg(test)]
pub(crate) mod test;
mod videos;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::DownloadRequest;
pub use crate::handler::response::{DownloadResponse, ErrorResponse, HealthResponse};
use crate::service::ServiceState;

#[inline]
async fn fallback_handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all relay routes under `/api`.
fn api_routes() -> Router<ServiceState> {
    Router::new()
        .merge(videos::routes())
        .merge(monitors::routes())
}

/// Returns a [`Router`] with the complete HTTP surface, state applied.
///
/// Rate limiting and the outer middleware layers (recovery, CORS) are
/// applied by the binary on top of this router.
///
/// [`Router`]: axum::routing::Router
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .fallback(fallback_handler)
        .with_state(state)
}
