//! Response body types for the HTTP surface.

mod download;
mod error_response;
mod monitor;

pub use download::DownloadResponse;
pub use error_response::ErrorResponse;
pub use monitor::HealthResponse;
