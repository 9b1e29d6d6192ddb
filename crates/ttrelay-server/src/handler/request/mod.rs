//! Request body types for the HTTP surface.

mod download;

pub use download::DownloadRequest;
