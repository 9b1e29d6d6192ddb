//! Request extractors with error handling aligned to the relay's wire format.

mod json;

pub use json::Json;
