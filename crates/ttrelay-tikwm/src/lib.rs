#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod response;
mod types;

pub use crate::client::TikwmClient;
pub use crate::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TikwmClientConfig};
pub use crate::error::{Error, Result};
pub use crate::response::{TikwmAuthor, TikwmData, TikwmResponse};
pub use crate::types::{VideoResult, VideoStats};
