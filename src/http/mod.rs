//! HTTP client module with error mapping.

mod client;
mod error;

pub use client::HttpClient;
pub use error::ApiError;
