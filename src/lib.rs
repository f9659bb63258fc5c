pub mod client;
pub mod commands;
pub mod http;
pub mod runtime;

pub use client::{
    BatchError, BatchOutcome, ClientConfig, KnowledgeBase, KnowledgebaseInfo, ParamValue,
    QueryClient, QueryOptions, QueryResult,
};
pub use http::ApiError;
