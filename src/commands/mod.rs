//! Command implementations for the `yatti` binary.
//!
//! Every command is generic over [`KnowledgeBase`](crate::client::KnowledgeBase)
//! and writes to a caller-supplied writer.

use anyhow::anyhow;

use crate::http::ApiError;

mod batch;
pub mod config;
mod help;
mod info;
mod list;
mod output;
mod query;

pub use batch::{batch, load_questions};
pub use config::Config;
pub use help::api_help;
pub use info::info;
pub use list::list;
pub use query::query;

/// Wraps an API error with `context`, or with a not-found message naming
/// `kb` when the server answered 404.
pub(crate) fn with_kb_context(err: ApiError, kb: &str, context: &str) -> anyhow::Error {
    if err.is_not_found() {
        anyhow::Error::new(err).context(format!("Knowledgebase '{}' not found", kb))
    } else {
        anyhow::Error::new(err).context(context.to_string())
    }
}

/// Parses a `KEY=VALUE` extension parameter.
pub fn parse_param(s: &str) -> anyhow::Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid parameter '{}'. Expected KEY=VALUE.", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("Invalid parameter '{}'. Key must not be empty.", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("max_tokens=500").unwrap(),
            ("max_tokens".to_string(), "500".to_string())
        );
        assert_eq!(
            parse_param("filter=a=b").unwrap(),
            ("filter".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_param("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_param_invalid() {
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=value").is_err());
    }

    #[test]
    fn test_with_kb_context() {
        let err = with_kb_context(
            ApiError::Http {
                status: 404,
                body: String::new(),
            },
            "kbA",
            "Query failed",
        );
        assert_eq!(err.to_string(), "Knowledgebase 'kbA' not found");

        let err = with_kb_context(
            ApiError::InvalidInput("x".into()),
            "kbA",
            "Query failed",
        );
        assert_eq!(err.to_string(), "Query failed");
    }
}
