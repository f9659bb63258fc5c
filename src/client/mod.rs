//! Knowledgebase query API client.
//!
//! [`QueryClient`] turns method calls into authenticated GET requests against
//! the configured base URL and hands back the decoded JSON untouched.
//!
//! # Structure
//!
//! - `config` - API key and base URL
//! - `params` - query tuning options and their query-string encoding
//! - `types` - response wrappers and batch outcomes
//! - `batch` - sequential batch execution

mod batch;
mod config;
mod params;
mod types;

use async_trait::async_trait;
use log::debug;
use reqwest::Url;
use std::time::Duration;

use crate::http::{ApiError, HttpClient};

pub use batch::{BATCH_DELAY_MS, run_batch};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use params::{ParamValue, QueryOptions};
pub use types::{BatchError, BatchOutcome, KnowledgebaseInfo, QueryResult};

use types::KnowledgebaseList;

/// Single-request operations of the knowledgebase API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Base URL requests are sent to.
    fn base_url(&self) -> &str;

    /// Ask `question` against knowledgebase `kb`.
    async fn query(
        &self,
        kb: &str,
        question: &str,
        options: &QueryOptions,
    ) -> Result<QueryResult, ApiError>;

    /// List the knowledgebases available to this API key.
    async fn list_knowledgebases(&self) -> Result<Vec<KnowledgebaseInfo>, ApiError>;

    /// Fetch the API help document.
    async fn help(&self) -> Result<QueryResult, ApiError>;

    /// Fetch information about one knowledgebase.
    async fn kb_info(&self, kb: &str) -> Result<QueryResult, ApiError>;
}

/// HTTP implementation of [`KnowledgeBase`].
pub struct QueryClient {
    http_client: HttpClient,
    config: ClientConfig,
    batch_delay: Duration,
}

impl QueryClient {
    /// Creates a client. No request is sent until an operation is called.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        debug!(
            "Creating client for {} with API key {}",
            config.base_url(),
            config.masked_api_key()
        );
        let http_client = HttpClient::with_bearer_token(config.api_key())?;
        Ok(Self {
            http_client,
            config,
            batch_delay: Duration::from_millis(BATCH_DELAY_MS),
        })
    }

    /// Overrides the pause between batch calls.
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn batch_delay(&self) -> Duration {
        self.batch_delay
    }

    /// Runs `questions` sequentially against `kb` with shared `options`.
    ///
    /// Never fails as a whole; see [`run_batch`].
    #[tracing::instrument(skip(self, questions, options))]
    pub async fn batch_query<S: AsRef<str>>(
        &self,
        kb: &str,
        questions: &[S],
        options: &QueryOptions,
    ) -> Vec<BatchOutcome> {
        run_batch(self, kb, questions, options, self.batch_delay).await
    }

    fn url(&self, segments: &[&str]) -> Result<String, ApiError> {
        endpoint_url(self.config.base_url(), segments)
    }
}

/// Appends `segments` to `base`, each percent-encoded as one path segment.
fn endpoint_url(base: &str, segments: &[&str]) -> Result<String, ApiError> {
    let mut url = Url::parse(base)
        .map_err(|e| ApiError::InvalidInput(format!("invalid base URL '{}': {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidInput(format!("invalid base URL '{}'", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

fn require_kb(kb: &str) -> Result<(), ApiError> {
    if kb.is_empty() {
        return Err(ApiError::InvalidInput(
            "knowledgebase name must not be empty".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl KnowledgeBase for QueryClient {
    fn base_url(&self) -> &str {
        self.config.base_url()
    }

    #[tracing::instrument(skip(self, options))]
    async fn query(
        &self,
        kb: &str,
        question: &str,
        options: &QueryOptions,
    ) -> Result<QueryResult, ApiError> {
        require_kb(kb)?;
        let pairs = options.to_query_pairs(question);
        self.http_client
            .get_json_with_query(&self.url(&[kb])?, &pairs)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn list_knowledgebases(&self) -> Result<Vec<KnowledgebaseInfo>, ApiError> {
        let list: KnowledgebaseList = self
            .http_client
            .get_json(&self.url(&["list"])?)
            .await?;
        let knowledgebases = list.knowledgebases.unwrap_or_default();
        debug!("Found {} knowledgebase(s)", knowledgebases.len());
        Ok(knowledgebases)
    }

    #[tracing::instrument(skip(self))]
    async fn help(&self) -> Result<QueryResult, ApiError> {
        self.http_client.get_json(&self.url(&["help"])?).await
    }

    #[tracing::instrument(skip(self))]
    async fn kb_info(&self, kb: &str) -> Result<QueryResult, ApiError> {
        require_kb(kb)?;
        self.http_client
            .get_json(&self.url(&[kb, "info"])?)
            .await
    }
}
