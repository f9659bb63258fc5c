//! JSON-over-HTTP client with bearer authentication and status mapping.

use log::debug;
use reqwest::{
    Client, RequestBuilder,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

const USER_AGENT: &str = concat!("yatti-cli/", env!("CARGO_PKG_VERSION"));

/// HTTP client that sends GET requests and decodes JSON responses.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client that sends `Authorization: Bearer <token>` and JSON
    /// accept/content-type headers on every request.
    pub fn with_bearer_token(token: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidInput("API key is not a valid header value".into()))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        debug!("HTTP client configured with authentication");
        Ok(Self::new(client))
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET JSON from {}...", url);
        self.send_json(self.client.get(url)).await
    }

    /// Performs a GET request with query parameters and deserializes the JSON response.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        debug!("GET JSON from {} with query {:?}...", url, query);
        self.send_json(self.client.get(url).query(query)).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: a body that cannot be read still yields the status.
            let body = response.text().await.unwrap_or_default();
            debug!("Request failed with HTTP {}", status.as_u16());
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
