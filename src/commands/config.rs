use anyhow::{Context, Result};
use log::debug;

use crate::{
    client::{ClientConfig, DEFAULT_BASE_URL, QueryClient},
    runtime::Runtime,
};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "YATTI_API_KEY";

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Resolves settings from command-line values, falling back to the
    /// environment for the API key and to the production URL.
    pub fn load<R: Runtime>(
        runtime: &R,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self> {
        let api_key = match api_key.filter(|k| !k.is_empty()) {
            Some(key) => key,
            None => runtime
                .env_var(API_KEY_ENV)
                .ok()
                .filter(|k| !k.is_empty())
                .with_context(|| {
                    format!(
                        "No API key given. Pass --api-key or set {} environment variable.",
                        API_KEY_ENV
                    )
                })?,
        };

        let base_url = base_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        debug!("Using API endpoint {}", base_url);

        Ok(Self { api_key, base_url })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::with_base_url(self.api_key.clone(), &self.base_url)
    }

    pub fn build_client(&self) -> Result<QueryClient> {
        QueryClient::new(self.client_config()).context("Failed to create API client")
    }
}
