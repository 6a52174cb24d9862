//! One-shot CLI command implementations.

pub mod auth;
pub mod config;
pub mod quote;

use anyhow::Result;
use qotd_core::api::ApiClient;
use qotd_core::config::Config;

/// Builds the API client from config (base URL resolution: env > config).
pub(crate) fn api_client(config: &Config) -> Result<ApiClient> {
    let base_url = config.resolve_base_url()?;
    ApiClient::new(&base_url, config.request_timeout())
}
