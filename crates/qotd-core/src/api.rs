//! HTTP client for the quote service.
//!
//! Three exchanges, each a single request/response: token issuance
//! (`POST /token`), registration (`POST /register`), and the authenticated
//! quote fetch (`GET /quote`). Outcomes are classified into the `ApiError`
//! taxonomy; server error bodies are only surfaced where the contract says
//! so (registration), never as raw transport errors.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Fixed fallback when a registration error body cannot be interpreted.
const REGISTER_FALLBACK: &str = "registration failed";

/// Outcome classification for the three exchanges.
///
/// All variants are terminal at the UI boundary: rendered as a single
/// user-facing message, never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The service rejected the login credentials (non-2xx on /token).
    #[error("login failed, check credentials")]
    AuthRejected,

    /// Registration input rejected by the server, message already flattened.
    #[error("{0}")]
    ValidationFailed(String),

    /// Server-reported domain error while fetching a quote (HTTP 200 body).
    #[error("{0}")]
    Content(String),

    /// Network failure or malformed response, any exchange.
    #[error("connection problem")]
    Transport,
}

impl ApiError {
    /// User-facing message for quote-fetch outcomes.
    ///
    /// The transport message for fetches asks the user to retry shortly;
    /// other kinds render their normal message.
    pub fn quote_message(&self) -> String {
        match self {
            ApiError::Transport => "connection problem, retry shortly".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    quote: Option<String>,
}

/// Registration error body: `{"detail": ...}` where detail is either a
/// plain message or an ordered list of validation errors.
#[derive(Debug, Deserialize)]
struct RegisterErrorBody {
    detail: RegisterErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegisterErrorDetail {
    Message(String),
    Validation(Vec<ValidationItem>),
}

#[derive(Debug, Deserialize)]
struct ValidationItem {
    msg: String,
}

impl RegisterErrorDetail {
    /// Flattens the detail into one user-facing message.
    fn into_message(self) -> String {
        match self {
            RegisterErrorDetail::Message(msg) if !msg.is_empty() => msg,
            RegisterErrorDetail::Validation(items) if !items.is_empty() => items
                .into_iter()
                .map(|item| item.msg)
                .collect::<Vec<_>>()
                .join(", "),
            _ => REGISTER_FALLBACK.to_string(),
        }
    }
}

/// Client for the quote service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// The server's error body is intentionally not surfaced here: rejected
    /// credentials and transport failures map to two fixed messages.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(format!("{}/token", self.base_url))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "login transport failure");
                ApiError::Transport
            })?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "login rejected");
            return Err(ApiError::AuthRejected);
        }

        let token_data: TokenResponse = response.json().await.map_err(|e| {
            tracing::debug!(error = %e, "malformed token response");
            ApiError::Transport
        })?;

        if token_data.access_token.is_empty() {
            return Err(ApiError::Transport);
        }
        Ok(token_data.access_token)
    }

    /// Registers a new account. Never yields a credential.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/register", self.base_url))
            .query(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "register transport failure");
                ApiError::Transport
            })?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, "register rejected");

        let message = serde_json::from_str::<RegisterErrorBody>(&body)
            .map(|b| b.detail.into_message())
            .unwrap_or_else(|_| REGISTER_FALLBACK.to_string());
        Err(ApiError::ValidationFailed(message))
    }

    /// Fetches a quote with the bearer credential attached.
    ///
    /// The service reports domain errors inside an HTTP 200 body (`{error}`);
    /// those become `Content`. A body with neither field, a non-JSON body, or
    /// a network failure is `Transport`.
    pub async fn fetch_quote(&self, token: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .get(format!("{}/quote", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "quote transport failure");
                ApiError::Transport
            })?;

        let payload: QuoteResponse = response.json().await.map_err(|e| {
            tracing::debug!(error = %e, "malformed quote response");
            ApiError::Transport
        })?;

        if let Some(error) = payload.error {
            return Err(ApiError::Content(error));
        }
        match payload.quote {
            Some(quote) => Ok(quote),
            None => Err(ApiError::Transport),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            ApiError::AuthRejected.to_string(),
            "login failed, check credentials"
        );
        assert_eq!(ApiError::Transport.to_string(), "connection problem");
        assert_eq!(
            ApiError::Transport.quote_message(),
            "connection problem, retry shortly"
        );
        assert_eq!(
            ApiError::Content("no quote available".into()).quote_message(),
            "no quote available"
        );
    }

    #[test]
    fn test_register_detail_message_is_verbatim() {
        let body: RegisterErrorBody =
            serde_json::from_str(r#"{"detail":"Username already registered"}"#).unwrap();
        assert_eq!(body.detail.into_message(), "Username already registered");
    }

    #[test]
    fn test_register_detail_list_joins_messages() {
        let body: RegisterErrorBody =
            serde_json::from_str(r#"{"detail":[{"msg":"a"},{"msg":"b"}]}"#).unwrap();
        assert_eq!(body.detail.into_message(), "a, b");
    }

    #[test]
    fn test_register_detail_empty_list_falls_back() {
        let body: RegisterErrorBody = serde_json::from_str(r#"{"detail":[]}"#).unwrap();
        assert_eq!(body.detail.into_message(), REGISTER_FALLBACK);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/", None).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
