//! Search Service Client
//!
//! HTTP client for the legal provision search endpoint.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::{completions_url, CompletionBody, CompletionRequest, LegalResult};

/// Something that can answer a question with legal citations
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one query and return the matched provisions
    async fn complete(&self, request: &CompletionRequest) -> Result<Vec<LegalResult>, ClientError>;
}

/// Configuration for the search client
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "http://127.0.0.1:8000")
    pub base_url: String,
    /// Static access key sent as the `api_key` query parameter
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// reqwest-backed [`CompletionBackend`]
pub struct LegalSearchClient {
    client: Client,
    config: ClientConfig,
}

impl LegalSearchClient {
    /// Create a client. Requests carry no timeout.
    pub fn new(config: ClientConfig) -> Self {
        if config.api_key.is_none() {
            tracing::warn!("No API key configured; the search service will reject requests");
        }

        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full endpoint URL including the key
    fn endpoint(&self) -> String {
        completions_url(&self.config.base_url, self.config.api_key.as_deref())
    }
}

#[async_trait]
impl CompletionBackend for LegalSearchClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Vec<LegalResult>, ClientError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ClientError::Unavailable
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "Received search response");

        CompletionBody::parse(&body)?
            .into_results()
            .map_err(ClientError::Rejected)
    }
}

/// Errors that can occur when querying the search service
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Search service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}
