//! HTTP embedding provider.
//!
//! The single point of network I/O in the engine. Wraps a JSON embedding
//! endpoint with bounded retries and exponential backoff on 429/5xx; every
//! terminal failure surfaces as `EmbedError` and is absorbed upstream by the
//! degraded-weights path.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{EmbedError, EmbeddingProvider};

const MAX_RETRIES: u32 = 3;
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the embedding endpoint, loaded from the
/// environment by the hosting application.
#[derive(Debug, Clone)]
pub struct HttpEmbedderConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub dimension: usize,
}

impl HttpEmbedderConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Self {
            endpoint: require_env("EMBEDDER_ENDPOINT")?,
            api_key: std::env::var("EMBEDDER_API_KEY").ok(),
            model: std::env::var("EMBEDDER_MODEL")
                .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
            dimension: std::env::var("EMBEDDER_DIMENSION")
                .unwrap_or_else(|_| "1536".to_string())
                .parse::<usize>()
                .context("EMBEDDER_DIMENSION must be a positive integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

pub struct HttpEmbedder {
    client: Client,
    config: HttpEmbedderConfig,
}

impl HttpEmbedder {
    pub fn new(config: HttpEmbedderConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            config,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbedder {
    fn name(&self) -> &'static str {
        "http"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    /// Calls the embedding endpoint, retrying 429 and 5xx with exponential
    /// backoff before giving up.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let request_body = EmbedRequest {
            model: &self.config.model,
            input: text,
        };

        let mut last_error: Option<EmbedError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 500ms, 1s, 2s
                let delay = std::time::Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self
                .client
                .post(&self.config.endpoint)
                .header("content-type", "application/json");
            if let Some(api_key) = &self.config.api_key {
                request = request.bearer_auth(api_key);
            }

            let response = match request.json(&request_body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbedError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("embedding endpoint returned {status}: {body}");
                last_error = Some(EmbedError::Unavailable(format!("status {status}")));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(EmbedError::Unavailable(format!("status {status}: {body}")));
            }

            let parsed: EmbedResponse = response.json().await?;
            if parsed.embedding.is_empty() {
                return Err(EmbedError::EmptyVector);
            }

            debug!(dims = parsed.embedding.len(), "embedding call succeeded");
            return Ok(parsed.embedding);
        }

        Err(last_error
            .unwrap_or_else(|| EmbedError::Unavailable("retries exhausted".to_string())))
    }
}
