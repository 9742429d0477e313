//! HTTP client for the upstream completion endpoint

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use super::backend::CompletionBackend;
use super::config::LlmConfig;
use super::error::CompletionError;
use super::types::{AssistantReply, ChatMessage, CompletionRequest, CompletionResponse};

/// Client for an OpenAI-style `/chat/completions` endpoint
pub struct CompletionClient {
    http_client: Client,
    config: LlmConfig,
}

impl CompletionClient {
    /// Build a client with the configured total-request timeout.
    pub fn new(config: LlmConfig) -> Result<Self, CompletionError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            config,
        })
    }

    fn resolve_model<'a>(&'a self, model: Option<&'a str>) -> &'a str {
        match model {
            Some(m) if !m.is_empty() => m,
            _ => &self.config.default_model,
        }
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: Option<&str>,
    ) -> Result<AssistantReply, CompletionError> {
        let model = self.resolve_model(model);
        let url = format!("{}/chat/completions", self.config.api_base);
        let payload = CompletionRequest { model, messages };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "completion endpoint returned an error");
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<CompletionResponse>(&body) {
            Ok(parsed) => Ok(parsed
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message)
                .unwrap_or_default()),
            Err(err) => {
                warn!(%err, "completion endpoint returned unparseable JSON");
                Err(CompletionError::InvalidResponse { body })
            }
        }
    }
}
