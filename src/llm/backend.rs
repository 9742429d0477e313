//! Backend trait for completion implementations

use async_trait::async_trait;

use super::error::CompletionError;
use super::types::{AssistantReply, ChatMessage};

/// Interface the handlers use to obtain completions.
///
/// The production implementation is [`super::CompletionClient`]; tests
/// substitute canned backends.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send an ordered message list to the completion endpoint and return
    /// the assistant's reply.
    ///
    /// `model` overrides the configured default when given.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: Option<&str>,
    ) -> Result<AssistantReply, CompletionError>;
}
