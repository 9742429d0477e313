//! Completion endpoint client layer

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use backend::CompletionBackend;
pub use client::CompletionClient;
pub use config::LlmConfig;
pub use error::CompletionError;
pub use types::{AssistantReply, ChatMessage};
