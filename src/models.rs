// Wire types shared by the HTTP surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::AssistantReply;

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Parse a role string; unknown roles yield `None` so callers can skip them
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "system" => Some(Role::System),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One stored conversation turn; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One unit of a streamed chat response, serialized as a single JSON line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatFrame {
    pub session_id: String,
    pub text: String,
    pub finished: bool,
    #[serde(rename = "type")]
    pub response_type: String,
    pub format: String,
    pub ext: Option<Vec<ExtItem>>,
}

/// Typed auxiliary payload attached to a chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: serde_json::Value,
}

// Request Types

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    pub model: Option<String>,
}

/// Caller-supplied conversation turn; role kept as a string so unknown
/// roles are skipped rather than rejecting the whole request
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowGenRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainNodeRequest {
    pub session_id: Option<String>,
    pub node_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvokeRequest {
    pub session_id: Option<String>,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchMessagesQuery {
    pub session_id: Option<String>,
}

// Response Types

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub session_id: String,
    pub message: AssistantReply,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelsReply {
    pub models: Vec<ModelInfo>,
}
