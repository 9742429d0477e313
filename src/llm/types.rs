//! Request and response types for the OpenAI-style completion API

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// A single role/content pair sent to the completion endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of a `POST {base}/chat/completions` call
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

/// Relevant subset of the completion response. Every field defaults so a
/// sparse response degrades to an empty reply instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: AssistantReply,
}

/// The assistant's reply as returned by the first completion choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_constructors() {
        assert_eq!(ChatMessage::system("s").role, Role::System);
        assert_eq!(ChatMessage::user("u").role, Role::User);
        assert_eq!(ChatMessage::assistant("a").role, Role::Assistant);
    }

    #[test]
    fn test_completion_request_serialization() {
        let messages = vec![ChatMessage::user("hi")];
        let request = CompletionRequest {
            model: "gpt-4o",
            messages: &messages,
        };
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_completion_response_with_choice() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "hello");
    }

    #[test]
    fn test_completion_response_zero_choices_is_empty_reply() {
        let response: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let reply = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .unwrap_or_default();
        assert!(reply.role.is_empty());
        assert!(reply.content.is_empty());
    }

    #[test]
    fn test_completion_response_tolerates_missing_fields() {
        let response: CompletionResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.choices.is_empty());

        let response: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{}}]}"#).unwrap();
        assert!(response.choices[0].message.content.is_empty());
    }
}
