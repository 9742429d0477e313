//! Conversation assembly
//!
//! Pure functions that turn stored history into the outbound message list
//! for the completion endpoint: exactly one system preamble up front, then
//! the prior user/assistant turns in original order.

use crate::llm::ChatMessage;
use crate::models::{Message, Role};

/// Preamble for the general chat endpoints
pub const GENERAL_PREAMBLE: &str = "You are ComfyUI-GPT, an assistant that helps people use ComfyUI. \
     You can explain nodes, recommend workflows, and give usage advice. \
     Keep answers concise, accurate, and helpful.";

/// Preamble for the workflow generation endpoint
pub const WORKFLOW_PREAMBLE: &str = "You are ComfyUI-GPT, an assistant that helps people use ComfyUI. \
     The user is asking about workflows or nodes.";

/// Preamble for node explanation, parameterized by the node in question
pub fn node_preamble(node_type: &str) -> String {
    format!(
        "You are ComfyUI-GPT, an assistant that helps people use ComfyUI. \
         The user is asking about the '{node_type}' node. Explain what the \
         node does, describe its parameters, and give typical usage scenarios."
    )
}

/// Build the outbound message list for a completion call.
///
/// The preamble is always the single leading system entry; system turns
/// already present in the history are dropped so the preamble is never
/// duplicated.
pub fn build_prompt(history: &[Message], preamble: &str) -> Vec<ChatMessage> {
    let mut prompt = Vec::with_capacity(history.len() + 1);
    prompt.push(ChatMessage::system(preamble));
    prompt.extend(
        history
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| ChatMessage {
                role: m.role,
                content: m.content.clone(),
            }),
    );
    prompt
}
