// GET /api/gpt/models handler

use std::convert::Infallible;

use crate::models::{ModelInfo, ModelsReply};

/// The models offered to the front-end model picker. Static, stateless.
pub fn available_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            id: "deepseek-r1",
            name: "DeepSeek-R1",
            description: "DeepSeek R1 reasoning model",
        },
        ModelInfo {
            id: "claude-3-5-sonnet",
            name: "Claude 3.5 Sonnet",
            description: "Anthropic Claude 3.5 Sonnet",
        },
        ModelInfo {
            id: "claude-3-7",
            name: "Claude 3.7",
            description: "Anthropic Claude 3.7",
        },
        ModelInfo {
            id: "gpt-4o",
            name: "GPT-4o",
            description: "OpenAI GPT-4o",
        },
    ]
}

pub async fn models_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&ModelsReply {
        models: available_models(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_list_is_non_empty_and_stable() {
        let first = available_models();
        let second = available_models();
        assert!(!first.is_empty());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
