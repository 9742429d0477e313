//! Keyword-based intent routing for the workflow chat
//!
//! Static dispatch, not inference: an ordered list of predicate/template
//! rules is checked against the inbound text, first match wins, and the
//! fallback produces a generic "message" response with guide topics. The
//! rule list is data so the matching strategy can be swapped without
//! touching the session or streaming machinery.

use serde_json::json;

use crate::models::ExtItem;

pub const TYPE_WORKFLOW_OPTION: &str = "workflow_option";
pub const TYPE_NODE_RECOMMEND: &str = "downstream_node_recommend";
pub const TYPE_MESSAGE: &str = "message";

/// Response type tag plus the extension payloads to attach before the
/// text-streaming phase begins
#[derive(Debug, Clone)]
pub struct RoutedIntent {
    pub response_type: String,
    pub ext: Vec<ExtItem>,
}

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;
type Template = Box<dyn Fn() -> RoutedIntent + Send + Sync>;

pub struct IntentRule {
    matches: Predicate,
    respond: Template,
}

impl IntentRule {
    /// Rule that fires on case-insensitive substring containment
    pub fn keyword(
        keyword: &'static str,
        respond: impl Fn() -> RoutedIntent + Send + Sync + 'static,
    ) -> Self {
        Self {
            matches: Box::new(move |text| text.to_lowercase().contains(keyword)),
            respond: Box::new(respond),
        }
    }
}

pub struct IntentRouter {
    rules: Vec<IntentRule>,
    fallback: Template,
}

impl IntentRouter {
    pub fn new(rules: Vec<IntentRule>, fallback: impl Fn() -> RoutedIntent + Send + Sync + 'static) -> Self {
        Self {
            rules,
            fallback: Box::new(fallback),
        }
    }

    pub fn route(&self, text: &str) -> RoutedIntent {
        for rule in &self.rules {
            if (rule.matches)(text) {
                return (rule.respond)();
            }
        }
        (self.fallback)()
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new(
            vec![
                IntentRule::keyword("workflow", workflow_intent),
                IntentRule::keyword("recommend", node_recommend_intent),
            ],
            guide_intent,
        )
    }
}

/// Suggest a workflow template
fn workflow_intent() -> RoutedIntent {
    RoutedIntent {
        response_type: TYPE_WORKFLOW_OPTION.to_string(),
        ext: vec![ExtItem {
            kind: "workflows".to_string(),
            data: json!([{
                "name": "basic_image_gen",
                "description": "Create a basic image generation workflow",
                "image": "https://placehold.co/600x400",
                "workflow": "{\"nodes\":[],\"links\":[]}",
            }]),
        }],
    }
}

/// Recommend downstream nodes, split by whether they are already installed
fn node_recommend_intent() -> RoutedIntent {
    RoutedIntent {
        response_type: TYPE_NODE_RECOMMEND.to_string(),
        ext: vec![ExtItem {
            kind: "node_info".to_string(),
            data: json!({
                "existing_nodes": [
                    {
                        "name": "LoraLoader",
                        "description": "Load LoRA weights for conditioning.",
                        "image": "",
                        "github_url": "https://github.com/CompVis/taming-transformers",
                        "from_index": 0,
                        "to_index": 0,
                    },
                    {
                        "name": "KSampler",
                        "description": "Generate images using K-diffusion sampling.",
                        "image": "",
                        "github_url": "https://github.com/CompVis/taming-transformers",
                        "from_index": 0,
                        "to_index": 0,
                    },
                ],
                "missing_nodes": [
                    {
                        "name": "CLIPTextEncode",
                        "description": "Encode text prompts for conditioning.",
                        "image": "",
                        "github_url": "https://github.com/CompVis/clip-interrogator",
                        "from_index": 0,
                        "to_index": 0,
                    },
                ],
            }),
        }],
    }
}

/// Generic response with the fixed guide topics
fn guide_intent() -> RoutedIntent {
    RoutedIntent {
        response_type: TYPE_MESSAGE.to_string(),
        ext: vec![ExtItem {
            kind: "guides".to_string(),
            data: json!(["General Chat", "Query Node", "Query Model", "Query Workflow"]),
        }],
    }
}
