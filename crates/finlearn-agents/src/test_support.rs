//! Test support: a scripted generation service and canned plan payloads.
//!
//! `ScriptedGenerator` stands in for the Gemini backend. It hands out
//! responses in order and records every prompt it receives, so tests can
//! assert both on pipeline output and on what was asked of the model.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AgentError;
use crate::generation::GenerationService;

pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    failure: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Returns each response once, in order.
    pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with a service error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            failure: Some(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl GenerationService for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, AgentError> {
        self.prompts.lock().await.push(prompt.to_string());

        if let Some(message) = &self.failure {
            return Err(AgentError::Service(message.clone()));
        }
        self.responses
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| AgentError::Service("no scripted response left".to_string()))
    }
}

/// A well-formed plan for "how to start trading stocks", wrapped in a code
/// fence the way the model usually returns it.
pub fn sample_strategy_json() -> String {
    let plan = serde_json::json!({
        "intent": "Learn How to Start Trading Stocks",
        "keyTopics": [
            "stock market basics",
            "brokerage account setup",
            "order types",
            "risk management"
        ],
        "proposedTitle": "How to Start Trading Stocks: A Beginner's Guide",
        "contentOutline": [
            "Introduction",
            "Basic Concepts",
            "Opening a Brokerage Account",
            "Understanding Order Types",
            "Managing Risk",
            "Placing Your First Trade",
            "Conclusion"
        ],
        "contentType": "guide",
        "keywords": ["how to trade stocks", "stock trading for beginners", "brokerage account"]
    });
    format!("```json\n{plan:#}\n```")
}

/// A plan for an options query whose outline is short and has no terms section.
pub fn options_strategy_json() -> String {
    serde_json::json!({
        "intent": "Understand Options Trading",
        "keyTopics": ["options", "risk management"],
        "proposedTitle": "Options Trading Explained",
        "contentOutline": ["Introduction", "What Are Options", "Conclusion"],
        "contentType": "article",
        "keywords": ["options trading"]
    })
    .to_string()
}
