use std::sync::Arc;

use async_trait::async_trait;
use finlearn_models::agent_message::ContentStrategy;
use finlearn_models::content_request::{ContentType, Query};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::agent::Agent;
use crate::error::AgentError;
use crate::generation::{generate_structured, GenerationService};
use crate::prompts::strategy_prompt;

pub const STRATEGIST_NAME: &str = "ContentStrategistAgent";

/// Plan exactly as the generation service returns it, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStrategy {
    #[serde(default)]
    intent: Option<serde_json::Value>,
    #[serde(default)]
    key_topics: Option<serde_json::Value>,
    #[serde(default)]
    proposed_title: Option<String>,
    #[serde(default)]
    content_outline: Option<Vec<String>>,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
}

/// Turns a user query into a content plan via the generation service.
pub struct ContentStrategist {
    service: Arc<dyn GenerationService>,
}

impl ContentStrategist {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self { service }
    }

    async fn plan(&self, query: &Query) -> Result<ContentStrategy, AgentError> {
        if query.text.trim().is_empty() {
            return Err(AgentError::InvalidInput("query text is empty".to_string()));
        }

        let prompt = strategy_prompt(query.text.trim(), query.audience_or_default());
        let raw: RawStrategy = generate_structured(self.service.as_ref(), &prompt).await?;
        validate(raw)
    }
}

/// Check the minimal shape and fill optional fields.
fn validate(raw: RawStrategy) -> Result<ContentStrategy, AgentError> {
    let intent = match raw.intent {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
        other => {
            return Err(AgentError::InvalidAgentOutput(format!(
                "intent must be a non-empty string, got {}",
                other.map(|v| v.to_string()).unwrap_or_else(|| "nothing".to_string())
            )))
        }
    };

    let key_topics: Vec<String> = match raw.key_topics {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => {
            return Err(AgentError::InvalidAgentOutput(
                "keyTopics must be a list".to_string(),
            ))
        }
    };

    let content_type = match raw.content_type.as_deref() {
        Some(value) => ContentType::parse(value).unwrap_or_else(|| {
            warn!(content_type = %value, "Unknown content type, using article");
            ContentType::Article
        }),
        None => ContentType::Article,
    };

    let proposed_title = raw
        .proposed_title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| intent.clone());

    Ok(ContentStrategy {
        intent,
        key_topics,
        proposed_title,
        content_outline: raw.content_outline.unwrap_or_default(),
        content_type,
        keywords: raw.keywords.unwrap_or_default(),
    })
}

#[async_trait]
impl Agent for ContentStrategist {
    type Input = Query;
    type Output = ContentStrategy;

    fn name(&self) -> &str {
        STRATEGIST_NAME
    }

    fn description(&self) -> &str {
        "Analyzes user queries, determines intent, and plans content structure, topics, and keywords."
    }

    async fn process(&self, query: &Query) -> Result<ContentStrategy, AgentError> {
        info!(query = %query.text, service = self.service.name(), "Planning content");

        match self.plan(query).await {
            Ok(strategy) => {
                info!(
                    intent = %strategy.intent,
                    topics = strategy.key_topics.len(),
                    content_type = %strategy.content_type,
                    "Content strategy defined"
                );
                Ok(strategy)
            }
            Err(e) => {
                error!(error = %e, "Content strategy failed");
                Err(e.in_stage(STRATEGIST_NAME))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_strategy_json, ScriptedGenerator};

    fn strategist(service: ScriptedGenerator) -> ContentStrategist {
        ContentStrategist::new(Arc::new(service))
    }

    #[tokio::test]
    async fn plans_from_valid_json() {
        let agent = strategist(ScriptedGenerator::new(vec![sample_strategy_json()]));
        let strategy = agent
            .process(&Query::new("how to start trading stocks"))
            .await
            .unwrap();

        assert_eq!(strategy.intent, "Learn How to Start Trading Stocks");
        assert_eq!(strategy.content_type, ContentType::Guide);
        assert!(!strategy.content_outline.is_empty());
        assert!(!strategy.keywords.is_empty());
    }

    #[tokio::test]
    async fn prompt_uses_default_audience() {
        let service = Arc::new(ScriptedGenerator::new(vec![sample_strategy_json()]));
        let agent = ContentStrategist::new(service.clone());
        agent.process(&Query::new("what is a stock")).await.unwrap();

        let prompts = service.prompts().await;
        assert!(prompts[0].contains("target audience hint: beginner"));
    }

    #[tokio::test]
    async fn missing_intent_is_invalid_output() {
        let agent = strategist(ScriptedGenerator::new(vec![r#"{"keyTopics": ["options"]}"#]));
        let err = agent.process(&Query::new("options")).await.unwrap_err();

        assert!(matches!(err, AgentError::Stage { .. }));
        assert!(matches!(err.root(), AgentError::InvalidAgentOutput(_)));
        assert!(err.to_string().starts_with(STRATEGIST_NAME));
    }

    #[tokio::test]
    async fn empty_intent_is_invalid_output() {
        let agent = strategist(ScriptedGenerator::new(vec![
            r#"{"intent": "  ", "keyTopics": []}"#,
        ]));
        let err = agent.process(&Query::new("options")).await.unwrap_err();
        assert!(matches!(err.root(), AgentError::InvalidAgentOutput(_)));
    }

    #[tokio::test]
    async fn non_list_topics_is_invalid_output() {
        let agent = strategist(ScriptedGenerator::new(vec![
            r#"{"intent": "Learn options", "keyTopics": "options"}"#,
        ]));
        let err = agent.process(&Query::new("options")).await.unwrap_err();
        assert!(matches!(err.root(), AgentError::InvalidAgentOutput(_)));
    }

    #[tokio::test]
    async fn minimal_plan_fills_defaults() {
        let agent = strategist(ScriptedGenerator::new(vec![
            r#"{"intent": "Understand Options Basics", "keyTopics": [], "contentType": "podcast"}"#,
        ]));
        let strategy = agent.process(&Query::new("options")).await.unwrap();

        assert!(strategy.key_topics.is_empty());
        assert_eq!(strategy.proposed_title, "Understand Options Basics");
        assert_eq!(strategy.content_type, ContentType::Article);
        assert!(strategy.keywords.is_empty());
    }

    #[tokio::test]
    async fn service_failure_is_wrapped_with_original_message() {
        let agent = strategist(ScriptedGenerator::failing("Gemini prompt was blocked: SAFETY"));
        let err = agent.process(&Query::new("options")).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains(STRATEGIST_NAME));
        assert!(message.contains("Gemini prompt was blocked: SAFETY"));
        assert!(matches!(err.root(), AgentError::Service(_)));
    }

    #[tokio::test]
    async fn malformed_json_is_wrapped_parse_error() {
        let agent = strategist(ScriptedGenerator::new(vec!["Sure! Here's a plan: intent=..."]));
        let err = agent.process(&Query::new("options")).await.unwrap_err();
        assert!(matches!(err.root(), AgentError::Parse { .. }));
    }

    #[tokio::test]
    async fn empty_query_never_reaches_service() {
        let service = Arc::new(ScriptedGenerator::new(vec![sample_strategy_json()]));
        let agent = ContentStrategist::new(service.clone());
        let err = agent.process(&Query::new("   ")).await.unwrap_err();

        assert!(matches!(err.root(), AgentError::InvalidInput(_)));
        assert!(service.prompts().await.is_empty());
    }
}
