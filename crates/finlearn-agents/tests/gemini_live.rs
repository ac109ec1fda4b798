//! Integration tests that call the real Gemini API.
//!
//! These tests are `#[ignore]` by default. They require a valid key in the
//! `GEMINI_API_KEY` environment variable and network access.
//!
//! Run explicitly with:
//! ```bash
//! cargo test -p finlearn-agents --test gemini_live -- --ignored
//! ```

use std::sync::Arc;

use finlearn_agents::generation::{generate_structured, GenerationService};
use finlearn_agents::{AgentError, GeminiClient, Orchestrator, PipelineStages};
use finlearn_models::config::{GenerationConfig, PipelineConfig};
use finlearn_models::content_request::Query;

fn live_client() -> Option<GeminiClient> {
    match GeminiClient::from_env(GenerationConfig::default()) {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping: {e}");
            None
        }
    }
}

/// A trivial prompt should come back as text.
#[tokio::test]
#[ignore]
async fn gemini_returns_text() {
    let Some(client) = live_client() else {
        return;
    };

    let text = client
        .generate_text("Reply with the single word: pong")
        .await
        .expect("Gemini request failed");
    assert!(!text.trim().is_empty());
}

/// The JSON-only instruction should yield something the parser accepts.
///
/// Catches changes in how the model wraps JSON (new fence styles, leading
/// prose) that would otherwise only surface in production.
#[tokio::test]
#[ignore]
async fn gemini_output_is_parseable_json() {
    let Some(client) = live_client() else {
        return;
    };

    let prompt = concat!(
        "Return a JSON object with exactly these fields:\n",
        "- \"status\": the string \"ok\"\n",
        "- \"echo\": the word \"ping\"\n",
    );

    let parsed: serde_json::Value = generate_structured(&client, prompt)
        .await
        .expect("structured generation failed");
    assert_eq!(parsed["status"], "ok", "Unexpected response structure: {parsed}");
}

/// A bad key must surface as a service error, without echoing the key.
#[tokio::test]
#[ignore]
async fn gemini_rejects_invalid_key() {
    let client = GeminiClient::new(GenerationConfig::default(), "not-a-real-key".to_string())
        .expect("client construction");

    let err = client.generate_text("ping").await.unwrap_err();
    assert!(matches!(err, AgentError::Service(_)), "got {err:?}");
    assert!(!err.to_string().contains("not-a-real-key"));
}

/// Full pipeline against the live model.
#[tokio::test]
#[ignore]
async fn live_pipeline_run() {
    let Some(client) = live_client() else {
        return;
    };

    let orchestrator = Orchestrator::new(
        PipelineStages::standard(Arc::new(client)),
        PipelineConfig::default(),
    );
    let output = orchestrator
        .run(&Query::new("how to start trading stocks").with_audience("beginner"))
        .await
        .expect("pipeline failed");

    assert!(!output.main_content.content_outline.is_empty());
    assert!(!output.main_content.slug.is_empty());
    assert_eq!(output.generation_metadata.agents_involved.len(), 6);
}
