//! finlearn - trading education content pipeline
//!
//! Turns a free-text learning query into a structured, SEO-ready and
//! disclaimer-carrying content piece by chaining a Gemini-backed content
//! strategist with rule-based analysis, engagement, SEO and trust stages.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use finlearn::models::{FinlearnConfig, Query, PipelineOutput};
//! use finlearn::agents::{Orchestrator, PipelineStages, GeminiClient};
//! use finlearn::agents::store::{ContentStore, MemoryStore};
//! ```

pub use finlearn_agents as agents;
pub use finlearn_models as models;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use finlearn_agents::{GeminiClient, Orchestrator, PipelineStages};
use finlearn_models::config::FinlearnConfig;
use finlearn_models::content_piece::PipelineOutput;
use finlearn_models::content_request::Query;

/// Load configuration from a TOML file, or use defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<FinlearnConfig, anyhow::Error> {
    let Some(path) = path else {
        return Ok(FinlearnConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Take the query from the argument if present, otherwise from `input`.
pub fn read_query(arg: Option<String>, mut input: impl Read) -> Result<String, anyhow::Error> {
    let text = match arg {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            input
                .read_to_string(&mut buf)
                .context("Failed to read query from stdin")?;
            buf
        }
    };

    let text = text.trim();
    if text.is_empty() {
        bail!("No query given: pass it as an argument or on stdin");
    }
    Ok(text.to_string())
}

/// Build the production Orchestrator from configuration.
///
/// Reads the API key from the environment variable named in the config.
pub fn build_orchestrator(config: &FinlearnConfig) -> Result<Orchestrator, anyhow::Error> {
    let client = GeminiClient::from_env(config.generation.clone())
        .context("Failed to create Gemini client")?;
    Ok(Orchestrator::new(
        PipelineStages::standard(Arc::new(client)),
        config.pipeline.clone(),
    ))
}

/// Run the pipeline for one query.
pub async fn generate(
    orchestrator: &Orchestrator,
    query: &Query,
) -> Result<PipelineOutput, finlearn_agents::AgentError> {
    orchestrator.run(query).await
}
