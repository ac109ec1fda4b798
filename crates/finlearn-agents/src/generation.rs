use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AgentError;
use crate::parser::parse_structured;
use crate::prompts::JSON_ONLY_INSTRUCTION;

/// A text generation backend. Mockable for testing.
#[async_trait]
pub trait GenerationService: Send + Sync {
    fn name(&self) -> &str;

    /// Send a prompt and return the generated text.
    ///
    /// Fails with [`AgentError::Service`] on transport failure, a blocked
    /// prompt, or an empty response.
    async fn generate_text(&self, prompt: &str) -> Result<String, AgentError>;
}

/// Generate a response and parse it as JSON into `T`.
///
/// The prompt is suffixed with an instruction to answer with a bare JSON
/// object. Code fences and surrounding chatter are stripped before parsing.
pub async fn generate_structured<T: DeserializeOwned>(
    service: &dyn GenerationService,
    prompt: &str,
) -> Result<T, AgentError> {
    let full_prompt = format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}");
    let raw = service.generate_text(&full_prompt).await?;
    debug!(service = service.name(), len = raw.len(), "Parsing structured response");
    parse_structured(&raw)
}
