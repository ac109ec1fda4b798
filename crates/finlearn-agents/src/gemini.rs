use std::time::Duration;

use async_trait::async_trait;
use finlearn_models::config::GenerationConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::generation::GenerationService;

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: SamplingConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SamplingConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    config: GenerationConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(config: GenerationConfig, api_key: String) -> Result<Self, AgentError> {
        if api_key.trim().is_empty() {
            return Err(AgentError::Config("Gemini API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AgentError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Build a client reading the API key from `config.api_key_env`.
    pub fn from_env(config: GenerationConfig) -> Result<Self, AgentError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            AgentError::Config(format!(
                "Gemini API key not configured: set {}",
                config.api_key_env
            ))
        })?;
        Self::new(config, api_key)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_request(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: SamplingConfig {
                temperature: self.config.temperature,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: "BLOCK_MEDIUM_AND_ABOVE",
                })
                .collect(),
        }
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, AgentError> {
        // Key goes in a header, never in the URL.
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        debug!(model = %self.config.model, prompt_len = prompt.len(), "Invoking Gemini");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::Service(format!(
                        "Gemini request timed out after {} seconds",
                        self.config.timeout_seconds
                    ))
                } else {
                    AgentError::Service(format!("Gemini request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::Service(format!("Failed to read Gemini response: {e}")))?;

        if !status.is_success() {
            warn!(status = %status, "Gemini API error response");
            return Err(AgentError::Service(describe_api_error(status.as_u16(), &body)));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            AgentError::Service(format!("Unexpected Gemini response shape: {e}"))
        })?;
        extract_text(parsed)
    }
}

/// Pull the generated text out of a response, rejecting blocked or empty output.
fn extract_text(response: GenerateResponse) -> Result<String, AgentError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        warn!(block_reason = %reason, "Gemini prompt was blocked");
        return Err(AgentError::Service(format!(
            "Gemini prompt was blocked: {reason}"
        )));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(AgentError::Service(
            "Gemini response was blocked or empty".to_string(),
        ));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        warn!(finish_reason = %reason, "Gemini returned empty text");
        return Err(AgentError::Service(format!(
            "Gemini returned empty text content (finish reason: {reason})"
        )));
    }

    Ok(text)
}

fn describe_api_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(err) => {
            let lower = err.error.message.to_lowercase();
            if lower.contains("api key") || status == 401 || status == 403 {
                format!("Gemini API Error: HTTP {status} authentication failed")
            } else {
                format!(
                    "Gemini API Error: HTTP {status} {}: {}",
                    err.error.status, err.error.message
                )
            }
        }
        Err(_) => format!("Gemini API Error: HTTP {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = GeminiClient::new(GenerationConfig::default(), "  ".to_string());
        assert!(matches!(result, Err(AgentError::Config(_))));
    }

    #[test]
    fn debug_output_redacts_key() {
        let client =
            GeminiClient::new(GenerationConfig::default(), "secret-key-123".to_string()).unwrap();
        let printed = format!("{client:?}");
        assert!(!printed.contains("secret-key-123"));
        assert!(printed.contains("gemini-1.5-flash"));
    }

    #[test]
    fn request_carries_sampling_and_safety_settings() {
        let client = GeminiClient::new(GenerationConfig::default(), "k".to_string()).unwrap();
        let json = serde_json::to_value(client.build_request("hello")).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["topK"], 64);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(json["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            json["safetySettings"][0]["threshold"],
            "BLOCK_MEDIUM_AND_ABOVE"
        );
    }

    #[test]
    fn extract_joins_text_parts() {
        let parsed = response(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": " 1}"}]},
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(extract_text(parsed).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn extract_reports_block_reason() {
        let parsed = response(serde_json::json!({
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"}
        }));
        let err = extract_text(parsed).unwrap_err();
        assert!(err.to_string().contains("blocked: SAFETY"));
    }

    #[test]
    fn extract_rejects_missing_candidates() {
        let parsed = response(serde_json::json!({}));
        assert!(matches!(extract_text(parsed), Err(AgentError::Service(_))));
    }

    #[test]
    fn extract_rejects_empty_text() {
        let parsed = response(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "  "}]}, "finishReason": "MAX_TOKENS"}]
        }));
        let err = extract_text(parsed).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn api_error_hides_key_details() {
        let body = r#"{"error": {"code": 400, "status": "INVALID_ARGUMENT", "message": "API key not valid. Please pass a valid API key."}}"#;
        let message = describe_api_error(400, body);
        assert!(message.contains("authentication failed"));
        assert!(!message.contains("Please pass"));
    }

    #[test]
    fn api_error_includes_status_detail() {
        let body = r#"{"error": {"code": 429, "status": "RESOURCE_EXHAUSTED", "message": "Quota exceeded"}}"#;
        let message = describe_api_error(429, body);
        assert!(message.contains("RESOURCE_EXHAUSTED"));
        assert!(message.contains("Quota exceeded"));
    }
}
