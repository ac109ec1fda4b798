use serde::{Deserialize, Serialize};

/// Top-level configuration for finlearn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FinlearnConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Configuration for the Gemini generation service.
///
/// The API key itself never lives here; only the name of the environment
/// variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub base_url: String,
    /// Environment variable read at startup for the API key.
    pub api_key_env: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_seconds: 60,
            temperature: 0.8,
            top_k: 64,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

/// Configuration for the orchestration layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Timeout for a whole pipeline run in seconds. 0 disables it.
    pub total_timeout_seconds: u64,
    /// Sources reported to the trust stage as consulted during generation.
    pub sources_used: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            total_timeout_seconds: 180,
            sources_used: vec![
                "Internal Knowledge Base".to_string(),
                "Assumed Public Data".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_finlearn_config() {
        let config = FinlearnConfig::default();

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: FinlearnConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn default_pipeline_reports_two_sources() {
        let pipeline = PipelineConfig::default();
        assert_eq!(pipeline.sources_used.len(), 2);
        assert_eq!(pipeline.total_timeout_seconds, 180);
    }

    #[test]
    fn config_from_toml() {
        let toml_str = r#"
[generation]
model = "gemini-1.5-pro"
api_key_env = "FINLEARN_GEMINI_KEY"
timeout_seconds = 30

[pipeline]
total_timeout_seconds = 0
sources_used = ["Investopedia"]
"#;

        let config: FinlearnConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.model, "gemini-1.5-pro");
        assert_eq!(config.generation.api_key_env, "FINLEARN_GEMINI_KEY");
        assert_eq!(config.generation.top_k, 64);
        assert_eq!(config.pipeline.total_timeout_seconds, 0);
        assert_eq!(config.pipeline.sources_used, vec!["Investopedia".to_string()]);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: FinlearnConfig = toml::from_str("").unwrap();
        assert_eq!(config, FinlearnConfig::default());
    }
}
