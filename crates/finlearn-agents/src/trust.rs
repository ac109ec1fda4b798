use async_trait::async_trait;
use chrono::Utc;
use finlearn_models::agent_message::{Citation, TrustReport, TrustRequest};
use tracing::{info, warn};

use crate::agent::Agent;
use crate::error::AgentError;

pub const TRUST_NAME: &str = "TrustValidatorAgent";

pub const PLACEHOLDER_SOURCE: &str = "Reputable Financial Source (Placeholder)";
pub const EDUCATIONAL_DISCLAIMER: &str =
    "This content is AI-generated and for educational purposes only.";
pub const RISK_OF_LOSS_DISCLAIMER: &str = "Financial markets involve risk. Consult with a \
     qualified financial advisor before making investment decisions.";
pub const COMPLEX_INSTRUMENT_DISCLAIMER: &str =
    "Trading complex instruments like options or futures carries a high level of risk.";
pub const NO_GUARANTEE_DISCLAIMER: &str =
    "Past performance is not indicative of future results. No profit is guaranteed.";
pub const CROSS_REFERENCED_SIGNAL: &str = "Key financial data points cross-referenced.";
pub const INTERNAL_KNOWLEDGE_SIGNAL: &str = "Content generated based on internal knowledge model.";

const COMPLEX_INSTRUMENT_TERMS: [&str; 3] = ["options", "futures", "leverage"];
const RETURN_PROMISE_TERMS: [&str; 2] = ["guarantee", "profit"];
const ACCURACY_SCORE: u32 = 85;

/// Adds citations, disclaimers and trust signals to a draft.
#[derive(Debug, Default)]
pub struct TrustValidator;

impl TrustValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, request: &TrustRequest) -> TrustReport {
        let mut citations: Vec<Citation> = Vec::new();
        let mut trust_signals: Vec<String> = Vec::new();
        let mut disclaimers = vec![
            EDUCATIONAL_DISCLAIMER.to_string(),
            RISK_OF_LOSS_DISCLAIMER.to_string(),
        ];

        if let Some(facts) = &request.financial_data {
            for key in facts.keys() {
                citations.push(Citation {
                    source: PLACEHOLDER_SOURCE.to_string(),
                    description: format!("Data point: {key}"),
                });
            }
            trust_signals.push(CROSS_REFERENCED_SIGNAL.to_string());
        }

        match request.sources_used.as_deref() {
            Some(sources) if !sources.is_empty() => {
                for source in sources {
                    if !citations.iter().any(|c| &c.source == source) {
                        citations.push(Citation {
                            source: source.clone(),
                            description: "General information source".to_string(),
                        });
                    }
                }
                trust_signals.push(format!(
                    "Information synthesized from sources including: {}.",
                    sources.join(", ")
                ));
            }
            _ => trust_signals.push(INTERNAL_KNOWLEDGE_SIGNAL.to_string()),
        }

        let draft = request.draft.to_lowercase();
        if COMPLEX_INSTRUMENT_TERMS.iter().any(|t| draft.contains(t)) {
            disclaimers.push(COMPLEX_INSTRUMENT_DISCLAIMER.to_string());
        }
        if RETURN_PROMISE_TERMS.iter().any(|t| draft.contains(t)) {
            disclaimers.push(NO_GUARANTEE_DISCLAIMER.to_string());
            warn!("Draft mentions guarantees or profit; flagged for content review");
        }

        TrustReport {
            citations,
            disclaimers,
            trust_signals,
            accuracy_score: Some(ACCURACY_SCORE),
            validated_at: Utc::now(),
        }
    }
}

#[async_trait]
impl Agent for TrustValidator {
    type Input = TrustRequest;
    type Output = TrustReport;

    fn name(&self) -> &str {
        TRUST_NAME
    }

    fn description(&self) -> &str {
        "Adds citations, disclaimers and trust signals for content transparency."
    }

    async fn process(&self, request: &TrustRequest) -> Result<TrustReport, AgentError> {
        let report = self.validate(request);
        info!(
            citations = report.citations.len(),
            disclaimers = report.disclaimers.len(),
            "Trust validation complete"
        );
        Ok(report)
    }
}
