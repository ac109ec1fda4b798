use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content_request::ContentType;

/// Label → value facts produced by the analysis stage.
///
/// Values are opaque JSON. Keys keep insertion order. This shape is unstable
/// until the set of fact kinds is fixed.
pub type FactualData = serde_json::Map<String, serde_json::Value>;

/// Content plan produced by the strategy stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentStrategy {
    pub intent: String,
    pub key_topics: Vec<String>,
    pub proposed_title: String,
    /// Section headings, in order.
    pub content_outline: Vec<String>,
    pub content_type: ContentType,
    pub keywords: Vec<String>,
}

/// Input to the analysis stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRequest {
    pub topics: Vec<String>,
    pub outline: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FinancialAnalysis {
    pub factual_data: FactualData,
    pub analysis_snippets: Vec<String>,
    pub identified_risks: Vec<String>,
}

/// Input to the engagement stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngagementRequest {
    pub draft: String,
    pub outline: Vec<String>,
    pub target_audience: Option<String>,
}

/// Kinds of interactive components a content piece can embed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InteractiveKind {
    Quiz,
    Flashcards,
    Calculator,
}

/// Descriptor for an interactive component the front-end renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractiveElement {
    #[serde(rename = "type")]
    pub kind: InteractiveKind,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngagementFeedback {
    pub suggestions: Vec<String>,
    pub interactive_elements: Vec<InteractiveElement>,
    /// 0 to 100 estimated engagement.
    pub engagement_score: Option<u32>,
}

/// Input to the SEO stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeoRequest {
    pub draft: String,
    pub title: String,
    pub keywords: Vec<String>,
    pub content_type: ContentType,
    /// Existing slug to keep when re-optimizing published content.
    pub current_slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeoMetadata {
    pub optimized_title: String,
    pub meta_description: String,
    pub slug: String,
    pub score_improvement: Option<u32>,
}

/// Input to the trust stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrustRequest {
    pub draft: String,
    pub financial_data: Option<FactualData>,
    pub sources_used: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citation {
    pub source: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrustReport {
    pub citations: Vec<Citation>,
    pub disclaimers: Vec<String>,
    /// Statements that enhance reader trust (e.g., "Fact-checked").
    pub trust_signals: Vec<String>,
    pub accuracy_score: Option<u32>,
    pub validated_at: DateTime<Utc>,
}
