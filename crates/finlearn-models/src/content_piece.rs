use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent_message::{Citation, InteractiveElement};
use crate::content_request::ContentType;

pub const OUTPUT_SCHEMA_VERSION: u32 = 1;

/// The final assembled content item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentPiece {
    pub id: Uuid,
    pub content_type: ContentType,
    /// Title proposed by the strategy stage.
    pub title: String,
    /// Title rewritten by the SEO stage.
    pub seo_title: String,
    pub meta_description: String,
    /// URL-friendly identifier.
    pub slug: String,
    pub keywords: Vec<String>,
    pub content_outline: Vec<String>,
    pub body: String,
    pub interactive_elements: Vec<InteractiveElement>,
    pub citations: Vec<Citation>,
    pub disclaimers: Vec<String>,
    pub trust_signals: Vec<String>,
    pub engagement_score: Option<u32>,
    pub seo_score: Option<u32>,
    pub trust_score: Option<u32>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub related_content_ids: Vec<Uuid>,
}

/// Short link to another content piece.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentReference {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

impl From<&ContentPiece> for ContentReference {
    fn from(piece: &ContentPiece) -> Self {
        Self {
            id: piece.id,
            title: piece.title.clone(),
            slug: piece.slug.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryAnalysis {
    pub intent: String,
    pub key_topics: Vec<String>,
}

/// Bookkeeping for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunMetadata {
    /// Participating agents, in pipeline order.
    pub agents_involved: Vec<String>,
    pub processing_time_ms: u64,
    pub completed_at: DateTime<Utc>,
}

/// Everything a pipeline run returns to its caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineOutput {
    pub schema_version: u32,
    pub query_analysis: QueryAnalysis,
    pub main_content: ContentPiece,
    #[serde(default)]
    pub suggested_follow_ups: Vec<ContentReference>,
    pub generation_metadata: RunMetadata,
}
