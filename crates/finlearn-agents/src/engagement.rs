use async_trait::async_trait;
use finlearn_models::agent_message::{
    EngagementFeedback, EngagementRequest, InteractiveElement, InteractiveKind,
};
use tracing::info;
use uuid::Uuid;

use crate::agent::Agent;
use crate::error::AgentError;

pub const ENGAGEMENT_NAME: &str = "EngagementBoosterAgent";

pub const QUIZ_SUGGESTION: &str =
    "Consider adding a quick quiz or flashcard section for key terms.";
pub const ANALOGY_SUGGESTION: &str = "Use a relatable analogy to explain market volatility risk.";
pub const BREAKDOWN_SUGGESTION: &str =
    "Break down long sections with subheadings, bullet points, or visuals.";
pub const TAKEAWAYS_SUGGESTION: &str =
    "Include a \"Key Takeaways\" summary box at the end of major sections.";

/// Outlines longer than this get the breakdown suggestion.
const LONG_OUTLINE_SECTIONS: usize = 5;

/// Suggests interactivity and formatting improvements for a draft.
#[derive(Debug, Default)]
pub struct EngagementBooster;

impl EngagementBooster {
    pub fn new() -> Self {
        Self
    }

    pub fn review(&self, request: &EngagementRequest) -> EngagementFeedback {
        let mut suggestions: Vec<String> = Vec::new();
        let mut interactive_elements: Vec<InteractiveElement> = Vec::new();

        let mentions_terms = request.outline.iter().any(|section| {
            let lower = section.to_lowercase();
            lower.contains("terminology") || lower.contains("concepts")
        });
        if mentions_terms {
            suggestions.push(QUIZ_SUGGESTION.to_string());
            interactive_elements.push(InteractiveElement {
                kind: InteractiveKind::Quiz,
                id: format!("quiz-{}", Uuid::new_v4()),
                topic: Some("Key Trading Terms".to_string()),
            });
        }

        if request.draft.to_lowercase().contains("risk") {
            suggestions.push(ANALOGY_SUGGESTION.to_string());
        }

        if request.outline.len() > LONG_OUTLINE_SECTIONS {
            suggestions.push(BREAKDOWN_SUGGESTION.to_string());
        }

        if request.target_audience.as_deref() == Some("beginner") {
            suggestions.push(TAKEAWAYS_SUGGESTION.to_string());
        }

        let engagement_score = engagement_score(suggestions.len(), interactive_elements.len());
        EngagementFeedback {
            suggestions,
            interactive_elements,
            engagement_score: Some(engagement_score),
        }
    }
}

/// `min(100, 60 + 5 * suggestions + 10 * interactive)`
pub fn engagement_score(suggestions: usize, interactive: usize) -> u32 {
    let raw = 60 + 5 * suggestions + 10 * interactive;
    raw.min(100) as u32
}

#[async_trait]
impl Agent for EngagementBooster {
    type Input = EngagementRequest;
    type Output = EngagementFeedback;

    fn name(&self) -> &str {
        ENGAGEMENT_NAME
    }

    fn description(&self) -> &str {
        "Suggests ways to increase reader engagement through interactivity, narrative, and formatting."
    }

    async fn process(&self, request: &EngagementRequest) -> Result<EngagementFeedback, AgentError> {
        let feedback = self.review(request);
        info!(
            suggestions = feedback.suggestions.len(),
            interactive = feedback.interactive_elements.len(),
            score = ?feedback.engagement_score,
            "Engagement suggestions generated"
        );
        Ok(feedback)
    }
}
