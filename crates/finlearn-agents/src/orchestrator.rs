use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use finlearn_models::agent_message::*;
use finlearn_models::config::PipelineConfig;
use finlearn_models::content_piece::{
    ContentPiece, PipelineOutput, QueryAnalysis, RunMetadata, OUTPUT_SCHEMA_VERSION,
};
use finlearn_models::content_request::Query;
use tracing::{error, info};
use uuid::Uuid;

use crate::agent::Agent;
use crate::analyst::FinancialAnalyst;
use crate::engagement::EngagementBooster;
use crate::error::AgentError;
use crate::generation::GenerationService;
use crate::seo::SeoOptimizer;
use crate::strategist::ContentStrategist;
use crate::trust::TrustValidator;

pub const ORCHESTRATOR_NAME: &str = "OrchestratorAgent";

pub type StrategyStage = Arc<dyn Agent<Input = Query, Output = ContentStrategy>>;
pub type AnalysisStage = Arc<dyn Agent<Input = AnalysisRequest, Output = FinancialAnalysis>>;
pub type EngagementStage = Arc<dyn Agent<Input = EngagementRequest, Output = EngagementFeedback>>;
pub type SeoStage = Arc<dyn Agent<Input = SeoRequest, Output = SeoMetadata>>;
pub type TrustStage = Arc<dyn Agent<Input = TrustRequest, Output = TrustReport>>;

/// The five stages, in the order they run.
#[derive(Clone)]
pub struct PipelineStages {
    pub strategist: StrategyStage,
    pub analyst: AnalysisStage,
    pub engagement: EngagementStage,
    pub seo: SeoStage,
    pub trust: TrustStage,
}

impl PipelineStages {
    /// The production stage set: an LLM-backed strategist and rule-based
    /// analysis, engagement, SEO and trust stages.
    pub fn standard(service: Arc<dyn GenerationService>) -> Self {
        Self {
            strategist: Arc::new(ContentStrategist::new(service)),
            analyst: Arc::new(FinancialAnalyst::new()),
            engagement: Arc::new(EngagementBooster::new()),
            seo: Arc::new(SeoOptimizer::new()),
            trust: Arc::new(TrustValidator::new()),
        }
    }
}

/// Runs the content pipeline and assembles a ContentPiece.
pub struct Orchestrator {
    stages: PipelineStages,
    config: PipelineConfig,
}

impl Orchestrator {
    pub fn new(stages: PipelineStages, config: PipelineConfig) -> Self {
        Self { stages, config }
    }

    /// Participant names in pipeline order, this orchestrator last.
    pub fn agent_names(&self) -> Vec<String> {
        vec![
            self.stages.strategist.name().to_string(),
            self.stages.analyst.name().to_string(),
            self.stages.engagement.name().to_string(),
            self.stages.seo.name().to_string(),
            self.stages.trust.name().to_string(),
            ORCHESTRATOR_NAME.to_string(),
        ]
    }

    /// Run every stage in order. The first failure aborts the run.
    pub async fn run(&self, query: &Query) -> Result<PipelineOutput, AgentError> {
        if self.config.total_timeout_seconds == 0 {
            return self.run_stages(query).await;
        }

        let limit = Duration::from_secs(self.config.total_timeout_seconds);
        match tokio::time::timeout(limit, self.run_stages(query)).await {
            Ok(result) => result,
            Err(_) => {
                error!(timeout_s = self.config.total_timeout_seconds, "Pipeline timed out");
                Err(AgentError::Timeout(self.config.total_timeout_seconds))
            }
        }
    }

    async fn run_stages(&self, query: &Query) -> Result<PipelineOutput, AgentError> {
        let start = Instant::now();
        info!(query = %query.text, audience = ?query.target_audience, "Starting pipeline");

        // 1. Content strategy
        let strategy = self
            .stages
            .strategist
            .process(query)
            .await
            .inspect_err(log_stage_error(self.stages.strategist.name()))?;

        // 2. Financial analysis
        let analysis = self
            .stages
            .analyst
            .process(&AnalysisRequest {
                topics: strategy.key_topics.clone(),
                outline: strategy.content_outline.clone(),
            })
            .await
            .inspect_err(log_stage_error(self.stages.analyst.name()))?;

        // 3. Draft from strategy + analysis
        let draft = assemble_draft(&strategy, &analysis);

        // 4. Engagement sees the draft before its own suggestions are appended
        let engagement = self
            .stages
            .engagement
            .process(&EngagementRequest {
                draft: draft.clone(),
                outline: strategy.content_outline.clone(),
                target_audience: query.target_audience.clone(),
            })
            .await
            .inspect_err(log_stage_error(self.stages.engagement.name()))?;
        let draft = append_engagement(draft, &engagement);

        // 5. SEO
        let seo = self
            .stages
            .seo
            .process(&SeoRequest {
                draft: draft.clone(),
                title: strategy.proposed_title.clone(),
                keywords: strategy.keywords.clone(),
                content_type: strategy.content_type,
                current_slug: None,
            })
            .await
            .inspect_err(log_stage_error(self.stages.seo.name()))?;

        // 6. Trust
        let trust = self
            .stages
            .trust
            .process(&TrustRequest {
                draft: draft.clone(),
                financial_data: Some(analysis.factual_data.clone()),
                sources_used: Some(self.config.sources_used.clone()),
            })
            .await
            .inspect_err(log_stage_error(self.stages.trust.name()))?;

        // 7. Final assembly
        let main_content = build_content_piece(&strategy, &engagement, &seo, &trust, draft);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            id = %main_content.id,
            slug = %main_content.slug,
            elapsed_ms = processing_time_ms,
            "Pipeline complete"
        );

        Ok(PipelineOutput {
            schema_version: OUTPUT_SCHEMA_VERSION,
            query_analysis: QueryAnalysis {
                intent: strategy.intent,
                key_topics: strategy.key_topics,
            },
            generation_metadata: RunMetadata {
                agents_involved: self.agent_names(),
                processing_time_ms,
                completed_at: main_content.last_updated,
            },
            main_content,
            suggested_follow_ups: Vec::new(),
        })
    }
}

fn log_stage_error(stage: &str) -> impl FnOnce(&AgentError) + '_ {
    move |e| error!(stage, error = %e, "Stage failed")
}

/// Draft body: outline lines, then analysis and risk summary lines.
pub fn assemble_draft(strategy: &ContentStrategy, analysis: &FinancialAnalysis) -> String {
    let mut draft = format!("{}\n\n", strategy.content_outline.join("\n"));
    draft.push_str(&format!(
        "Based on analysis: {}\n",
        analysis.analysis_snippets.join(" ")
    ));
    draft.push_str(&format!(
        "Key Risks: {}\n",
        analysis.identified_risks.join(", ")
    ));
    draft
}

pub fn append_engagement(mut draft: String, engagement: &EngagementFeedback) -> String {
    draft.push_str(&format!(
        "\nEngagement Suggestions: {}",
        engagement.suggestions.join(" ")
    ));
    draft
}

/// Merge stage outputs into the final ContentPiece.
pub fn build_content_piece(
    strategy: &ContentStrategy,
    engagement: &EngagementFeedback,
    seo: &SeoMetadata,
    trust: &TrustReport,
    body: String,
) -> ContentPiece {
    ContentPiece {
        id: Uuid::new_v4(),
        content_type: strategy.content_type,
        title: strategy.proposed_title.clone(),
        seo_title: seo.optimized_title.clone(),
        meta_description: seo.meta_description.clone(),
        slug: seo.slug.clone(),
        keywords: strategy.keywords.clone(),
        content_outline: strategy.content_outline.clone(),
        body,
        interactive_elements: engagement.interactive_elements.clone(),
        citations: trust.citations.clone(),
        disclaimers: trust.disclaimers.clone(),
        trust_signals: trust.trust_signals.clone(),
        engagement_score: engagement.engagement_score,
        seo_score: seo.score_improvement,
        trust_score: trust.accuracy_score,
        last_updated: Utc::now(),
        related_content_ids: Vec::new(),
    }
}

#[async_trait]
impl Agent for Orchestrator {
    type Input = Query;
    type Output = PipelineOutput;

    fn name(&self) -> &str {
        ORCHESTRATOR_NAME
    }

    fn description(&self) -> &str {
        "Runs the content agents in order and assembles trading education content."
    }

    async fn process(&self, query: &Query) -> Result<PipelineOutput, AgentError> {
        self.run(query).await
    }
}
