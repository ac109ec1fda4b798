pub mod agent_message;
pub mod config;
pub mod content_piece;
pub mod content_request;

pub use agent_message::{
    AnalysisRequest, Citation, ContentStrategy, EngagementFeedback, EngagementRequest,
    FactualData, FinancialAnalysis, InteractiveElement, InteractiveKind, SeoMetadata, SeoRequest,
    TrustReport, TrustRequest,
};
pub use config::{FinlearnConfig, GenerationConfig, PipelineConfig};
pub use content_piece::{
    ContentPiece, ContentReference, PipelineOutput, QueryAnalysis, RunMetadata,
};
pub use content_request::{ContentType, Query};
