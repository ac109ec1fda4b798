pub mod agent;
pub mod analyst;
pub mod engagement;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod seo;
pub mod store;
pub mod strategist;
pub mod trust;

pub mod test_support;

pub use agent::Agent;
pub use analyst::FinancialAnalyst;
pub use engagement::EngagementBooster;
pub use error::AgentError;
pub use gemini::GeminiClient;
pub use generation::{generate_structured, GenerationService};
pub use orchestrator::{build_content_piece, Orchestrator, PipelineStages};
pub use seo::SeoOptimizer;
pub use store::{ContentStore, MemoryStore};
pub use strategist::ContentStrategist;
pub use trust::TrustValidator;
