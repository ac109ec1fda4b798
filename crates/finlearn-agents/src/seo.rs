use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use finlearn_models::agent_message::{SeoMetadata, SeoRequest};
use finlearn_models::content_request::ContentType;
use regex::Regex;
use tracing::{info, warn};

use crate::agent::Agent;
use crate::error::AgentError;

pub const SEO_NAME: &str = "SEOptimizerAgent";

/// Titles longer than this are flagged, never truncated.
pub const TITLE_WARN_CHARS: usize = 65;
pub const META_DESCRIPTION_CHARS: usize = 160;
const SCORE_IMPROVEMENT: u32 = 10;

static YEAR_IN_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{4}\)").expect("valid year regex"));
static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid slug regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("valid hyphen regex"));

/// Derive a URL slug from a title. Applying it to its own output is a no-op.
pub fn generate_slug(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lower, "");
    let hyphenated = WHITESPACE_RUN.replace_all(stripped.trim(), "-");
    HYPHEN_RUN.replace_all(&hyphenated, "-").into_owned()
}

/// Add the year and primary keyword to a title when missing.
pub fn optimize_title(title: &str, keywords: &[String], year: i32) -> String {
    let mut optimized = title.to_string();
    if !YEAR_IN_PARENS.is_match(&optimized) {
        optimized = format!("{optimized} ({year})");
    }

    if let Some(primary) = keywords.first() {
        if !optimized.to_lowercase().contains(&primary.to_lowercase()) {
            optimized = format!("{primary}: {optimized}");
        }
    }

    if optimized.chars().count() > TITLE_WARN_CHARS {
        warn!(title = %optimized, "SEO title might be too long");
    }
    optimized
}

/// Build a meta description of at most [`META_DESCRIPTION_CHARS`] characters.
pub fn meta_description(draft: &str, keywords: &[String], content_type: ContentType) -> String {
    let mut description = if draft.chars().count() > META_DESCRIPTION_CHARS {
        let snippet: String = draft.chars().take(META_DESCRIPTION_CHARS).collect();
        let cut = snippet.rfind(' ').map(|i| &snippet[..i]).unwrap_or("");
        format!("{cut}...")
    } else {
        format!(
            "Learn about {}. This {} covers key concepts. Discover more!",
            keywords.join(", "),
            content_type
        )
    };

    if let Some(primary) = keywords.first() {
        if !description.to_lowercase().contains(&primary.to_lowercase()) {
            description = format!("Learn {primary}. {description}");
        }
    }

    if description.chars().count() > META_DESCRIPTION_CHARS {
        let truncated: String = description
            .chars()
            .take(META_DESCRIPTION_CHARS - 3)
            .collect();
        description = format!("{truncated}...");
    }
    description
}

/// Rewrites titles, meta descriptions and slugs for search visibility.
#[derive(Debug, Default)]
pub struct SeoOptimizer {
    /// Fixed year for titles; the current UTC year when unset.
    year: Option<i32>,
}

impl SeoOptimizer {
    pub fn new() -> Self {
        Self { year: None }
    }

    pub fn with_year(year: i32) -> Self {
        Self { year: Some(year) }
    }

    pub fn optimize(&self, request: &SeoRequest) -> SeoMetadata {
        let year = self.year.unwrap_or_else(|| Utc::now().year());
        let slug = match request.current_slug.as_deref() {
            Some(existing) if !existing.is_empty() => existing.to_string(),
            _ => generate_slug(&request.title),
        };

        SeoMetadata {
            optimized_title: optimize_title(&request.title, &request.keywords, year),
            meta_description: meta_description(
                &request.draft,
                &request.keywords,
                request.content_type,
            ),
            slug,
            score_improvement: Some(SCORE_IMPROVEMENT),
        }
    }
}

#[async_trait]
impl Agent for SeoOptimizer {
    type Input = SeoRequest;
    type Output = SeoMetadata;

    fn name(&self) -> &str {
        SEO_NAME
    }

    fn description(&self) -> &str {
        "Optimizes titles, meta descriptions and slugs for search engine visibility."
    }

    async fn process(&self, request: &SeoRequest) -> Result<SeoMetadata, AgentError> {
        let metadata = self.optimize(request);
        info!(title = %metadata.optimized_title, slug = %metadata.slug, "SEO optimization applied");
        Ok(metadata)
    }
}
