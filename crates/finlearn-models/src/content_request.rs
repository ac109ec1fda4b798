use serde::{Deserialize, Serialize};

/// Audience assumed by prompts when the caller gives no hint.
pub const DEFAULT_AUDIENCE: &str = "beginner";

/// The kind of content piece the pipeline produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Article,
    Guide,
    Faq,
    Glossary,
    InteractiveModule,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::Article,
        ContentType::Guide,
        ContentType::Faq,
        ContentType::Glossary,
        ContentType::InteractiveModule,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Guide => "guide",
            ContentType::Faq => "faq",
            ContentType::Glossary => "glossary",
            ContentType::InteractiveModule => "interactive_module",
        }
    }

    /// Lenient parse used on generation service output ("Guide", " faq ").
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|t| t.as_str() == normalized)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user query submitted for content generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Query {
    /// The user's search query (e.g., "how to start day trading").
    pub text: String,
    /// Audience hint such as "beginner" or "intermediate".
    #[serde(default)]
    pub target_audience: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_audience: None,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = Some(audience.into());
        self
    }

    /// The audience hint, or [`DEFAULT_AUDIENCE`] when none was given.
    pub fn audience_or_default(&self) -> &str {
        self.target_audience.as_deref().unwrap_or(DEFAULT_AUDIENCE)
    }
}
