use async_trait::async_trait;
use finlearn_models::agent_message::{AnalysisRequest, FactualData, FinancialAnalysis};
use tracing::{debug, info};

use crate::agent::Agent;
use crate::error::AgentError;

pub const ANALYST_NAME: &str = "FinancialAnalystAgent";

/// Risks every piece of trading content carries.
pub const BASELINE_RISKS: [&str; 2] = ["Market Volatility", "Loss of Capital"];

/// One entry of the analyst's knowledge base.
#[derive(Debug)]
pub struct TopicRule {
    /// Lowercase substring a topic must contain to match.
    pub needle: &'static str,
    pub facts: &'static [(&'static str, &'static str)],
    pub snippet: &'static str,
    pub risks: &'static [&'static str],
}

pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        needle: "stock market",
        facts: &[(
            "Stock Market Definition",
            "A collection of markets and exchanges where regular activities of buying, selling, \
             and issuance of shares of publicly-held companies take place.",
        )],
        snippet: "The stock market allows companies to raise capital and investors to own a \
                  piece of those companies.",
        risks: &[],
    },
    TopicRule {
        needle: "brokerage account",
        facts: &[(
            "Brokerage Account Definition",
            "An account you open with a licensed brokerage firm to buy and sell securities like \
             stocks, bonds, and mutual funds.",
        )],
        snippet: "Choosing the right broker depends on your trading style, fees, and available \
                  tools.",
        risks: &["Counterparty Risk (if broker fails)"],
    },
    TopicRule {
        needle: "order types",
        facts: &[
            (
                "Market Order Definition",
                "An order to buy or sell a security immediately at the best available current \
                 price.",
            ),
            (
                "Limit Order Definition",
                "An order to buy or sell a security at a specific price or better.",
            ),
        ],
        snippet: "Understanding order types is crucial for controlling execution price.",
        risks: &["Slippage Risk (with market orders)"],
    },
    TopicRule {
        needle: "risk management",
        facts: &[],
        snippet: "Risk management involves identifying potential losses and taking steps to \
                  mitigate them, such as using stop-loss orders.",
        risks: &[],
    },
    TopicRule {
        needle: "options",
        facts: &[(
            "Options Definition",
            "Contracts giving the buyer the right, but not the obligation, to buy or sell an \
             underlying asset at a specific price on or before a certain date.",
        )],
        snippet: "Options are complex instruments often used for hedging or speculation.",
        risks: &["Leverage Risk", "Time Decay (Theta)"],
    },
];

/// Rule-table analyst: maps plan topics onto curated facts and risks.
pub struct FinancialAnalyst {
    rules: &'static [TopicRule],
}

impl Default for FinancialAnalyst {
    fn default() -> Self {
        Self::new()
    }
}

impl FinancialAnalyst {
    pub fn new() -> Self {
        Self { rules: TOPIC_RULES }
    }

    pub fn with_rules(rules: &'static [TopicRule]) -> Self {
        Self { rules }
    }

    pub fn analyze(&self, topics: &[String]) -> FinancialAnalysis {
        let mut factual_data = FactualData::new();
        let mut analysis_snippets: Vec<String> = Vec::new();
        let mut identified_risks: Vec<String> =
            BASELINE_RISKS.iter().map(|r| r.to_string()).collect();

        for topic in topics {
            let topic_lower = topic.to_lowercase();
            for rule in self.rules.iter().filter(|r| topic_lower.contains(r.needle)) {
                debug!(topic = %topic, rule = rule.needle, "Topic matched");
                for (label, value) in rule.facts {
                    factual_data.insert(
                        label.to_string(),
                        serde_json::Value::String(value.to_string()),
                    );
                }
                analysis_snippets.push(rule.snippet.to_string());
                identified_risks.extend(rule.risks.iter().map(|r| r.to_string()));
            }
        }

        FinancialAnalysis {
            factual_data,
            analysis_snippets,
            identified_risks,
        }
    }
}

#[async_trait]
impl Agent for FinancialAnalyst {
    type Input = AnalysisRequest;
    type Output = FinancialAnalysis;

    fn name(&self) -> &str {
        ANALYST_NAME
    }

    fn description(&self) -> &str {
        "Provides financial facts and explanations, and identifies risks related to trading topics."
    }

    async fn process(&self, request: &AnalysisRequest) -> Result<FinancialAnalysis, AgentError> {
        info!(topics = ?request.topics, "Analyzing topics");
        let analysis = self.analyze(&request.topics);
        info!(
            facts = analysis.factual_data.len(),
            snippets = analysis.analysis_snippets.len(),
            risks = analysis.identified_risks.len(),
            "Financial analysis complete"
        );
        Ok(analysis)
    }
}
