use finlearn_models::content_request::ContentType;

/// Appended to every structured-generation prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond ONLY with valid JSON that conforms to the \
     requested structure. Do not include any introductory text, code block markers (like \
     ```json), or explanations.";

/// Schema example shown to the model for the content plan.
fn strategy_schema() -> String {
    let content_types: Vec<&str> = ContentType::ALL.iter().map(|t| t.as_str()).collect();
    let example = serde_json::json!({
        "intent": "A concise description of the user's likely goal (e.g., 'Learn How to Start \
                   Trading Stocks', 'Understand Options Basics', 'Compare Forex Brokers').",
        "keyTopics": [
            "Specific topics the content should cover (e.g., 'Brokerage Account Setup', \
             'Market Orders vs Limit Orders', 'Risk Management Fundamentals')."
        ],
        "proposedTitle": "A compelling and relevant title for the content piece.",
        "contentOutline": [
            "Main sections or headings (e.g., 'Introduction', 'What is Forex?', \
             'Choosing a Broker', 'Placing a Trade', 'Key Risks', 'Conclusion')."
        ],
        "contentType": format!("One of: {}", content_types.join(", ")),
        "keywords": [
            "Relevant SEO keywords (e.g., 'forex trading for beginners', \
             'how to trade currency')."
        ]
    });
    serde_json::to_string_pretty(&example).unwrap_or_default()
}

/// Prompt asking the generation service for a content plan.
pub fn strategy_prompt(user_query: &str, audience: &str) -> String {
    format!(
        "Analyze the following user query about financial market trading: \"{user_query}\"\n\n\
         Consider the likely user intent (e.g., learning basics, finding specific information, \
         comparing options) and the typical target audience (assume beginner unless specified \
         otherwise, target audience hint: {audience}).\n\n\
         Based on this analysis, generate a content strategy plan in JSON format. The JSON \
         object should have the following structure:\n\
         {}\n\n\
         Ensure the output is ONLY the valid JSON object, without any introductory text or \
         markdown formatting.",
        strategy_schema()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_prompt_contains_query_and_audience() {
        let prompt = strategy_prompt("how to start trading stocks", "intermediate");
        assert!(prompt.contains("\"how to start trading stocks\""));
        assert!(prompt.contains("target audience hint: intermediate"));
    }

    #[test]
    fn strategy_prompt_contains_all_plan_fields() {
        let prompt = strategy_prompt("what is a limit order", "beginner");
        for field in [
            "intent",
            "keyTopics",
            "proposedTitle",
            "contentOutline",
            "contentType",
            "keywords",
        ] {
            assert!(prompt.contains(field), "Missing {field} in strategy prompt");
        }
    }

    #[test]
    fn strategy_prompt_lists_content_types() {
        let prompt = strategy_prompt("options basics", "beginner");
        assert!(prompt.contains("interactive_module"));
        assert!(prompt.contains("glossary"));
    }

    #[test]
    fn json_instruction_forbids_code_fences() {
        assert!(JSON_ONLY_INSTRUCTION.contains("ONLY"));
        assert!(JSON_ONLY_INSTRUCTION.contains("code block markers"));
    }
}
