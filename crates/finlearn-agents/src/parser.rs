use serde::de::DeserializeOwned;

use crate::error::AgentError;

/// Characters of raw output quoted in parse error messages.
const RAW_PREVIEW_CHARS: usize = 100;

/// Extract the first JSON object from a string that may contain surrounding text.
///
/// Handles the shapes Gemini returns even when told not to:
/// - Clean JSON: `{"intent": "..."}`
/// - Markdown-wrapped: ```json\n{"intent": "..."}\n```
/// - Prefix text: `Here is the plan:\n{"intent": "..."}`
pub fn extract_json(text: &str) -> Result<String, AgentError> {
    let trimmed = text.trim();

    if trimmed.starts_with('{') && serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        return Ok(trimmed.to_string());
    }

    let unfenced = strip_code_fences(trimmed);
    if unfenced.starts_with('{') && serde_json::from_str::<serde_json::Value>(unfenced).is_ok() {
        return Ok(unfenced.to_string());
    }

    if let Some(json_str) = extract_first_object(trimmed) {
        if serde_json::from_str::<serde_json::Value>(&json_str).is_ok() {
            return Ok(json_str);
        }
    }

    Err(AgentError::Parse {
        message: format!(
            "No valid JSON object found in response. Raw response: {}...",
            preview(text)
        ),
        raw: text.to_string(),
    })
}

/// Strip a surrounding ```json ... ``` or ``` ... ``` fence, if present.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Find the first balanced { ... } in the text.
fn extract_first_object(text: &str) -> Option<String> {
    let mut depth = 0;
    let mut start = None;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => {
                escape_next = true;
            }
            '"' => {
                in_string = !in_string;
            }
            '{' if !in_string => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if !in_string && depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start {
                        return Some(text[s..=i].to_string());
                    }
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse a typed value out of raw generation output.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T, AgentError> {
    let json_str = extract_json(raw)?;
    serde_json::from_str(&json_str).map_err(|e| AgentError::Parse {
        message: format!("{e}. Raw response: {}...", preview(raw)),
        raw: raw.to_string(),
    })
}

fn preview(text: &str) -> String {
    text.chars().take(RAW_PREVIEW_CHARS).collect()
}
