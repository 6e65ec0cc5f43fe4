use crate::enums::agent_error::AgentError;
use crate::structs::agent_suggestion::{AgentSuggestion, SuggestionsList};

/// Strictly parse a raw model response against the suggestion-list schema.
/// Markdown code fences around the JSON are tolerated; everything else
/// (missing fields, wrong types, range violations) is a ParseError.
pub fn parse_suggestions(response_text: &str) -> Result<Vec<AgentSuggestion>, AgentError> {
    let payload = strip_code_fences(response_text);

    let list: SuggestionsList = serde_json::from_str(payload)
        .map_err(|e| AgentError::ParseError(e.to_string()))?;

    for suggestion in &list.suggestions {
        suggestion
            .validate()
            .map_err(AgentError::ParseError)?;
    }

    Ok(list.suggestions)
}

/// Models often wrap JSON in ``` fences despite instructions not to.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop an optional language tag on the opening fence line
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };

    rest.strip_suffix("```").unwrap_or(rest).trim()
}
