use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::enums::analyzer_kind::AnalyzerKind;
use crate::errors::{MigralyzerError, MigralyzerResult};
use crate::structs::agent_suggestion::AgentSuggestion;

/// A persisted modernization suggestion. `analysis_id` ties it back to the
/// request that produced it (caller-maintained, the store does not enforce
/// it), and `last` marks the final suggestion emitted for a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub analysis_id: Uuid,
    pub file_path: String,
    pub analyzer: AnalyzerKind,
    pub description: String,
    pub start_line: u32,
    pub end_line: u32,
    pub original_snippet: String,
    pub modified_code: String,
    pub difficulty_level: u8,
    #[serde(default)]
    pub last: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl Suggestion {
    /// Promote a raw agent suggestion to its persisted form, generating the
    /// suggestion id. Fails fast on range violations so nothing invalid
    /// ever reaches the store.
    pub fn from_agent(
        analysis_id: Uuid,
        analyzer: AnalyzerKind,
        agent_suggestion: AgentSuggestion,
        last: bool,
    ) -> MigralyzerResult<Self> {
        agent_suggestion.validate().map_err(|constraint| {
            MigralyzerError::validation_error("suggestion", &agent_suggestion.file_path, &constraint)
        })?;

        Ok(Self {
            id: Uuid::new_v4(),
            analysis_id,
            file_path: agent_suggestion.file_path,
            analyzer,
            description: agent_suggestion.description,
            start_line: agent_suggestion.start_line,
            end_line: agent_suggestion.end_line,
            original_snippet: agent_suggestion.original_snippet,
            modified_code: agent_suggestion.modified_code,
            difficulty_level: agent_suggestion.difficulty_level,
            last,
            additional_notes: agent_suggestion.additional_notes,
        })
    }
}
