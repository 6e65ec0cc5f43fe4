use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::suggestion_status::SuggestionStatus;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::suggestion::Suggestion;

/// One store item: the suggestion itself plus denormalized request context
/// so readers never need the original queue message. Written individually,
/// never batched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRecord {
    #[serde(flatten)]
    pub suggestion: Suggestion,
    pub repo: String,
    pub created_at: DateTime<Utc>,
    pub status: SuggestionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, String>>,
}

impl SuggestionRecord {
    pub fn new(suggestion: Suggestion, request: &AnalysisRequest) -> Self {
        Self {
            suggestion,
            repo: request.repo.clone(),
            created_at: Utc::now(),
            status: SuggestionStatus::Pending,
            params: request.params.clone(),
        }
    }
}
