use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::enums::analyzer_kind::AnalyzerKind;

/// An analysis job as submitted over HTTP and carried as a queue message
/// body. Immutable once enqueued; the only validation at the facade is
/// schema typing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub repo: String,
    pub analyzers: Vec<AnalyzerKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, String>>,
}

impl AnalysisRequest {
    /// Return the analysis id, generating and storing a fresh one when the
    /// submitted body did not carry one.
    pub fn ensure_id(&mut self) -> Uuid {
        match self.id {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                self.id = Some(id);
                id
            }
        }
    }
}
