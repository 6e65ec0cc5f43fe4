use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::structs::suggestion::Suggestion;

/// Poll response for one analysis. `completed` is derived: it is true as
/// soon as any persisted suggestion carries last=true. A report is never
/// produced for an analysis with zero suggestions; the facade answers
/// those with no content.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub completed: bool,
    pub suggestions: Vec<Suggestion>,
}

impl AnalysisReport {
    pub fn new(id: Uuid, suggestions: Vec<Suggestion>) -> Self {
        let completed = suggestions.iter().any(|s| s.last);
        Self { id, completed, suggestions }
    }
}
