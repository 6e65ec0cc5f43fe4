use uuid::Uuid;
use crate::enums::analyzer_kind::AnalyzerKind;
use crate::errors::MigralyzerResult;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::suggestion_record::SuggestionRecord;

/// Placeholder for the simpler3to4 analyzer. Requests naming it are
/// accepted and acknowledged but produce no suggestions until a prompt and
/// handler are written for it.
pub struct SimplerMigrationAnalyzer;

impl SimplerMigrationAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self, request: &AnalysisRequest, analysis_id: Uuid) -> MigralyzerResult<Vec<SuggestionRecord>> {
        log::warn!(
            "🚧 Analyzer '{}' is not implemented yet; skipping for analysis {} (repo '{}')",
            AnalyzerKind::Simpler3To4,
            analysis_id,
            request.repo
        );
        Ok(Vec::new())
    }
}

impl Default for SimplerMigrationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
