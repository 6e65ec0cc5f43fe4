use std::sync::Arc;
use uuid::Uuid;
use crate::constants::prompts::JAVA_MIGRATION_PROMPT;
use crate::enums::analyzer_kind::AnalyzerKind;
use crate::errors::{MigralyzerError, MigralyzerResult};
use crate::services::repo_scanner::RepoScanner;
use crate::services::suggestion_agent::SuggestionAgent;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::suggestion::Suggestion;
use crate::structs::suggestion_record::SuggestionRecord;
use crate::traits::ai_provider::AiProvider;

/// The java8to21 analyzer: scans the repository locator for Java sources
/// and asks the agent for modernization suggestions file by file. The final
/// suggestion emitted for each file is flagged last=true.
pub struct JavaMigrationAnalyzer {
    agent: SuggestionAgent,
}

impl JavaMigrationAnalyzer {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self {
            agent: SuggestionAgent::new(provider, JAVA_MIGRATION_PROMPT),
        }
    }

    pub async fn run(&self, request: &AnalysisRequest, analysis_id: Uuid) -> MigralyzerResult<Vec<SuggestionRecord>> {
        let scanner = RepoScanner::new(request.repo.clone());
        let files = scanner.scan_java_files()?;

        if files.is_empty() {
            log::warn!("⚠️ No Java files found in repository '{}'", request.repo);
            return Ok(Vec::new());
        }

        log::info!(
            "🔍 Analyzing {} Java files from '{}' (analysis {})",
            files.len(),
            request.repo,
            analysis_id
        );

        let mut records = Vec::new();
        for file in files {
            let suggestions = self
                .agent
                .generate_suggestions(&file.content, &file.path)
                .await
                .map_err(|e| {
                    MigralyzerError::generation_error(
                        AnalyzerKind::Java8To21.as_str(),
                        &file.path,
                        &e.to_string(),
                    )
                })?;

            log::info!("📝 {} suggestions for {}", suggestions.len(), file.path);

            let total = suggestions.len();
            for (index, agent_suggestion) in suggestions.into_iter().enumerate() {
                let last = index + 1 == total;
                let suggestion = Suggestion::from_agent(
                    analysis_id,
                    AnalyzerKind::Java8To21,
                    agent_suggestion,
                    last,
                )?;
                records.push(SuggestionRecord::new(suggestion, request));
            }
        }

        Ok(records)
    }
}
