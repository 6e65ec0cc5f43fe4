use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::enums::analyzer_kind::AnalyzerKind;
use crate::enums::suggestion_status::SuggestionStatus;
use crate::errors::{MigralyzerError, MigralyzerResult};
use crate::structs::suggestion::Suggestion;
use crate::structs::suggestion_record::SuggestionRecord;
use crate::traits::suggestion_store::SuggestionStore;

/// SQLite-backed suggestion store. Each record is one row keyed by
/// (analysis_id, suggestion_id); queries by analysis return rows in
/// insertion order, which callers must not rely on.
pub struct SqliteSuggestionStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSuggestionStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> MigralyzerResult<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS code_suggestions (
                analysis_id TEXT NOT NULL,
                suggestion_id TEXT NOT NULL,
                file_path TEXT NOT NULL,
                analyzer TEXT NOT NULL,
                description TEXT NOT NULL,
                start_line INTEGER NOT NULL,
                end_line INTEGER NOT NULL,
                original_snippet TEXT NOT NULL,
                modified_code TEXT NOT NULL,
                difficulty_level INTEGER NOT NULL,
                is_last INTEGER NOT NULL DEFAULT 0,
                additional_notes TEXT,
                repo TEXT NOT NULL,
                created_at TEXT NOT NULL,
                status TEXT NOT NULL,
                params TEXT,
                PRIMARY KEY (analysis_id, suggestion_id)
            )
            "#,
            [],
        )?;

        log::info!("💾 Suggestion store ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<SuggestionRecord> {
        let analysis_id: String = row.get(0)?;
        let suggestion_id: String = row.get(1)?;
        let analyzer: String = row.get(3)?;
        let created_at: String = row.get(13)?;
        let status: String = row.get(14)?;
        let params_json: Option<String> = row.get(15)?;

        let params: Option<HashMap<String, String>> = match params_json {
            Some(json) => Some(serde_json::from_str(&json).map_err(|e| invalid_column(15, e))?),
            None => None,
        };

        Ok(SuggestionRecord {
            suggestion: Suggestion {
                id: Uuid::parse_str(&suggestion_id).map_err(|e| invalid_column(1, e))?,
                analysis_id: Uuid::parse_str(&analysis_id).map_err(|e| invalid_column(0, e))?,
                file_path: row.get(2)?,
                analyzer: AnalyzerKind::from_str(&analyzer)
                    .map_err(|e| invalid_column(3, SimpleError(e)))?,
                description: row.get(4)?,
                start_line: row.get::<_, i64>(5)? as u32,
                end_line: row.get::<_, i64>(6)? as u32,
                original_snippet: row.get(7)?,
                modified_code: row.get(8)?,
                difficulty_level: row.get::<_, i64>(9)? as u8,
                last: row.get::<_, i64>(10)? != 0,
                additional_notes: row.get(11)?,
            },
            repo: row.get(12)?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| invalid_column(13, e))?
                .with_timezone(&Utc),
            status: SuggestionStatus::from_str(&status)
                .map_err(|e| invalid_column(14, SimpleError(e)))?,
            params,
        })
    }
}

const SELECT_COLUMNS: &str = "analysis_id, suggestion_id, file_path, analyzer, description, \
     start_line, end_line, original_snippet, modified_code, difficulty_level, \
     is_last, additional_notes, repo, created_at, status, params";

#[async_trait]
impl SuggestionStore for SqliteSuggestionStore {
    async fn put_suggestion(&self, record: &SuggestionRecord) -> MigralyzerResult<()> {
        let params_json = match &record.params {
            Some(params) => Some(serde_json::to_string(params)?),
            None => None,
        };

        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO code_suggestions (
                analysis_id, suggestion_id, file_path, analyzer, description,
                start_line, end_line, original_snippet, modified_code, difficulty_level,
                is_last, additional_notes, repo, created_at, status, params
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                record.suggestion.analysis_id.to_string(),
                record.suggestion.id.to_string(),
                record.suggestion.file_path,
                record.suggestion.analyzer.as_str(),
                record.suggestion.description,
                record.suggestion.start_line as i64,
                record.suggestion.end_line as i64,
                record.suggestion.original_snippet,
                record.suggestion.modified_code,
                record.suggestion.difficulty_level as i64,
                record.suggestion.last as i64,
                record.suggestion.additional_notes,
                record.repo,
                record.created_at.to_rfc3339(),
                record.status.as_str(),
                params_json,
            ],
        )
        .map_err(|e| {
            MigralyzerError::persistence_error(
                &record.suggestion.analysis_id.to_string(),
                "put_suggestion",
                &e.to_string(),
            )
        })?;

        Ok(())
    }

    async fn query_by_analysis(&self, analysis_id: Uuid) -> MigralyzerResult<Vec<SuggestionRecord>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM code_suggestions WHERE analysis_id = ?1",
            SELECT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![analysis_id.to_string()], Self::row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    async fn get_suggestion(&self, analysis_id: Uuid, suggestion_id: Uuid) -> MigralyzerResult<Option<SuggestionRecord>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM code_suggestions WHERE analysis_id = ?1 AND suggestion_id = ?2",
            SELECT_COLUMNS
        ))?;

        let record = stmt
            .query_row(
                params![analysis_id.to_string(), suggestion_id.to_string()],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record)
    }
}

fn invalid_column<E>(index: usize, error: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(error))
}

#[derive(Debug)]
struct SimpleError(String);

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SimpleError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use crate::structs::agent_suggestion::AgentSuggestion;
    use crate::structs::analysis_request::AnalysisRequest;

    fn store(dir: &TempDir) -> SqliteSuggestionStore {
        SqliteSuggestionStore::new(dir.path().join("suggestions.db")).unwrap()
    }

    fn request_with_id() -> (AnalysisRequest, Uuid) {
        let mut request: AnalysisRequest = serde_json::from_str(
            r#"{"repo": "/tmp/legacy", "analyzers": ["java8to21"], "params": {"branch": "main"}}"#,
        )
        .unwrap();
        let id = request.ensure_id();
        (request, id)
    }

    fn record(request: &AnalysisRequest, analysis_id: Uuid, file_path: &str, last: bool) -> SuggestionRecord {
        let suggestion = Suggestion::from_agent(
            analysis_id,
            AnalyzerKind::Java8To21,
            AgentSuggestion {
                file_path: file_path.to_string(),
                description: "Use text blocks".to_string(),
                start_line: 2,
                end_line: 6,
                original_snippet: "String s = \"a\" + \"b\";".to_string(),
                modified_code: "String s = \"\"\"ab\"\"\";".to_string(),
                difficulty_level: 2,
                additional_notes: Some("Java 15+".to_string()),
            },
            last,
        )
        .unwrap();
        SuggestionRecord::new(suggestion, request)
    }

    #[tokio::test]
    async fn put_then_query_roundtrips_the_record() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let (request, analysis_id) = request_with_id();

        store.put_suggestion(&record(&request, analysis_id, "A.java", true)).await.unwrap();

        let records = store.query_by_analysis(analysis_id).await.unwrap();
        assert_eq!(records.len(), 1);

        let loaded = &records[0];
        assert_eq!(loaded.suggestion.analysis_id, analysis_id);
        assert_eq!(loaded.suggestion.file_path, "A.java");
        assert_eq!(loaded.suggestion.analyzer, AnalyzerKind::Java8To21);
        assert_eq!(loaded.suggestion.start_line, 2);
        assert_eq!(loaded.suggestion.end_line, 6);
        assert_eq!(loaded.suggestion.difficulty_level, 2);
        assert!(loaded.suggestion.last);
        assert_eq!(loaded.suggestion.additional_notes.as_deref(), Some("Java 15+"));
        assert_eq!(loaded.repo, "/tmp/legacy");
        assert_eq!(loaded.status, SuggestionStatus::Pending);
        assert_eq!(loaded.params.as_ref().unwrap().get("branch").unwrap(), "main");
    }

    #[tokio::test]
    async fn query_only_returns_the_requested_analysis() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let (request_a, id_a) = request_with_id();
        let (request_b, id_b) = request_with_id();

        store.put_suggestion(&record(&request_a, id_a, "A.java", false)).await.unwrap();
        store.put_suggestion(&record(&request_a, id_a, "B.java", true)).await.unwrap();
        store.put_suggestion(&record(&request_b, id_b, "C.java", true)).await.unwrap();

        assert_eq!(store.query_by_analysis(id_a).await.unwrap().len(), 2);
        assert_eq!(store.query_by_analysis(id_b).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn query_for_unknown_analysis_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.query_by_analysis(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_suggestion_finds_a_single_item() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let (request, analysis_id) = request_with_id();
        let stored = record(&request, analysis_id, "A.java", true);

        store.put_suggestion(&stored).await.unwrap();

        let found = store
            .get_suggestion(analysis_id, stored.suggestion.id)
            .await
            .unwrap()
            .expect("stored suggestion should be found");
        assert_eq!(found.suggestion.id, stored.suggestion.id);

        assert!(store
            .get_suggestion(analysis_id, Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }
}
