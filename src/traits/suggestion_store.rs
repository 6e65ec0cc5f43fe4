use async_trait::async_trait;
use uuid::Uuid;
use crate::errors::MigralyzerResult;
use crate::structs::suggestion_record::SuggestionRecord;

/// Key-value store contract for suggestion records, keyed by
/// (analysis_id, suggestion_id). Queries return items in store-native
/// order; no ordering guarantee is part of the contract.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn put_suggestion(&self, record: &SuggestionRecord) -> MigralyzerResult<()>;

    async fn query_by_analysis(&self, analysis_id: Uuid) -> MigralyzerResult<Vec<SuggestionRecord>>;

    async fn get_suggestion(&self, analysis_id: Uuid, suggestion_id: Uuid) -> MigralyzerResult<Option<SuggestionRecord>>;
}
