use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use tempfile::TempDir;
use uuid::Uuid;
use warp::http::StatusCode;

use migralyzer::enums::ai_provider_error::AiProviderError;
use migralyzer::helpers::shutdown::shutdown_channel;
use migralyzer::services::memory_queue::InMemoryQueue;
use migralyzer::services::sqlite_store::SqliteSuggestionStore;
use migralyzer::structs::analysis_report::AnalysisReport;
use migralyzer::structs::analysis_request::AnalysisRequest;
use migralyzer::structs::config::queue_config::QueueConfig;
use migralyzer::structs::config::worker_config::WorkerConfig;
use migralyzer::structs::submit_response::SubmitResponse;
use migralyzer::traits::ai_provider::AiProvider;
use migralyzer::traits::message_queue::MessageQueue;
use migralyzer::traits::suggestion_store::SuggestionStore;
use migralyzer::ui::api_server::ApiServer;
use migralyzer::workers::queue_processor::{MessageOutcome, QueueProcessor};

const NO_WAIT: Duration = Duration::from_millis(0);
const VISIBILITY: Duration = Duration::from_millis(40);

/// Plays back a fixed sequence of responses, one per chat call.
struct ScriptedProvider {
    responses: Vec<Result<String, AiProviderError>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn new(responses: Vec<Result<String, AiProviderError>>) -> Self {
        Self {
            responses,
            calls: AtomicUsize::new(0),
        }
    }

    fn always(response: &str) -> Self {
        Self::new(vec![Ok(response.to_string())])
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AiProvider for ScriptedProvider {
    async fn chat(&self, _system_prompt: String, _user_prompts: Vec<String>) -> Result<String, AiProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        // Repeat the final scripted response once the script runs out
        let index = call.min(self.responses.len() - 1);
        self.responses[index].clone()
    }
}

const ONE_LAST_SUGGESTION: &str = r#"{
    "suggestions": [
        {
            "file_path": "Main.java",
            "description": "Replace the loop with a stream",
            "start_line": 3,
            "end_line": 8,
            "original_snippet": "for (String s : items) { out.add(s.trim()); }",
            "modified_code": "items.stream().map(String::trim).toList();",
            "difficulty_level": 3,
            "additional_notes": "toList() needs Java 16+"
        }
    ]
}"#;

struct Pipeline {
    queue: Arc<InMemoryQueue>,
    store: Arc<SqliteSuggestionStore>,
    processor: QueueProcessor,
    provider: Arc<ScriptedProvider>,
    repo_dir: TempDir,
    _db_dir: TempDir,
}

fn pipeline(provider: ScriptedProvider) -> Pipeline {
    let repo_dir = TempDir::new().unwrap();
    fs::write(
        repo_dir.path().join("Main.java"),
        "class Main { void run() {} }",
    )
    .unwrap();

    let db_dir = TempDir::new().unwrap();
    let queue = Arc::new(InMemoryQueue::new(VISIBILITY));
    let store = Arc::new(SqliteSuggestionStore::new(db_dir.path().join("suggestions.db")).unwrap());
    let provider = Arc::new(provider);
    let (_trigger, shutdown) = shutdown_channel();

    let processor = QueueProcessor::new(
        Arc::clone(&queue) as Arc<dyn MessageQueue>,
        Arc::clone(&store) as Arc<dyn SuggestionStore>,
        Arc::clone(&provider) as Arc<dyn AiProvider>,
        QueueConfig::default(),
        &WorkerConfig::default(),
        shutdown,
    );

    Pipeline {
        queue,
        store,
        processor,
        provider,
        repo_dir,
        _db_dir: db_dir,
    }
}

fn api(pipeline: &Pipeline) -> impl warp::Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    ApiServer::routes(
        Arc::clone(&pipeline.queue) as Arc<dyn MessageQueue>,
        Arc::clone(&pipeline.store) as Arc<dyn SuggestionStore>,
    )
}

async fn submit(pipeline: &Pipeline, analysis_id: Uuid) -> SubmitResponse {
    let response = warp::test::request()
        .method("POST")
        .path("/analyze")
        .json(&serde_json::json!({
            "id": analysis_id,
            "repo": pipeline.repo_dir.path().to_string_lossy(),
            "analyzers": ["java8to21"]
        }))
        .reply(&api(pipeline))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_slice(response.body()).unwrap()
}

async fn fetch(pipeline: &Pipeline, analysis_id: Uuid) -> (StatusCode, Vec<u8>) {
    let response = warp::test::request()
        .method("GET")
        .path(&format!("/analyze/{}", analysis_id))
        .reply(&api(pipeline))
        .await;
    (response.status(), response.body().to_vec())
}

#[tokio::test]
async fn submitted_request_is_received_back_from_the_queue() {
    let pipeline = pipeline(ScriptedProvider::always(ONE_LAST_SUGGESTION));
    let analysis_id = Uuid::new_v4();

    let submitted = submit(&pipeline, analysis_id).await;
    assert!(!submitted.message_id.is_empty());

    let messages = pipeline.queue.receive_messages(10, NO_WAIT).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message_id, submitted.message_id);

    let request: AnalysisRequest = serde_json::from_str(&messages[0].body).unwrap();
    assert_eq!(request.id, Some(analysis_id));
    assert_eq!(request.repo, pipeline.repo_dir.path().to_string_lossy());
}

#[tokio::test]
async fn full_pipeline_produces_a_completed_report() {
    let pipeline = pipeline(ScriptedProvider::always(ONE_LAST_SUGGESTION));
    let analysis_id = Uuid::new_v4();

    // Before any processing the fetch has nothing to say
    let (status, _) = fetch(&pipeline, analysis_id).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    submit(&pipeline, analysis_id).await;

    let message = pipeline
        .queue
        .receive_messages(1, NO_WAIT)
        .await
        .unwrap()
        .pop()
        .unwrap();
    let outcome = pipeline.processor.process_message(message).await.unwrap();
    assert_eq!(outcome, MessageOutcome::Processed);

    let (status, body) = fetch(&pipeline, analysis_id).await;
    assert_eq!(status, StatusCode::OK);

    let report: AnalysisReport = serde_json::from_slice(&body).unwrap();
    assert_eq!(report.id, analysis_id);
    assert!(report.completed);
    assert_eq!(report.suggestions.len(), 1);

    let suggestion = &report.suggestions[0];
    assert_eq!(suggestion.analysis_id, analysis_id);
    assert_eq!(suggestion.file_path, "Main.java");
    assert!(suggestion.last);
    assert!((1..=5).contains(&suggestion.difficulty_level));
    assert!(suggestion.start_line <= suggestion.end_line);

    // Message acknowledged: the queue stays empty past the visibility window
    tokio::time::sleep(VISIBILITY + Duration::from_millis(20)).await;
    assert_eq!(pipeline.queue.visible_len(), 0);
}

#[tokio::test]
async fn upstream_failure_keeps_the_message_queued_and_the_store_empty() {
    let pipeline = pipeline(ScriptedProvider::new(vec![Err(
        AiProviderError::NetworkError("connect timeout".to_string()),
    )]));
    let analysis_id = Uuid::new_v4();

    submit(&pipeline, analysis_id).await;

    let message = pipeline
        .queue
        .receive_messages(1, NO_WAIT)
        .await
        .unwrap()
        .pop()
        .unwrap();
    assert!(pipeline.processor.process_message(message).await.is_err());

    // No partial results, and the message comes back after the timeout
    let (status, _) = fetch(&pipeline, analysis_id).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    tokio::time::sleep(VISIBILITY + Duration::from_millis(20)).await;
    let redelivered = pipeline.queue.receive_messages(1, NO_WAIT).await.unwrap();
    assert_eq!(redelivered.len(), 1);
}

#[tokio::test]
async fn malformed_bodies_are_dropped_without_a_model_call() {
    let pipeline = pipeline(ScriptedProvider::always(ONE_LAST_SUGGESTION));

    pipeline
        .queue
        .send_message("{not valid json".to_string())
        .await
        .unwrap();

    let message = pipeline
        .queue
        .receive_messages(1, NO_WAIT)
        .await
        .unwrap()
        .pop()
        .unwrap();
    let outcome = pipeline.processor.process_message(message).await.unwrap();
    assert_eq!(outcome, MessageOutcome::Poisoned);

    assert_eq!(pipeline.provider.call_count(), 0);
    tokio::time::sleep(VISIBILITY + Duration::from_millis(20)).await;
    assert_eq!(pipeline.queue.visible_len(), 0);
}

#[tokio::test]
async fn worker_loop_drains_submissions_end_to_end() {
    // Drive the real poll loop instead of feeding messages by hand.
    let repo_dir = TempDir::new().unwrap();
    fs::write(repo_dir.path().join("Main.java"), "class Main {}").unwrap();
    let db_dir = TempDir::new().unwrap();

    let queue = Arc::new(InMemoryQueue::new(Duration::from_secs(30)));
    let store = Arc::new(SqliteSuggestionStore::new(db_dir.path().join("s.db")).unwrap());
    let (trigger, shutdown) = shutdown_channel();

    let queue_config = QueueConfig {
        max_batch_size: 10,
        wait_time_secs: 1,
        idle_backoff_secs: 1,
        visibility_timeout_secs: 30,
    };
    let processor = Arc::new(QueueProcessor::new(
        Arc::clone(&queue) as Arc<dyn MessageQueue>,
        Arc::clone(&store) as Arc<dyn SuggestionStore>,
        Arc::new(ScriptedProvider::always(ONE_LAST_SUGGESTION)) as Arc<dyn AiProvider>,
        queue_config,
        &WorkerConfig::default(),
        shutdown,
    ));
    let stats = processor.stats();
    let worker = tokio::spawn(Arc::clone(&processor).run());

    let analysis_id = Uuid::new_v4();
    let body = format!(
        r#"{{"id": "{}", "repo": "{}", "analyzers": ["java8to21"]}}"#,
        analysis_id,
        repo_dir.path().to_string_lossy()
    );
    queue.send_message(body).await.unwrap();

    // Wait for the worker to pick it up and finish
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while stats.processed() == 0 && std::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    trigger.trigger();
    worker.await.unwrap();

    assert_eq!(stats.processed(), 1);
    assert_eq!(stats.failed(), 0);
    let records = store.query_by_analysis(analysis_id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].suggestion.last);
}
