use std::sync::Arc;
use tokio::sync::Semaphore;
use uuid::Uuid;
use crate::config::constants::wait_duration_secs;
use crate::enums::analyzer_kind::AnalyzerKind;
use crate::errors::MigralyzerResult;
use crate::helpers::shutdown::ShutdownToken;
use crate::services::analyzers::java_migration::JavaMigrationAnalyzer;
use crate::services::analyzers::simpler_migration::SimplerMigrationAnalyzer;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::config::queue_config::QueueConfig;
use crate::structs::config::worker_config::WorkerConfig;
use crate::structs::processing_stats::ProcessingStats;
use crate::structs::queue_message::QueueMessage;
use crate::structs::suggestion_record::SuggestionRecord;
use crate::traits::ai_provider::AiProvider;
use crate::traits::message_queue::MessageQueue;
use crate::traits::suggestion_store::SuggestionStore;

/// Terminal states of one message's journey through the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// All analyzers ran, every suggestion was persisted, message deleted.
    Processed,
    /// The body never parsed into an AnalysisRequest; deleted unretried.
    Poisoned,
}

/// The event-driven worker. Per message the lifecycle is:
/// received → parsed → dispatched per analyzer (in request order) →
/// persisted → deleted on full success, or left on the queue for
/// visibility-timeout redelivery on any failure. Malformed bodies are the
/// one exception: they are deleted immediately and never retried.
pub struct QueueProcessor {
    queue: Arc<dyn MessageQueue>,
    store: Arc<dyn SuggestionStore>,
    java_analyzer: Arc<JavaMigrationAnalyzer>,
    simpler_analyzer: Arc<SimplerMigrationAnalyzer>,
    queue_config: QueueConfig,
    max_concurrent_messages: usize,
    semaphore: Arc<Semaphore>,
    stats: Arc<ProcessingStats>,
    shutdown: ShutdownToken,
}

impl QueueProcessor {
    pub fn new(
        queue: Arc<dyn MessageQueue>,
        store: Arc<dyn SuggestionStore>,
        provider: Arc<dyn AiProvider>,
        queue_config: QueueConfig,
        worker_config: &WorkerConfig,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            queue,
            store,
            java_analyzer: Arc::new(JavaMigrationAnalyzer::new(provider)),
            simpler_analyzer: Arc::new(SimplerMigrationAnalyzer::new()),
            queue_config,
            max_concurrent_messages: worker_config.max_concurrent_messages,
            semaphore: Arc::new(Semaphore::new(worker_config.max_concurrent_messages)),
            stats: Arc::new(ProcessingStats::new()),
            shutdown,
        }
    }

    pub fn stats(&self) -> Arc<ProcessingStats> {
        Arc::clone(&self.stats)
    }

    /// Poll until shutdown, spawning one bounded task per received message.
    /// The loop never waits for in-flight tasks before polling again; the
    /// semaphore is the only brake on fan-out.
    pub async fn run(self: Arc<Self>) {
        log::info!(
            "🚀 Worker started: batch={} wait={}s backoff={}s concurrency={}",
            self.queue_config.max_batch_size,
            self.queue_config.wait_time_secs,
            self.queue_config.idle_backoff_secs,
            self.max_concurrent_messages
        );

        while !self.shutdown.is_shutdown() {
            // The long poll races the shutdown token so stopping never waits
            // out a full receive window.
            let shutdown = self.shutdown.clone();
            let received = tokio::select! {
                _ = shutdown.cancelled() => break,
                received = self.queue.receive_messages(
                    self.queue_config.max_batch_size,
                    wait_duration_secs(self.queue_config.wait_time_secs),
                ) => received,
            };

            match received {
                Ok(messages) if !messages.is_empty() => {
                    log::info!("📥 Received {} messages", messages.len());
                    for message in messages {
                        self.stats.record_received();
                        Self::spawn_message_task(&self, message).await;
                    }
                }
                Ok(_) => {
                    log::debug!("Queue empty, backing off {}s", self.queue_config.idle_backoff_secs);
                    self.idle_sleep(self.queue_config.idle_backoff_secs).await;
                }
                Err(e) => {
                    log::error!("❌ Receive failed: {}", e);
                    self.idle_sleep(self.queue_config.idle_backoff_secs).await;
                }
            }
        }

        self.drain_in_flight().await;
        log::info!("🛑 Worker stopped ({})", self.stats.summary());
    }

    async fn spawn_message_task(processor: &Arc<Self>, message: QueueMessage) {
        // Permit is taken before spawning so a burst cannot outrun the pool
        let permit = Arc::clone(&processor.semaphore)
            .acquire_owned()
            .await
            .expect("worker semaphore closed");

        let processor = Arc::clone(processor);
        tokio::spawn(async move {
            let message_id = message.message_id.clone();
            match processor.process_message(message).await {
                Ok(MessageOutcome::Processed) => processor.stats.record_processed(),
                Ok(MessageOutcome::Poisoned) => processor.stats.record_poisoned(),
                Err(e) => {
                    processor.stats.record_failed();
                    log::error!("❌ Message {} failed, leaving for redelivery: {}", message_id, e);
                }
            }
            drop(permit);
        });
    }

    async fn idle_sleep(&self, seconds: u64) {
        let shutdown = self.shutdown.clone();
        tokio::select! {
            _ = shutdown.cancelled() => {}
            _ = tokio::time::sleep(wait_duration_secs(seconds)) => {}
        }
    }

    /// Wait for in-flight message tasks by taking every permit.
    async fn drain_in_flight(&self) {
        let _ = self
            .semaphore
            .acquire_many(self.max_concurrent_messages as u32)
            .await;
    }

    /// Process one message to completion. Also the entry point for tests
    /// that drive messages through without the poll loop.
    pub async fn process_message(&self, message: QueueMessage) -> MigralyzerResult<MessageOutcome> {
        let mut request: AnalysisRequest = match serde_json::from_str(&message.body) {
            Ok(request) => request,
            Err(e) => {
                // Poison-message policy: malformed input never improves by
                // retrying, so acknowledge it away and record the failure.
                log::error!("🗑️ Discarding malformed message {}: {}", message.message_id, e);
                self.queue.delete_message(&message.receipt_handle).await?;
                return Ok(MessageOutcome::Poisoned);
            }
        };

        let analysis_id = request.ensure_id();
        log::info!(
            "⚙️ Processing analysis {} for repo '{}' ({} analyzers)",
            analysis_id,
            request.repo,
            request.analyzers.len()
        );

        // Analyzers run in request order; the first failure aborts the rest
        // and leaves the message unacknowledged. Suggestions persisted by
        // earlier analyzers stay in the store, so a redelivered message
        // duplicates them under fresh suggestion ids.
        for analyzer in request.analyzers.clone() {
            let records = self.dispatch_analyzer(analyzer, &request, analysis_id).await?;
            self.persist_records(&records).await?;
        }

        self.queue.delete_message(&message.receipt_handle).await?;
        log::info!("✅ Analysis {} acknowledged", analysis_id);
        Ok(MessageOutcome::Processed)
    }

    async fn dispatch_analyzer(
        &self,
        analyzer: AnalyzerKind,
        request: &AnalysisRequest,
        analysis_id: Uuid,
    ) -> MigralyzerResult<Vec<SuggestionRecord>> {
        match analyzer {
            AnalyzerKind::Java8To21 => self.java_analyzer.run(request, analysis_id).await,
            AnalyzerKind::Simpler3To4 => self.simpler_analyzer.run(request, analysis_id).await,
        }
    }

    async fn persist_records(&self, records: &[SuggestionRecord]) -> MigralyzerResult<()> {
        for record in records {
            self.store.put_suggestion(record).await?;
        }
        Ok(())
    }
}
