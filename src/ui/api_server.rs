use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use serde_json::json;
use tokio::sync::oneshot;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::Filter;
use crate::config::constants::{sleep_duration_millis, SERVER_SHUTDOWN_GRACE_PERIOD_MS};
use crate::errors::{MigralyzerError, MigralyzerResult};
use crate::structs::analysis_report::AnalysisReport;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::submit_response::SubmitResponse;
use crate::traits::message_queue::MessageQueue;
use crate::traits::suggestion_store::SuggestionStore;

/// The submit/poll facade. POST /analyze enqueues a request and returns the
/// queue's message id; GET /analyze/{id} reads back whatever suggestions
/// have accumulated so far. A fetch cannot distinguish "never submitted"
/// from "submitted but not yet processed": both answer with no content.
pub struct ApiServer {
    queue: Arc<dyn MessageQueue>,
    store: Arc<dyn SuggestionStore>,
    port: u16,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    pub fn new(queue: Arc<dyn MessageQueue>, store: Arc<dyn SuggestionStore>, port: u16) -> Self {
        Self {
            queue,
            store,
            port,
            shutdown_tx: None,
        }
    }

    pub async fn start(&mut self) -> MigralyzerResult<SocketAddr> {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let routes = Self::routes(Arc::clone(&self.queue), Arc::clone(&self.store));

        let addr: SocketAddr = ([127, 0, 0, 1], self.port).into();
        let (bound_addr, server) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(addr, async {
                shutdown_rx.await.ok();
            })
            .map_err(|e| MigralyzerError::system_error("bind", &e.to_string()))?;

        tokio::spawn(server);

        log::info!("🌐 API server listening on http://{}", bound_addr);
        Ok(bound_addr)
    }

    pub async fn shutdown(&mut self) -> MigralyzerResult<()> {
        log::info!("🛑 Shutting down API server...");

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            shutdown_tx.send(()).map_err(|_| {
                MigralyzerError::system_error("shutdown", "Failed to send shutdown signal")
            })?;
        }

        tokio::time::sleep(sleep_duration_millis(SERVER_SHUTDOWN_GRACE_PERIOD_MS)).await;
        log::info!("✅ API server shutdown complete");

        Ok(())
    }

    pub fn routes(
        queue: Arc<dyn MessageQueue>,
        store: Arc<dyn SuggestionStore>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let queue_filter = warp::any().map(move || Arc::clone(&queue));
        let store_filter = warp::any().map(move || Arc::clone(&store));

        let submit = warp::path!("analyze")
            .and(warp::post())
            .and(warp::body::json())
            .and(queue_filter)
            .and_then(submit_handler);

        let fetch = warp::path!("analyze" / Uuid)
            .and(warp::get())
            .and(store_filter)
            .and_then(fetch_handler);

        submit.or(fetch)
    }
}

async fn submit_handler(
    mut request: AnalysisRequest,
    queue: Arc<dyn MessageQueue>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let analysis_id = request.ensure_id();

    let body = match serde_json::to_string(&request) {
        Ok(body) => body,
        Err(e) => return Ok(internal_error(&e.to_string())),
    };

    match queue.send_message(body).await {
        Ok(message_id) => {
            log::info!("📨 Enqueued analysis {} as message {}", analysis_id, message_id);
            Ok(Box::new(warp::reply::json(&SubmitResponse {
                message_id,
                status: "Message sent to queue successfully".to_string(),
            })))
        }
        Err(e) => {
            log::error!("❌ Submit failed: {}", e);
            Ok(internal_error(&e.to_string()))
        }
    }
}

async fn fetch_handler(
    analysis_id: Uuid,
    store: Arc<dyn SuggestionStore>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    match store.query_by_analysis(analysis_id).await {
        Ok(records) if records.is_empty() => Ok(Box::new(StatusCode::NO_CONTENT)),
        Ok(records) => {
            let suggestions = records.into_iter().map(|record| record.suggestion).collect();
            Ok(Box::new(warp::reply::json(&AnalysisReport::new(analysis_id, suggestions))))
        }
        Err(e) => {
            log::error!("❌ Fetch failed for analysis {}: {}", analysis_id, e);
            Ok(internal_error(&e.to_string()))
        }
    }
}

fn internal_error(detail: &str) -> Box<dyn warp::Reply> {
    Box::new(warp::reply::with_status(
        warp::reply::json(&json!({ "detail": detail })),
        StatusCode::INTERNAL_SERVER_ERROR,
    ))
}
