use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use tokio::sync::Notify;
use uuid::Uuid;
use crate::config::constants::{sleep_duration_millis, QUEUE_POLL_SLICE_MS};
use crate::errors::{MigralyzerError, MigralyzerResult};
use crate::structs::queue_message::QueueMessage;
use crate::traits::message_queue::MessageQueue;

struct StoredMessage {
    message_id: String,
    body: String,
}

struct InFlightMessage {
    message: StoredMessage,
    visible_again_at: Instant,
}

#[derive(Default)]
struct QueueState {
    ready: VecDeque<StoredMessage>,
    in_flight: HashMap<String, InFlightMessage>,
}

impl QueueState {
    /// Move every in-flight message whose visibility timeout has expired
    /// back to the front of the ready queue. This is the redelivery path:
    /// a message that was received but never deleted reappears here.
    fn reclaim_expired(&mut self, now: Instant) {
        let expired: Vec<String> = self
            .in_flight
            .iter()
            .filter(|(_, entry)| entry.visible_again_at <= now)
            .map(|(handle, _)| handle.clone())
            .collect();

        for handle in expired {
            if let Some(entry) = self.in_flight.remove(&handle) {
                self.ready.push_front(entry.message);
            }
        }
    }
}

/// In-process queue with managed-queue delivery semantics: long-poll batch
/// receive, per-delivery receipt handles, visibility timeout with implicit
/// redelivery, and explicit delete as the only acknowledgment.
pub struct InMemoryQueue {
    state: Mutex<QueueState>,
    notify: Notify,
    visibility_timeout: Duration,
}

impl InMemoryQueue {
    pub fn new(visibility_timeout: Duration) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            notify: Notify::new(),
            visibility_timeout,
        }
    }

    /// Messages currently waiting for delivery (excludes in-flight ones).
    pub fn visible_len(&self) -> usize {
        let mut state = self.state.lock().expect("queue state poisoned");
        state.reclaim_expired(Instant::now());
        state.ready.len()
    }

    fn try_receive(&self, max_messages: usize) -> Vec<QueueMessage> {
        let mut state = self.state.lock().expect("queue state poisoned");
        let now = Instant::now();
        state.reclaim_expired(now);

        let mut received = Vec::new();
        while received.len() < max_messages {
            let Some(message) = state.ready.pop_front() else {
                break;
            };
            let receipt_handle = Uuid::new_v4().to_string();
            received.push(QueueMessage {
                message_id: message.message_id.clone(),
                receipt_handle: receipt_handle.clone(),
                body: message.body.clone(),
            });
            state.in_flight.insert(
                receipt_handle,
                InFlightMessage {
                    message,
                    visible_again_at: now + self.visibility_timeout,
                },
            );
        }
        received
    }
}

#[async_trait]
impl MessageQueue for InMemoryQueue {
    async fn send_message(&self, body: String) -> MigralyzerResult<String> {
        let message_id = Uuid::new_v4().to_string();
        {
            let mut state = self.state.lock().expect("queue state poisoned");
            state.ready.push_back(StoredMessage {
                message_id: message_id.clone(),
                body,
            });
        }
        self.notify.notify_waiters();
        Ok(message_id)
    }

    async fn receive_messages(&self, max_messages: usize, wait_time: Duration) -> MigralyzerResult<Vec<QueueMessage>> {
        let deadline = Instant::now() + wait_time;

        loop {
            let received = self.try_receive(max_messages);
            if !received.is_empty() {
                return Ok(received);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(Vec::new());
            }

            // Wake on new sends, but also re-check periodically so messages
            // whose visibility expires mid-poll are picked up.
            let slice = remaining.min(sleep_duration_millis(QUEUE_POLL_SLICE_MS));
            tokio::select! {
                _ = self.notify.notified() => {}
                _ = tokio::time::sleep(slice) => {}
            }
        }
    }

    async fn delete_message(&self, receipt_handle: &str) -> MigralyzerResult<()> {
        let mut state = self.state.lock().expect("queue state poisoned");
        state
            .in_flight
            .remove(receipt_handle)
            .map(|_| ())
            .ok_or_else(|| {
                MigralyzerError::queue_error(
                    "delete_message",
                    &format!("unknown or expired receipt handle '{}'", receipt_handle),
                )
            })
    }
}
