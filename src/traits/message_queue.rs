use std::time::Duration;
use async_trait::async_trait;
use crate::errors::MigralyzerResult;
use crate::structs::queue_message::QueueMessage;

/// Managed-queue contract the worker loop relies on: long-poll batch
/// receive, explicit delete-on-success, and implicit redelivery of
/// undeleted messages once their visibility timeout expires.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Enqueue a message body and return the queue's message identifier.
    async fn send_message(&self, body: String) -> MigralyzerResult<String>;

    /// Receive up to `max_messages`, waiting up to `wait_time` for the first
    /// one. An empty vec means the wait elapsed with nothing available.
    async fn receive_messages(&self, max_messages: usize, wait_time: Duration) -> MigralyzerResult<Vec<QueueMessage>>;

    /// Acknowledge a received message so it is never delivered again.
    async fn delete_message(&self, receipt_handle: &str) -> MigralyzerResult<()>;
}
