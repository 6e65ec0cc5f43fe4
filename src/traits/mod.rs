pub mod ai_provider;
pub mod message_queue;
pub mod suggestion_store;
