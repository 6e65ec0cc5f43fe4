pub mod config;
pub mod ai_config;
pub mod queue_config;
pub mod store_config;
pub mod worker_config;
pub mod server_config;
