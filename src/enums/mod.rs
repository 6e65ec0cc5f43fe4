pub mod analyzer_kind;
pub mod suggestion_status;
pub mod ai_provider_error;
pub mod agent_error;
pub mod commands;
