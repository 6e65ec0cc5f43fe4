pub mod cli;
pub mod config;
pub mod file_info;
pub mod analysis_request;
pub mod agent_suggestion;
pub mod suggestion;
pub mod suggestion_record;
pub mod queue_message;
pub mod submit_response;
pub mod analysis_report;
pub mod processing_stats;
