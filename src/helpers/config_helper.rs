use std::path::PathBuf;
use crate::config::constants::DEFAULT_SERVER_PORT;

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_provider() -> String {
        "gemini".to_string()
    }

    pub fn default_model() -> String {
        "gemini-2.5-flash".to_string()
    }

    pub fn default_max_tokens() -> u32 {
        8192
    }

    pub fn default_temperature() -> f32 {
        0.0
    }

    pub fn default_max_batch_size() -> usize {
        10
    }

    pub fn default_wait_time_secs() -> u64 {
        20
    }

    pub fn default_idle_backoff_secs() -> u64 {
        10
    }

    pub fn default_visibility_timeout_secs() -> u64 {
        30
    }

    pub fn default_max_concurrent_messages() -> usize {
        5
    }

    pub fn default_server_port() -> u16 {
        DEFAULT_SERVER_PORT
    }

    pub fn default_db_path() -> String {
        Self::config_dir()
            .map(|dir| dir.join("suggestions.db"))
            .unwrap_or_else(|| PathBuf::from("suggestions.db"))
            .to_string_lossy()
            .to_string()
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join("migralyzer"))
    }

    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }
}
