use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QueueConfig {
    #[serde(default = "ConfigHelper::default_max_batch_size")]
    pub max_batch_size: usize,

    // Long-poll wait per receive call
    #[serde(default = "ConfigHelper::default_wait_time_secs")]
    pub wait_time_secs: u64,

    // Sleep between polls when a receive returns nothing
    #[serde(default = "ConfigHelper::default_idle_backoff_secs")]
    pub idle_backoff_secs: u64,

    // How long a received-but-unacknowledged message stays hidden
    #[serde(default = "ConfigHelper::default_visibility_timeout_secs")]
    pub visibility_timeout_secs: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_batch_size: ConfigHelper::default_max_batch_size(),
            wait_time_secs: ConfigHelper::default_wait_time_secs(),
            idle_backoff_secs: ConfigHelper::default_idle_backoff_secs(),
            visibility_timeout_secs: ConfigHelper::default_visibility_timeout_secs(),
        }
    }
}
