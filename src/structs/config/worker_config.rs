use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WorkerConfig {
    // Upper bound on concurrently processed messages; sized to the model
    // provider's rate limit, not the queue's delivery rate.
    #[serde(default = "ConfigHelper::default_max_concurrent_messages")]
    pub max_concurrent_messages: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_messages: ConfigHelper::default_max_concurrent_messages(),
        }
    }
}
