use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    // Overridable with MIGRALYZER_DB_PATH at load time
    #[serde(default = "ConfigHelper::default_db_path")]
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: ConfigHelper::default_db_path(),
        }
    }
}
