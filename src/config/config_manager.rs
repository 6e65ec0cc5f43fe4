use std::env;
use std::fs;
use crate::config::constants::DB_PATH_ENV;
use crate::errors::{MigralyzerError, MigralyzerResult};
use crate::helpers::config_helper::ConfigHelper;
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {

    pub fn load() -> MigralyzerResult<Config> {
        let mut config = match ConfigHelper::config_file_path() {
            Some(path) if path.exists() => {
                log::info!("📋 Loading config from: {}", path.display());
                let content = fs::read_to_string(&path).map_err(|e| {
                    MigralyzerError::ConfigurationFileError {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    }
                })?;
                toml::from_str::<Config>(&content)?
            }
            _ => Config::default(),
        };

        if let Ok(db_path) = env::var(DB_PATH_ENV) {
            config.store.db_path = db_path;
        }

        Ok(config)
    }

    pub fn create_sample_config() -> MigralyzerResult<()> {
        let sample_config = r#"# Migralyzer Configuration

# AI Configuration
[ai]
# Supported providers: "gemini", "anthropic"
provider = "gemini"
model = "gemini-2.5-flash"
max_tokens = 8192
temperature = 0.0
api_key_env = "GEMINI_API_KEY"

# Queue Configuration
[queue]
# Messages received per poll (1-10)
max_batch_size = 10

# Long-poll wait per receive call (seconds)
wait_time_secs = 20

# Sleep between polls when the queue is empty (seconds)
idle_backoff_secs = 10

# How long an unacknowledged message stays invisible before redelivery (seconds)
visibility_timeout_secs = 30

# Result Store Configuration
[store]
# SQLite database holding persisted suggestions.
# Can be overridden with the MIGRALYZER_DB_PATH environment variable.
# db_path = "/home/user/migralyzer/suggestions.db"

# Worker Configuration
[worker]
# Maximum messages processed concurrently; size this to the model
# provider's rate limit.
max_concurrent_messages = 5

# HTTP Facade Configuration
[server]
port = 8080
"#;

        let config_dir = ConfigHelper::config_dir().ok_or_else(|| {
            MigralyzerError::system_error("init", "Could not resolve the home directory")
        })?;
        let config_path = ConfigHelper::config_file_path().ok_or_else(|| {
            MigralyzerError::system_error("init", "Could not resolve the home directory")
        })?;

        fs::create_dir_all(&config_dir)?;
        fs::write(&config_path, sample_config)?;
        log::info!("✅ Created sample config at: {}", config_path.display());
        Ok(())
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match config.ai.provider.as_str() {
            "gemini" | "anthropic" => {}
            other => errors.push(format!("Unknown AI provider: {}", other)),
        }

        if !(0.0..=2.0).contains(&config.ai.temperature) {
            errors.push(format!("Temperature out of range [0.0, 2.0]: {}", config.ai.temperature));
        }

        if config.queue.max_batch_size == 0 || config.queue.max_batch_size > 10 {
            errors.push(format!("Queue batch size must be 1-10: {}", config.queue.max_batch_size));
        }

        if config.queue.visibility_timeout_secs == 0 {
            errors.push("Visibility timeout must be greater than zero".to_string());
        }

        if config.worker.max_concurrent_messages == 0 {
            errors.push("Worker concurrency must be greater than zero".to_string());
        }

        if config.store.db_path.trim().is_empty() {
            errors.push("Store db_path must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(ConfigManager::validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn bad_provider_and_batch_size_are_collected() {
        let mut config = Config::default();
        config.ai.provider = "copilot".to_string();
        config.queue.max_batch_size = 0;

        let errors = ConfigManager::validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("copilot"));
    }

    #[test]
    fn toml_sections_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            [ai]
            provider = "anthropic"
            model = "claude-sonnet-4-20250514"

            [queue]
            wait_time_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.ai.provider, "anthropic");
        assert_eq!(config.queue.wait_time_secs, 5);
        // Untouched sections keep their defaults
        assert_eq!(config.queue.max_batch_size, 10);
        assert_eq!(config.worker.max_concurrent_messages, 5);
        assert_eq!(config.ai.temperature, 0.0);
    }
}
