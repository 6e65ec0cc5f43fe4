pub mod gemini;
pub mod anthropic;

use std::env;
use std::sync::Arc;
use crate::config::constants::{ANTHROPIC_API_KEY_ENV, GEMINI_API_KEY_ENV};
use crate::errors::{MigralyzerError, MigralyzerResult};
use crate::structs::config::ai_config::AiConfig;
use crate::traits::ai_provider::AiProvider;

/// Build the configured provider, resolving the API key from the
/// environment variable named in the config (or the provider's default).
pub fn create_provider(config: &AiConfig) -> MigralyzerResult<Arc<dyn AiProvider>> {
    match config.provider.as_str() {
        "gemini" => {
            let api_key = resolve_api_key(config, GEMINI_API_KEY_ENV)?;
            Ok(Arc::new(gemini::GeminiProvider::new(api_key, config)))
        }
        "anthropic" => {
            let api_key = resolve_api_key(config, ANTHROPIC_API_KEY_ENV)?;
            Ok(Arc::new(anthropic::AnthropicProvider::new(api_key, config)))
        }
        other => Err(MigralyzerError::config_error(
            &format!("Unknown AI provider: {}", other),
            Some("ai.provider"),
            Some("Supported providers are 'gemini' and 'anthropic'"),
        )),
    }
}

fn resolve_api_key(config: &AiConfig, default_env: &str) -> MigralyzerResult<String> {
    let env_name = config.api_key_env.as_deref().unwrap_or(default_env);
    env::var(env_name).map_err(|_| {
        MigralyzerError::config_error(
            &format!("API key environment variable '{}' is not set", env_name),
            Some("ai.api_key_env"),
            Some("Export the key before starting the worker"),
        )
    })
}
