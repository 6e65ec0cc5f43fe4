use std::sync::Arc;
use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::config::constants::wait_duration_secs;
use crate::constants::prompts::JAVA_MIGRATION_PROMPT;
use crate::enums::commands::Commands;
use crate::errors::{MigralyzerError, MigralyzerResult};
use crate::helpers::shutdown::shutdown_channel;
use crate::services::ai_providers::create_provider;
use crate::services::memory_queue::InMemoryQueue;
use crate::services::repo_scanner::RepoScanner;
use crate::services::sqlite_store::SqliteSuggestionStore;
use crate::services::suggestion_agent::SuggestionAgent;
use crate::structs::config::config::Config;
use crate::traits::message_queue::MessageQueue;
use crate::traits::suggestion_store::SuggestionStore;
use crate::ui::api_server::ApiServer;
use crate::workers::queue_processor::QueueProcessor;

pub struct CommandRunner;

impl CommandRunner {
    pub async fn run_command(command: Commands) -> MigralyzerResult<()> {
        let start_time = Instant::now();

        let result = match command {
            Commands::Init => Self::init_command().await,
            Commands::Validate => Self::validate_command().await,
            Commands::Serve { port } => Self::serve_command(port).await,
            Commands::Analyze { path } => Self::analyze_command(path).await,
        };

        log::info!("⏱️ Command completed in {:.2}s", start_time.elapsed().as_secs_f64());
        result
    }

    async fn init_command() -> MigralyzerResult<()> {
        log::info!("🚀 Initializing migralyzer configuration...");

        match ConfigManager::create_sample_config() {
            Ok(_) => {
                log::info!("✅ Configuration file created successfully!");
                log::info!("📝 Edit the configuration file to pick a provider and model.");
                log::info!("🔧 Run 'migralyzer validate' to check your configuration.");
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                Err(e)
            }
        }
    }

    async fn validate_command() -> MigralyzerResult<()> {
        log::info!("🔍 Validating migralyzer configuration...");

        let config = Self::load_config()?;

        match ConfigManager::validate_config(&config) {
            Ok(()) => {
                log::info!("✅ Configuration is valid");
                log::info!("🤖 Provider: {} ({})", config.ai.provider, config.ai.model);
                log::info!("💾 Store: {}", config.store.db_path);
                Ok(())
            }
            Err(errors) => {
                log::error!("❌ Configuration issues found:");
                for error in &errors {
                    log::error!("   - {}", error);
                }
                Err(MigralyzerError::config_error(
                    &format!("{} configuration issues", errors.len()),
                    None,
                    Some("Fix the issues above and validate again"),
                ))
            }
        }
    }

    /// Run the HTTP facade and the queue worker in one process, sharing the
    /// queue and the suggestion store. Ctrl-C triggers coordinated shutdown:
    /// polling stops, in-flight analyses finish, then the server goes down.
    async fn serve_command(port: Option<u16>) -> MigralyzerResult<()> {
        let config = Self::load_config()?;
        ConfigManager::validate_config(&config).map_err(|errors| {
            MigralyzerError::config_error(&errors.join("; "), None, None)
        })?;
        let port = port.unwrap_or(config.server.port);

        let provider = create_provider(&config.ai)?;
        let queue: Arc<dyn MessageQueue> = Arc::new(InMemoryQueue::new(wait_duration_secs(
            config.queue.visibility_timeout_secs,
        )));
        let store: Arc<dyn SuggestionStore> =
            Arc::new(SqliteSuggestionStore::new(&config.store.db_path)?);

        let (shutdown_trigger, shutdown_token) = shutdown_channel();

        let processor = Arc::new(QueueProcessor::new(
            Arc::clone(&queue),
            Arc::clone(&store),
            provider,
            config.queue.clone(),
            &config.worker,
            shutdown_token,
        ));
        let worker_task = tokio::spawn(Arc::clone(&processor).run());

        let mut server = ApiServer::new(Arc::clone(&queue), Arc::clone(&store), port);
        server.start().await?;

        log::info!("⏹️ Press Ctrl+C to stop");
        tokio::signal::ctrl_c().await.map_err(|e| {
            MigralyzerError::system_error("signal", &e.to_string())
        })?;

        log::info!("🛑 Shutdown requested");
        shutdown_trigger.trigger();
        if let Err(e) = worker_task.await {
            log::error!("❌ Worker task panicked: {}", e);
        }
        server.shutdown().await?;

        Ok(())
    }

    /// One-shot local analysis without the queue: scan a directory, run the
    /// agent over every Java file, and print the suggestions.
    async fn analyze_command(path: String) -> MigralyzerResult<()> {
        let config = Self::load_config()?;
        let provider = create_provider(&config.ai)?;
        let agent = SuggestionAgent::new(provider, JAVA_MIGRATION_PROMPT);

        let scanner = RepoScanner::new(path.clone());
        let files = scanner.scan_java_files()?;

        if files.is_empty() {
            log::warn!("⚠️ No Java files found under '{}'", path);
            return Ok(());
        }

        log::info!("🔍 Analyzing {} Java files under '{}'", files.len(), path);

        for file in files {
            log::info!("\n{}", "-".repeat(40));
            log::info!("📄 Analyzing file: {}", file.path);

            match agent.generate_suggestions(&file.content, &file.path).await {
                Ok(suggestions) => {
                    if suggestions.is_empty() {
                        log::info!("✨ Nothing to modernize");
                        continue;
                    }
                    for suggestion in suggestions {
                        log::info!("📝 {}", suggestion.description);
                        log::info!(
                            "   Original snippet (lines {}-{}):",
                            suggestion.start_line,
                            suggestion.end_line
                        );
                        log::info!("{}", suggestion.original_snippet);
                        log::info!("   Modernized code:");
                        log::info!("{}", suggestion.modified_code);
                        log::info!("   Difficulty level: {}", suggestion.difficulty_level);
                        if let Some(notes) = &suggestion.additional_notes {
                            log::info!("   Notes: {}", notes);
                        }
                    }
                }
                Err(e) => {
                    log::error!("❌ Error analyzing {}: {}", file.path, e);
                }
            }
        }

        Ok(())
    }

    fn load_config() -> MigralyzerResult<Config> {
        ConfigManager::load().map_err(|e| {
            log::error!("❌ Failed to load configuration: {}", e);
            log::error!("💡 Run 'migralyzer init' to create a configuration file.");
            e
        })
    }
}
