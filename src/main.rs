use clap::Parser;
use migralyzer::structs::cli::Cli;
use migralyzer::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    CommandRunner::run_command(cli.command).await?;
    Ok(())
}
