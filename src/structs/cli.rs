use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "migralyzer")]
#[clap(about = "AI-powered code modernization pipeline", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
