use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    Init,
    Validate,
    Serve {
        // Overrides [server].port from the config file
        #[clap(short, long)]
        port: Option<u16>,
    },
    Analyze {
        #[clap(short, long)]
        path: String,
    },
}
