use crate::app::action::Action;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "flightsurety-dapp")]
#[command(about = "Terminal front end for the FlightSurety contracts")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "dapp-config.toml")]
    pub config: String,

    /// Network entry from the configuration (defaults to `default_network`, then "localhost")
    #[arg(short, long)]
    pub network: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Run a single action instead of an interactive session
    #[command(subcommand)]
    pub action: Option<Action>,
}
