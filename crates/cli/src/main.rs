//! Eatba CLI: the main entry point.
//!
//! Commands:
//! - `serve`: Start the LINE webhook server
//! - `chat`: Talk to the bot from the terminal
//! - `status`: Show configuration and catalog counts
//! - `doctor`: Diagnose configuration and data files
//! - `init`: Write a default config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "eatba",
    about = "Eatba: Taichung restaurant recommendations on LINE",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.eatba/config.toml)
    #[arg(short, long, global = true, env = "EATBA_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Chat with the bot in the terminal
    Chat {
        /// User id the messages are sent as
        #[arg(short, long, default_value = "local-user")]
        user: String,
    },

    /// Show configuration and catalog status
    Status,

    /// Diagnose configuration and data files
    Doctor,

    /// Write a default config file
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve { port } => commands::serve::run(config_path, port).await?,
        Commands::Chat { user } => commands::chat::run(config_path, &user).await?,
        Commands::Status => commands::status::run(config_path).await?,
        Commands::Doctor => commands::doctor::run(config_path).await?,
        Commands::Init => commands::init::run(config_path).await?,
    }

    Ok(())
}
