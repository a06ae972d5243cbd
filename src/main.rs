//! bmsync CLI entry point.

use clap::Parser;

use bmsync::cli::{Cli, Commands};
use bmsync::domain::models::Config;
use bmsync::infrastructure::config::ConfigLoader;
use bmsync::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // `init` runs before any config exists, so fall back to defaults.
    let config = ConfigLoader::load().unwrap_or_else(|_| Config::default());
    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => Some(logger),
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            None
        }
    };

    let result = match cli.command {
        Commands::Init(args) => bmsync::cli::commands::init::execute(args, cli.json).await,
        Commands::Status(args) => bmsync::cli::commands::status::execute(args, cli.json).await,
        Commands::Sync(args) => bmsync::cli::commands::sync::execute(args, cli.json).await,
        Commands::Whoami(args) => bmsync::cli::commands::whoami::execute(args, cli.json).await,
        Commands::Logs(args) => bmsync::cli::commands::logs::execute(args, cli.json).await,
        Commands::Listen(args) => bmsync::cli::commands::listen::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        bmsync::cli::handle_error(err, cli.json);
    }
}
