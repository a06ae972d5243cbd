//! CLI type definitions

use clap::{Parser, Subcommand};

use super::commands::{
    init::InitArgs, listen::ListenArgs, logs::LogsArgs, status::StatusArgs, sync::SyncArgs,
    whoami::WhoamiArgs,
};

#[derive(Parser)]
#[command(name = "bmsync")]
#[command(
    about = "Push review, edit and maintained-progress counts to Beeminder",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create .bmsync/config.yaml and the database
    Init(InitArgs),

    /// Show configured goals and today's counts
    Status(StatusArgs),

    /// Run one sync for a metric
    Sync(SyncArgs),

    /// Check the configured Beeminder credentials
    Whoami(WhoamiArgs),

    /// Show or clear the trace log
    Logs(LogsArgs),

    /// Read host events as JSON lines from stdin and sync on them
    Listen(ListenArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sync_with_global_json() {
        let cli = Cli::try_parse_from(["bmsync", "sync", "reviewCount", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Sync(ref args) if args.metric == "reviewCount"));
    }

    #[test]
    fn test_logs_defaults() {
        let cli = Cli::try_parse_from(["bmsync", "logs"]).unwrap();
        match cli.command {
            Commands::Logs(args) => {
                assert_eq!(args.limit, 10);
                assert!(!args.clear);
            }
            _ => panic!("expected logs"),
        }
    }
}
