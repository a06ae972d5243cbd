//! Implementation of the `bmsync logs` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::adapters::sqlite::{database_url, initialize_database, SqliteTraceLog};
use crate::cli::display::{action_success, output, truncate, CommandOutput};
use crate::domain::ports::{TraceEntry, TraceLog};
use crate::infrastructure::config::ConfigLoader;

const MAX_MESSAGE_WIDTH: usize = 160;

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Number of most recent lines to show
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Delete the whole log
    #[arg(long)]
    pub clear: bool,
}

#[derive(Debug, Serialize)]
pub struct LogsOutput {
    pub total: u64,
    pub cleared: bool,
    pub entries: Vec<TraceEntry>,
}

impl CommandOutput for LogsOutput {
    fn to_human(&self) -> String {
        if self.cleared {
            return action_success(&format!("Cleared {} log line(s)", self.total));
        }
        if self.entries.is_empty() {
            return "No log lines.".to_string();
        }
        let mut lines = vec![format!(
            "Showing the last {} of {} log line(s):",
            self.entries.len(),
            self.total
        )];
        for entry in &self.entries {
            lines.push(format!(
                "  {}  {}",
                entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                truncate(&entry.message, MAX_MESSAGE_WIDTH)
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: LogsArgs, json_mode: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let pool = initialize_database(&database_url(&config.database.path))
        .await
        .context("Failed to open database")?;
    let log = SqliteTraceLog::new(pool);

    let out = run(&log, &args).await?;
    output(&out, json_mode);
    Ok(())
}

async fn run(log: &dyn TraceLog, args: &LogsArgs) -> Result<LogsOutput> {
    let total = log.count().await?;
    if args.clear {
        log.clear().await?;
        return Ok(LogsOutput {
            total,
            cleared: true,
            entries: Vec::new(),
        });
    }
    Ok(LogsOutput {
        total,
        cleared: false,
        entries: log.recent(args.limit).await?,
    })
}
