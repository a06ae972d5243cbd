//! Implementation of the `bmsync sync` command.

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::application::{HostSnapshots, SyncRuntime};
use crate::cli::display::{action_failure, action_skipped, action_success, output, CommandOutput};
use crate::domain::models::{MetricId, SyncOutcome};
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// reviewCount, editCount or maintainedProgress
    pub metric: String,

    /// Card export used by maintainedProgress
    #[arg(long)]
    pub cards: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct SyncOutput {
    pub metric: MetricId,
    pub success: bool,
    pub status: &'static str,
    pub detail: String,
    pub value: Option<f64>,
    pub request_id: Option<String>,
}

impl From<(MetricId, &SyncOutcome)> for SyncOutput {
    fn from((metric, outcome): (MetricId, &SyncOutcome)) -> Self {
        let (status, value, request_id) = match outcome {
            SyncOutcome::Posted { value, request_id } => {
                ("posted", Some(*value), Some(request_id.to_string()))
            }
            SyncOutcome::Skipped(_) => ("skipped", None, None),
            SyncOutcome::Failed(_) => ("failed", None, None),
        };
        Self {
            metric,
            success: outcome.is_success(),
            status,
            detail: outcome.to_string(),
            value,
            request_id,
        }
    }
}

impl CommandOutput for SyncOutput {
    fn to_human(&self) -> String {
        let line = format!("{}: {}", self.metric, self.detail);
        match self.status {
            "posted" => action_success(&line),
            "skipped" => action_skipped(&line),
            _ => action_failure(&line),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: SyncArgs, json_mode: bool) -> Result<()> {
    let metric = MetricId::parse(&args.metric).ok_or_else(|| {
        anyhow!(
            "Unknown metric '{}'. Expected one of: reviewCount, editCount, maintainedProgress",
            args.metric
        )
    })?;

    let config = ConfigLoader::load()?;
    let runtime = SyncRuntime::open(
        config,
        HostSnapshots {
            tree: None,
            cards: args.cards,
        },
    )
    .await?;

    let outcome = runtime.orchestrator.sync_detailed(metric).await;
    output(&SyncOutput::from((metric, &outcome)), json_mode);
    Ok(())
}
