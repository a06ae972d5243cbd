//! Implementation of the `bmsync listen` command.
//!
//! Each stdin line is one host event, e.g.
//! `{"event":"EditorTextEdited","node":"abc"}`. The command runs until stdin
//! closes, then flushes any pending edit sync before exiting.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::application::{HostSnapshots, SyncRuntime};
use crate::cli::display::{action_success, output, CommandOutput};
use crate::domain::models::HostEvent;
use crate::infrastructure::config::ConfigLoader;
use crate::services::{EventBus, SyncTriggers};

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Document tree export used to decide which edits count
    #[arg(long)]
    pub tree: Option<PathBuf>,

    /// Card export used by maintainedProgress
    #[arg(long)]
    pub cards: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
pub struct ListenOutput {
    pub events: usize,
    pub invalid_lines: usize,
}

impl CommandOutput for ListenOutput {
    fn to_human(&self) -> String {
        let mut text = action_success(&format!("Processed {} event(s)", self.events));
        if self.invalid_lines > 0 {
            text.push_str(&format!("\n  {} line(s) were not valid events", self.invalid_lines));
        }
        text
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ListenArgs, json_mode: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let runtime = SyncRuntime::open(
        config,
        HostSnapshots {
            tree: args.tree,
            cards: args.cards,
        },
    )
    .await?;

    let bus = EventBus::default();
    let triggers = SyncTriggers::install(
        &bus,
        runtime.orchestrator.clone(),
        Arc::new(runtime.resolver()),
        runtime.debounce_window(),
    );
    info!(handlers = bus.subscriber_count(), "listening for host events on stdin");

    let out = pump(BufReader::new(tokio::io::stdin()), &bus).await?;

    drop(bus);
    triggers.shutdown().await;

    output(&out, json_mode);
    Ok(())
}

/// Publish every parsable line of `reader` until EOF.
async fn pump<R>(reader: R, bus: &EventBus) -> Result<ListenOutput>
where
    R: AsyncBufRead + Unpin,
{
    let mut out = ListenOutput::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<HostEvent>(line) {
            Ok(event) => {
                bus.publish(event).await;
                out.events += 1;
            }
            Err(e) => {
                warn!(error = %e, "ignoring line that is not a host event");
                out.invalid_lines += 1;
            }
        }
    }

    Ok(out)
}
