//! Implementation of the `bmsync status` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::application::{HostSnapshots, SyncRuntime};
use crate::cli::display::{list_table, output, CommandOutput};
use crate::domain::models::{keys, AuthConfig, MetricId, ProgressKind};
use crate::domain::ports::{BeeminderClient, ProgressSource, SettingsStore};
use crate::infrastructure::config::ConfigLoader;
use crate::services::{resolve_goal, GaugeProgress};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Card export used to compute maintained progress
    #[arg(long)]
    pub cards: Option<PathBuf>,

    /// Also verify the credentials against Beeminder
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Serialize)]
pub struct MetricStatus {
    pub metric: MetricId,
    pub label: &'static str,
    pub goal: Option<String>,
    pub url: Option<String>,
    pub today: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub user: Option<String>,
    pub day: String,
    pub mode: &'static str,
    pub logging_enabled: bool,
    pub authenticated: Option<bool>,
    pub metrics: Vec<MetricStatus>,
}

impl CommandOutput for StatusOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Beeminder user: {}",
            self.user.as_deref().unwrap_or("(not set)")
        )];
        if let Some(ok) = self.authenticated {
            lines.push(format!(
                "Credentials:    {}",
                if ok { "valid" } else { "rejected" }
            ));
        }
        lines.push(format!("Day:            {}", self.day));
        lines.push(format!("Mode:           {}", self.mode));
        lines.push(format!(
            "Trace logging:  {}",
            if self.logging_enabled { "on" } else { "off" }
        ));
        lines.push(String::new());

        let mut table = list_table(&["metric", "goal", "today", "url"]);
        for m in &self.metrics {
            table.add_row(vec![
                m.label.to_string(),
                m.goal.clone().unwrap_or_else(|| "(not configured)".to_string()),
                m.today.map_or_else(|| "-".to_string(), |v| v.to_string()),
                m.url.clone().unwrap_or_default(),
            ]);
        }
        lines.push(table.to_string());
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: StatusArgs, json_mode: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let has_cards = args.cards.is_some();
    let runtime = SyncRuntime::open(
        config,
        HostSnapshots {
            tree: None,
            cards: args.cards,
        },
    )
    .await?;

    let out = collect(&runtime, has_cards, args.check).await?;
    output(&out, json_mode);
    Ok(())
}

async fn collect(runtime: &SyncRuntime, has_cards: bool, check: bool) -> Result<StatusOutput> {
    let settings = runtime.settings.as_ref();
    let day = runtime.days.today();
    let gauge = GaugeProgress::new(runtime.cards.clone(), runtime.days.clock().clone());

    let mut metrics = Vec::with_capacity(MetricId::ALL.len());
    for metric in MetricId::ALL {
        let goal = resolve_goal(settings, metric).await.ok();
        let today = match metric.progress_kind() {
            ProgressKind::Incremental => Some(runtime.today_count(metric).await?),
            ProgressKind::Gauge if has_cards => Some(gauge.compute(metric, day).await?),
            ProgressKind::Gauge => None,
        };
        metrics.push(MetricStatus {
            metric,
            label: metric.label(),
            url: goal.as_ref().map(|g| g.url()),
            goal: goal.map(|g| g.display_name()),
            today,
        });
    }

    let user = settings.get_string(keys::AUTH_USER).await;
    let token = settings.get_string(keys::AUTH_TOKEN).await;
    let authenticated = match (check, user.clone(), token) {
        (true, Some(user), Some(token)) => {
            let auth = AuthConfig { user, token };
            Some(runtime.client.fetch_user(&auth).await.is_ok())
        }
        _ => None,
    };

    Ok(StatusOutput {
        user,
        day: day.api_form(),
        mode: runtime.config.sync.mode.as_str(),
        logging_enabled: settings.get_bool(keys::ENABLE_LOGGING).await,
        authenticated,
        metrics,
    })
}
