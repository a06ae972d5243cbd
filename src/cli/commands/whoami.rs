//! Implementation of the `bmsync whoami` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::adapters::ConfigSettings;
use crate::domain::models::{keys, AuthConfig, BeeminderUser};
use crate::domain::ports::{BeeminderClient, SettingsStore};
use crate::cli::display::{action_success, output, CommandOutput};
use crate::infrastructure::beeminder::{BeeminderClientConfig, HttpBeeminderClient};
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

#[derive(Debug, Serialize)]
pub struct WhoamiOutput {
    pub username: String,
    pub timezone: Option<String>,
    pub goals: Vec<String>,
}

impl From<BeeminderUser> for WhoamiOutput {
    fn from(user: BeeminderUser) -> Self {
        Self {
            username: user.username,
            timezone: user.timezone,
            goals: user.goals,
        }
    }
}

impl CommandOutput for WhoamiOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![action_success(&format!("Authenticated as {}", self.username))];
        if let Some(tz) = &self.timezone {
            lines.push(format!("  timezone: {tz}"));
        }
        if !self.goals.is_empty() {
            lines.push(format!("  goals:    {}", self.goals.join(", ")));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(_args: WhoamiArgs, json_mode: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let client = HttpBeeminderClient::new(BeeminderClientConfig::from(&config.beeminder))?;
    let settings = ConfigSettings::new(config);

    let user = settings
        .get_string(keys::AUTH_USER)
        .await
        .context("auth.user is not set")?;
    let token = settings
        .get_string(keys::AUTH_TOKEN)
        .await
        .context("auth.token is not set")?;

    let me = client
        .fetch_user(&AuthConfig { user, token })
        .await
        .context("Beeminder rejected the request")?;

    output(&WhoamiOutput::from(me), json_mode);
    Ok(())
}
