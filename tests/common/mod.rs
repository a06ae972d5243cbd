//! Shared helpers for integration tests.

#![allow(dead_code)]

use bmsync::domain::models::{Config, GoalConfig};
use bmsync::infrastructure::beeminder::{BeeminderClientConfig, HttpBeeminderClient};
use tempfile::TempDir;

/// Config wired to a mock server, with its database inside `dir`.
pub fn config_for(server_url: &str, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.beeminder.base_url = server_url.to_string();
    config.database.path = dir.path().join("bmsync.db").display().to_string();
    config
}

/// `config_for` plus credentials, every goal slug and trace logging.
pub fn configured_for(server_url: &str, dir: &TempDir) -> Config {
    let mut config = config_for(server_url, dir);
    config.auth.user = Some("alice".to_string());
    config.auth.token = Some("secret".to_string());
    config.goals.review_count = Some("reviews".to_string());
    config.goals.edit_count = Some("edits".to_string());
    config.goals.maintained_progress = Some("maintained".to_string());
    config.enable_logging = true;
    config
}

pub fn client_for(server_url: &str) -> HttpBeeminderClient {
    HttpBeeminderClient::new(BeeminderClientConfig {
        base_url: server_url.to_string(),
        timeout_secs: 5,
        fetch_count: 10,
    })
    .expect("Failed to create client")
}

pub fn reviews_goal() -> GoalConfig {
    GoalConfig::new("alice", "secret", "reviews")
}

pub fn datapoint_json(value: f64, daystamp: &str, timestamp: i64) -> serde_json::Value {
    serde_json::json!({
        "id": format!("dp-{timestamp}"),
        "value": value,
        "daystamp": daystamp,
        "timestamp": timestamp,
        "comment": "via RemNote integration"
    })
}
