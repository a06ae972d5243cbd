//! Shared fakes for service tests.

use async_trait::async_trait;
use chrono::{FixedOffset, TimeZone};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::adapters::memory::{InMemorySettings, InMemoryTraceLog};
use crate::domain::errors::RemoteError;
use crate::domain::models::{
    keys, AuthConfig, BeeminderUser, Datapoint, GoalConfig, NewDatapoint,
};
use crate::domain::ports::{BeeminderClient, FixedClock};

/// Beeminder fake that remembers posts and serves the last one as the
/// goal's newest datapoint.
#[derive(Default)]
pub struct RecordingClient {
    pub seeded: Mutex<Option<Datapoint>>,
    pub fetches: Mutex<Vec<GoalConfig>>,
    pub posts: Mutex<Vec<(GoalConfig, NewDatapoint)>>,
    pub post_error: Mutex<Option<RemoteError>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, value: f64, daystamp: &str) {
        *self.seeded.lock().await = Some(Datapoint {
            id: Some("seed".to_string()),
            value,
            daystamp: daystamp.to_string(),
            timestamp: Some(0),
            requestid: None,
            comment: None,
        });
    }

    pub async fn fail_posts_with(&self, err: RemoteError) {
        *self.post_error.lock().await = Some(err);
    }

    pub async fn posted_values(&self) -> Vec<f64> {
        self.posts.lock().await.iter().map(|(_, p)| p.value).collect()
    }

    pub async fn call_count(&self) -> usize {
        self.fetches.lock().await.len() + self.posts.lock().await.len()
    }
}

#[async_trait]
impl BeeminderClient for RecordingClient {
    async fn fetch_latest_datapoint(&self, goal: &GoalConfig) -> Option<Datapoint> {
        self.fetches.lock().await.push(goal.clone());
        if let Some((_, last)) = self.posts.lock().await.last() {
            return Some(Datapoint {
                id: None,
                value: last.value,
                daystamp: last.daystamp.clone(),
                timestamp: None,
                requestid: Some(last.requestid.to_string()),
                comment: Some(last.comment.clone()),
            });
        }
        self.seeded.lock().await.clone()
    }

    async fn post_datapoint(
        &self,
        goal: &GoalConfig,
        datapoint: &NewDatapoint,
    ) -> Result<Datapoint, RemoteError> {
        if let Some(err) = self.post_error.lock().await.clone() {
            return Err(err);
        }
        self.posts.lock().await.push((goal.clone(), datapoint.clone()));
        Ok(Datapoint {
            id: Some(format!("dp{}", self.posts.lock().await.len())),
            value: datapoint.value,
            daystamp: datapoint.daystamp.clone(),
            timestamp: None,
            requestid: Some(datapoint.requestid.to_string()),
            comment: Some(datapoint.comment.clone()),
        })
    }

    async fn fetch_user(&self, auth: &AuthConfig) -> Result<BeeminderUser, RemoteError> {
        Ok(BeeminderUser {
            username: auth.user.clone(),
            timezone: None,
            goals: Vec::new(),
        })
    }
}

/// 2026-03-07 12:00 UTC.
pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 7, 12, 0, 0)
            .unwrap(),
    ))
}

/// Settings with credentials and a slug for every metric.
pub async fn configured_settings() -> Arc<InMemorySettings> {
    let settings = Arc::new(InMemorySettings::new());
    settings.set_string(keys::AUTH_USER, "alice").await;
    settings.set_string(keys::AUTH_TOKEN, "secret").await;
    settings.set_string(keys::GOAL_REVIEWS, "reviews").await;
    settings.set_string(keys::GOAL_EDITS, "edits").await;
    settings.set_string(keys::GOAL_MAINTAINED, "maintained").await;
    settings.set_bool(keys::ENABLE_LOGGING, true).await;
    settings
}

pub fn trace_log() -> Arc<InMemoryTraceLog> {
    Arc::new(InMemoryTraceLog::new())
}
