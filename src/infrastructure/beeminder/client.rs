//! Beeminder HTTP API client implementation

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::errors::BeeminderApiError;
use crate::domain::errors::RemoteError;
use crate::domain::models::{
    AuthConfig, BeeminderConfig, BeeminderUser, Datapoint, GoalConfig, NewDatapoint,
};
use crate::domain::ports::BeeminderClient;

/// Configuration for the Beeminder HTTP client
#[derive(Debug, Clone)]
pub struct BeeminderClientConfig {
    /// API root, e.g. `https://www.beeminder.com/api/v1`
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// How many recent datapoints to pull when looking for the newest
    pub fetch_count: u32,
}

impl Default for BeeminderClientConfig {
    fn default() -> Self {
        Self::from(&BeeminderConfig::default())
    }
}

impl From<&BeeminderConfig> for BeeminderClientConfig {
    fn from(config: &BeeminderConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            fetch_count: config.fetch_count,
        }
    }
}

/// reqwest-backed Beeminder client.
///
/// No retries: a failed post is reported and the next host event tries
/// again with a fresh snapshot. The request timeout keeps a stalled call
/// from holding a metric's sync lock forever.
pub struct HttpBeeminderClient {
    http_client: ReqwestClient,
    base_url: String,
    fetch_count: u32,
}

impl HttpBeeminderClient {
    pub fn new(config: BeeminderClientConfig) -> Result<Self, BeeminderApiError> {
        info!(
            "Initializing Beeminder client: base_url={}, timeout={}s",
            config.base_url, config.timeout_secs
        );

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(4)
            .user_agent(concat!("bmsync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_count: config.fetch_count,
        })
    }

    fn datapoints_url(&self, goal: &GoalConfig) -> String {
        format!(
            "{}/users/{}/goals/{}/datapoints.json",
            self.base_url, goal.auth.user, goal.slug
        )
    }

    /// All recent datapoints on the goal, in whatever order Beeminder returns.
    #[instrument(skip(self, goal), fields(goal = %goal.display_name()))]
    pub async fn list_datapoints(
        &self,
        goal: &GoalConfig,
    ) -> Result<Vec<Datapoint>, BeeminderApiError> {
        let count = self.fetch_count.to_string();
        let response = self
            .http_client
            .get(self.datapoints_url(goal))
            .query(&[
                ("auth_token", goal.auth.token.as_str()),
                ("sort", "daystamp"),
                ("count", count.as_str()),
            ])
            .send()
            .await?;

        handle_response(response).await
    }

    /// Post one datapoint.
    #[instrument(
        skip(self, goal, datapoint),
        fields(goal = %goal.display_name(), requestid = %datapoint.requestid)
    )]
    pub async fn create_datapoint(
        &self,
        goal: &GoalConfig,
        datapoint: &NewDatapoint,
    ) -> Result<Datapoint, BeeminderApiError> {
        let response = self
            .http_client
            .post(self.datapoints_url(goal))
            .query(&[("auth_token", goal.auth.token.as_str())])
            .json(datapoint)
            .send()
            .await?;

        handle_response(response).await
    }

    #[instrument(skip(self, auth), fields(user = %auth.user))]
    pub async fn get_user(&self, auth: &AuthConfig) -> Result<BeeminderUser, BeeminderApiError> {
        let response = self
            .http_client
            .get(format!("{}/users/{}.json", self.base_url, auth.user))
            .query(&[("auth_token", auth.token.as_str())])
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Check status and decode the body.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, BeeminderApiError> {
    let status = response.status();
    debug!("Response status: {}", status);

    let body = response.text().await?;

    if !status.is_success() {
        warn!("Beeminder API error ({}): {}", status, body);
        return Err(BeeminderApiError::from_status(status, body));
    }

    serde_json::from_str(&body).map_err(|e| BeeminderApiError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl BeeminderClient for HttpBeeminderClient {
    async fn fetch_latest_datapoint(&self, goal: &GoalConfig) -> Option<Datapoint> {
        match self.list_datapoints(goal).await {
            Ok(points) => Datapoint::latest(points),
            Err(err) => {
                warn!(
                    goal = %goal.display_name(),
                    error = %err,
                    "datapoint read failed, treating goal as empty"
                );
                None
            }
        }
    }

    async fn post_datapoint(
        &self,
        goal: &GoalConfig,
        datapoint: &NewDatapoint,
    ) -> Result<Datapoint, RemoteError> {
        self.create_datapoint(goal, datapoint).await.map_err(Into::into)
    }

    async fn fetch_user(&self, auth: &AuthConfig) -> Result<BeeminderUser, RemoteError> {
        self.get_user(auth).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_settings_trims_trailing_slash() {
        let settings = BeeminderConfig {
            base_url: "http://localhost:1234/api/v1/".to_string(),
            ..Default::default()
        };
        let config = BeeminderClientConfig::from(&settings);
        assert_eq!(config.base_url, "http://localhost:1234/api/v1");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_datapoints_url() {
        let client = HttpBeeminderClient::new(BeeminderClientConfig::default()).unwrap();
        let goal = GoalConfig::new("alice", "secret", "reviews");
        assert_eq!(
            client.datapoints_url(&goal),
            "https://www.beeminder.com/api/v1/users/alice/goals/reviews/datapoints.json"
        );
    }
}
