//! Beeminder client port.

use async_trait::async_trait;

use crate::domain::errors::RemoteError;
use crate::domain::models::{AuthConfig, BeeminderUser, Datapoint, GoalConfig, NewDatapoint};

/// Port trait for the Beeminder API.
///
/// Implementations must be `Send + Sync`; the orchestrator shares one
/// client across metrics.
#[async_trait]
pub trait BeeminderClient: Send + Sync {
    /// Newest datapoint on the goal.
    ///
    /// Read failures are swallowed and reported as `None`, the same as an
    /// empty goal, so a flaky read never blocks a sync.
    async fn fetch_latest_datapoint(&self, goal: &GoalConfig) -> Option<Datapoint>;

    /// Create a datapoint. Beeminder deduplicates on `requestid`.
    async fn post_datapoint(
        &self,
        goal: &GoalConfig,
        datapoint: &NewDatapoint,
    ) -> Result<Datapoint, RemoteError>;

    /// Account the credentials belong to.
    async fn fetch_user(&self, auth: &AuthConfig) -> Result<BeeminderUser, RemoteError>;
}
