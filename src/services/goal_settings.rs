//! Resolves per-metric goal configuration from host settings.

use crate::domain::models::{keys, GoalConfig, MetricId, MissingField};
use crate::domain::ports::SettingsStore;

/// Read user, token and the metric's goal slug.
///
/// Settings are read fresh on every call. The first absent field is
/// reported, in the order user, token, slug.
pub async fn resolve_goal(
    settings: &dyn SettingsStore,
    metric: MetricId,
) -> Result<GoalConfig, MissingField> {
    let user = settings
        .get_string(keys::AUTH_USER)
        .await
        .ok_or(MissingField::AuthUser)?;
    let token = settings
        .get_string(keys::AUTH_TOKEN)
        .await
        .ok_or(MissingField::AuthToken)?;
    let slug = settings
        .get_string(metric.goal_setting_key())
        .await
        .ok_or(MissingField::GoalSlug(metric))?;

    Ok(GoalConfig::new(user, token, slug))
}
