//! Settings store backed by the loaded configuration file.

use async_trait::async_trait;

use crate::domain::models::{keys, Config};
use crate::domain::ports::SettingsStore;

/// Serves host setting ids out of a [`Config`].
pub struct ConfigSettings {
    config: Config,
}

impl ConfigSettings {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

#[async_trait]
impl SettingsStore for ConfigSettings {
    async fn get_string(&self, key: &str) -> Option<String> {
        let goals = &self.config.goals;
        match key {
            keys::AUTH_USER => non_blank(self.config.auth.user.as_ref()),
            keys::AUTH_TOKEN => non_blank(self.config.auth.token.as_ref()),
            keys::GOAL_REVIEWS => non_blank(goals.review_count.as_ref()),
            keys::GOAL_EDITS => non_blank(goals.edit_count.as_ref()),
            keys::GOAL_MAINTAINED => non_blank(goals.maintained_progress.as_ref()),
            _ => None,
        }
    }

    async fn get_bool(&self, key: &str) -> bool {
        match key {
            keys::ENABLE_LOGGING => self.config.enable_logging,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_maps_config_fields_to_setting_ids() {
        let mut config = Config::default();
        config.auth.user = Some("alice".to_string());
        config.auth.token = Some(String::new());
        config.goals.edit_count = Some("edits".to_string());
        config.enable_logging = true;

        let settings = ConfigSettings::new(config);
        assert_eq!(settings.get_string(keys::AUTH_USER).await.as_deref(), Some("alice"));
        assert_eq!(settings.get_string(keys::AUTH_TOKEN).await, None);
        assert_eq!(settings.get_string(keys::GOAL_EDITS).await.as_deref(), Some("edits"));
        assert_eq!(settings.get_string(keys::GOAL_REVIEWS).await, None);
        assert!(settings.get_bool(keys::ENABLE_LOGGING).await);
        assert!(!settings.get_bool("unknown").await);
    }
}
