//! Goal configuration resolved from settings.

use std::fmt;

use super::metric::MetricId;
use super::settings::keys;

/// Credentials for the Beeminder account.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub user: String,
    pub token: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Everything needed to talk to one goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalConfig {
    pub auth: AuthConfig,
    pub slug: String,
}

impl GoalConfig {
    pub fn new(user: impl Into<String>, token: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            auth: AuthConfig {
                user: user.into(),
                token: token.into(),
            },
            slug: slug.into(),
        }
    }

    /// Public page of the goal.
    pub fn url(&self) -> String {
        format!("https://www.beeminder.com/{}/{}", self.auth.user, self.slug)
    }

    /// `user/slug`, as shown next to a metric.
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.auth.user, self.slug)
    }
}

/// Which piece of goal configuration is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    AuthUser,
    AuthToken,
    GoalSlug(MetricId),
}

impl MissingField {
    pub const fn setting_key(self) -> &'static str {
        match self {
            Self::AuthUser => keys::AUTH_USER,
            Self::AuthToken => keys::AUTH_TOKEN,
            Self::GoalSlug(metric) => metric.goal_setting_key(),
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.setting_key())
    }
}
