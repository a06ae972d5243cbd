//! Host setting ids and their registration metadata.

/// Setting ids as registered with the host.
pub mod keys {
    pub const AUTH_USER: &str = "bm-auth-user";
    pub const AUTH_TOKEN: &str = "bm-auth-token";
    pub const GOAL_REVIEWS: &str = "bm-goal-reviews";
    pub const GOAL_EDITS: &str = "bm-goal-edits";
    pub const GOAL_MAINTAINED: &str = "bm-goal-maintained";
    pub const ENABLE_LOGGING: &str = "bm-enable-logging";
}

/// Value type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    String,
    Boolean,
}

/// Declaration a host needs to register a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: SettingKind,
    /// Default for boolean settings; string settings default to unset.
    pub default_enabled: bool,
}

pub const SETTING_DEFINITIONS: &[SettingDefinition] = &[
    SettingDefinition {
        id: keys::AUTH_USER,
        title: "Beeminder user",
        kind: SettingKind::String,
        default_enabled: false,
    },
    SettingDefinition {
        id: keys::AUTH_TOKEN,
        title: "Beeminder auth token",
        kind: SettingKind::String,
        default_enabled: false,
    },
    SettingDefinition {
        id: keys::GOAL_REVIEWS,
        title: "Goal for card reviews",
        kind: SettingKind::String,
        default_enabled: false,
    },
    SettingDefinition {
        id: keys::GOAL_EDITS,
        title: "Goal for edits",
        kind: SettingKind::String,
        default_enabled: false,
    },
    SettingDefinition {
        id: keys::GOAL_MAINTAINED,
        title: "Goal for maintained progress",
        kind: SettingKind::String,
        default_enabled: false,
    },
    SettingDefinition {
        id: keys::ENABLE_LOGGING,
        title: "Enable logging",
        kind: SettingKind::Boolean,
        default_enabled: false,
    },
];

/// Look up a setting declaration by id.
pub fn definition(id: &str) -> Option<&'static SettingDefinition> {
    SETTING_DEFINITIONS.iter().find(|d| d.id == id)
}
