pub mod card;
pub mod config;
pub mod datapoint;
pub mod daystamp;
pub mod document;
pub mod event;
pub mod goal;
pub mod metric;
pub mod settings;
pub mod sync;

pub use card::Card;
pub use config::{
    AuthSettings, BeeminderConfig, Config, DatabaseConfig, GoalsConfig, LoggingConfig, SyncConfig,
};
pub use datapoint::{BeeminderUser, Datapoint, NewDatapoint, RequestId};
pub use daystamp::Daystamp;
pub use document::NodeId;
pub use event::HostEvent;
pub use goal::{AuthConfig, GoalConfig, MissingField};
pub use metric::{MetricId, ProgressKind};
pub use settings::{keys, SettingDefinition, SettingKind, SETTING_DEFINITIONS};
pub use sync::{decide, Decision, DecisionMode, SkipReason, SyncFailure, SyncOutcome, SyncState};
