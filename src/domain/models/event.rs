//! Host events that can trigger a sync.

use serde::{Deserialize, Serialize};

use super::document::NodeId;

/// Events the host emits, as they arrive on the bridge.
///
/// Serialized with an `event` tag so a host can send
/// `{"event":"EditorTextEdited","node":"abc"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum HostEvent {
    /// A card was answered in the review queue.
    QueueCompleteCard,
    /// Text changed inside `node`.
    EditorTextEdited { node: NodeId },
    /// The review queue was closed.
    QueueExit,
}

impl HostEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::QueueCompleteCard => "QueueCompleteCard",
            Self::EditorTextEdited { .. } => "EditorTextEdited",
            Self::QueueExit => "QueueExit",
        }
    }
}
