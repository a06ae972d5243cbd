//! Wires host events to sync invocations.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

use super::ancestor_tags::AncestorTagResolver;
use super::debouncer::Debouncer;
use super::event_bus::{EventBus, Subscription};
use super::sync_orchestrator::SyncOrchestrator;
use crate::domain::models::{HostEvent, MetricId, NodeId};

/// Installed event handlers.
///
/// - `QueueCompleteCard` syncs review count.
/// - `EditorTextEdited` under the counting tag syncs edit count, debounced.
/// - `QueueExit` syncs maintained progress.
///
/// Dropping this unsubscribes.
pub struct SyncTriggers {
    subscription: Subscription,
    edits: Arc<Debouncer<NodeId>>,
}

impl SyncTriggers {
    pub fn install(
        bus: &EventBus,
        orchestrator: Arc<SyncOrchestrator>,
        resolver: Arc<AncestorTagResolver>,
        debounce: Duration,
    ) -> Self {
        let edit_orchestrator = orchestrator.clone();
        let edits = Arc::new(Debouncer::new(debounce, move |node: NodeId| {
            let orchestrator = edit_orchestrator.clone();
            async move {
                debug!(node = %node, "edit burst settled");
                orchestrator.sync(MetricId::EditCount).await;
            }
        }));

        let handler_edits = edits.clone();
        let subscription = bus.on(move |event| {
            let orchestrator = orchestrator.clone();
            let resolver = resolver.clone();
            let edits = handler_edits.clone();
            async move {
                match event {
                    HostEvent::QueueCompleteCard => {
                        orchestrator.sync(MetricId::ReviewCount).await;
                    }
                    HostEvent::EditorTextEdited { node } => {
                        if resolver.should_count(&node).await {
                            edits.call(node);
                        } else {
                            trace!(node = %node, "edit outside counted subtree");
                        }
                    }
                    HostEvent::QueueExit => {
                        orchestrator.sync(MetricId::MaintainedProgress).await;
                    }
                }
            }
        });

        Self {
            subscription,
            edits,
        }
    }

    /// Drain queued events and any pending debounced edit, then stop.
    ///
    /// The bus must already be dropped, otherwise this waits forever.
    pub async fn shutdown(self) {
        let Self {
            subscription,
            edits,
        } = self;
        subscription.finish().await;
        // The handler held the other reference and has exited.
        if let Ok(edits) = Arc::try_unwrap(edits) {
            edits.shutdown().await;
        }
    }
}
