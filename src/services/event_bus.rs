//! EventBus for host events.
//!
//! Every handler registered with [`EventBus::on`] gets its own bounded
//! queue and task. [`EventBus::publish`] waits for room in each queue, so
//! a slow handler slows the publisher down instead of losing events.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::domain::models::HostEvent;

/// Events a handler may have queued before `publish` waits.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Fan-out of host events to registered handlers.
pub struct EventBus {
    subscribers: Mutex<Vec<mpsc::Sender<HostEvent>>>,
    queue_capacity: usize,
}

impl EventBus {
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            queue_capacity: queue_capacity.max(1),
        }
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<mpsc::Sender<HostEvent>>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver an event to every live handler. Returns how many it reached.
    ///
    /// Waits while any handler's queue is full.
    pub async fn publish(&self, event: HostEvent) -> usize {
        debug!(event = event.name(), "publishing host event");

        let senders: Vec<_> = self.subscribers().clone();
        let mut delivered = 0;
        for tx in senders {
            if tx.send(event.clone()).await.is_ok() {
                delivered += 1;
            }
        }

        if delivered < self.subscribers().len() {
            self.subscribers().retain(|tx| !tx.is_closed());
        }
        delivered
    }

    /// Run `handler` for every event until the returned handle is dropped.
    ///
    /// Events are handled one at a time, in publish order.
    pub fn on<F, Fut>(&self, handler: F) -> Subscription
    where
        F: Fn(HostEvent) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel(self.queue_capacity);
        self.subscribers().push(tx);

        let task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handler(event).await;
            }
            trace!("event bus closed, handler stopping");
        });
        Subscription { task: Some(task) }
    }

    /// Number of handlers still registered.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers().iter().filter(|tx| !tx.is_closed()).count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

/// Registration handle. Dropping it unsubscribes the handler.
pub struct Subscription {
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wait for the handler to drain the remaining events.
    ///
    /// Only returns once every [`EventBus`] the handler listens to is gone.
    pub async fn finish(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::NodeId;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex as AsyncMutex;

    fn recording_handler(bus: &EventBus) -> (Subscription, Arc<AsyncMutex<Vec<HostEvent>>>) {
        let seen = Arc::new(AsyncMutex::new(Vec::new()));
        let sink = seen.clone();
        let subscription = bus.on(move |event| {
            let sink = sink.clone();
            async move { sink.lock().await.push(event) }
        });
        (subscription, seen)
    }

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(HostEvent::QueueExit).await, 0);
    }

    #[tokio::test]
    async fn test_handler_sees_events_in_order_and_drains_on_close() {
        let bus = EventBus::default();
        let (subscription, seen) = recording_handler(&bus);

        assert_eq!(bus.publish(HostEvent::QueueCompleteCard).await, 1);
        bus.publish(HostEvent::EditorTextEdited {
            node: NodeId::new("n1"),
        })
        .await;
        bus.publish(HostEvent::QueueExit).await;
        drop(bus);
        subscription.finish().await;

        let seen = seen.lock().await;
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], HostEvent::QueueCompleteCard);
        assert_eq!(seen[2], HostEvent::QueueExit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_handler_receives_every_event() {
        let bus = EventBus::default();
        let handled = Arc::new(AsyncMutex::new(0usize));
        let counter = handled.clone();
        let subscription = bus.on(move |_| {
            let counter = counter.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                *counter.lock().await += 1;
            }
        });

        for _ in 0..1500 {
            assert_eq!(bus.publish(HostEvent::QueueCompleteCard).await, 1);
        }
        drop(bus);
        subscription.finish().await;

        assert_eq!(*handled.lock().await, 1500);
    }

    #[tokio::test]
    async fn test_full_queue_makes_publish_wait() {
        let bus = EventBus::new(2);
        let (gate_tx, gate_rx) = tokio::sync::watch::channel(false);
        let subscription = bus.on(move |_| {
            let mut gate = gate_rx.clone();
            async move {
                let _ = gate.wait_for(|open| *open).await;
            }
        });

        // One event in the handler, two queued.
        for _ in 0..3 {
            bus.publish(HostEvent::QueueExit).await;
        }
        let blocked =
            tokio::time::timeout(Duration::from_millis(50), bus.publish(HostEvent::QueueExit))
                .await;
        assert!(blocked.is_err(), "publish should wait for queue space");

        gate_tx.send_replace(true);
        assert_eq!(bus.publish(HostEvent::QueueExit).await, 1);
        drop(bus);
        subscription.finish().await;
    }

    #[tokio::test]
    async fn test_dropping_subscription_unsubscribes() {
        let bus = EventBus::default();
        let (subscription, seen) = recording_handler(&bus);
        assert_eq!(bus.subscriber_count(), 1);

        drop(subscription);
        for _ in 0..100 {
            if bus.subscriber_count() == 0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(HostEvent::QueueExit).await, 0);
        assert!(seen.lock().await.is_empty());
    }
}
