//! Trailing-edge debouncer.
//!
//! Every call restarts the quiescence window; when the window elapses with
//! no further calls the callback runs once with the most recent value.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Collapses bursts of calls into one trailing callback invocation.
///
/// Dropping the debouncer still delivers a pending value once its window
/// has elapsed; [`Debouncer::shutdown`] waits for that to happen.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debouncing task on the current runtime.
    pub fn new<F, Fut>(window: Duration, callback: F) -> Self
    where
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            let mut pending: Option<(T, Instant)> = None;

            loop {
                match pending.take() {
                    None => match rx.recv().await {
                        Some(value) => pending = Some((value, Instant::now() + window)),
                        None => break,
                    },
                    Some((value, deadline)) => {
                        tokio::select! {
                            next = rx.recv() => match next {
                                Some(newer) => {
                                    trace!("debounce window restarted");
                                    pending = Some((newer, Instant::now() + window));
                                }
                                None => {
                                    sleep_until(deadline).await;
                                    callback(value).await;
                                    break;
                                }
                            },
                            () = sleep_until(deadline) => callback(value).await,
                        }
                    }
                }
            }
        });

        Self { tx, task }
    }

    /// Record a call. Never blocks.
    pub fn call(&self, value: T) {
        let _ = self.tx.send(value);
    }

    /// Stop accepting calls and wait for any pending value to be delivered.
    pub async fn shutdown(self) {
        let Self { tx, task } = self;
        drop(tx);
        let _ = task.await;
    }
}
