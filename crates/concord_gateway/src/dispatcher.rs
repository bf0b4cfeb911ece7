//! Event fan-out to subscribed handlers.

use crate::{DispatcherConfig, Event};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Something that reacts to push events.
///
/// A handler sees every event of its subscription in order and never two at once.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Process one event.
    async fn handle(&self, event: &Event);
}

/// Broadcast hub between the push transport and its handlers.
///
/// Cloning yields another handle to the same hub.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    sender: broadcast::Sender<Arc<Event>>,
}

impl EventDispatcher {
    /// Create a dispatcher buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Create a dispatcher from configuration.
    pub fn from_config(config: &DispatcherConfig) -> Self {
        Self::new(*config.capacity())
    }

    /// Deliver an event to every live subscriber.
    ///
    /// Returns the number of subscribers that will see it.
    pub fn dispatch(&self, event: Event) -> usize {
        let name = event.name();
        match self.sender.send(Arc::new(event)) {
            Ok(receivers) => {
                trace!(event = name, receivers, "Dispatched event");
                receivers
            }
            Err(_) => {
                trace!(event = name, "Dispatched event with no subscribers");
                0
            }
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Run `handler` on its own task for every event dispatched from now on.
    ///
    /// Must be called within a Tokio runtime.
    pub fn subscribe(&self, handler: Arc<dyn EventHandler>) -> Subscription {
        let mut events = self.sender.subscribe();
        let (cancel, mut cancelled) = watch::channel(false);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.changed() => break,
                    received = events.recv() => match received {
                        Ok(event) => handler.handle(&event).await,
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Event subscriber lagged behind, events skipped");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
            debug!("Event subscriber stopped");
        });

        debug!(subscribers = self.subscriber_count(), "Event subscriber started");
        Subscription {
            cancel,
            task: Some(task),
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::from_config(&DispatcherConfig::default())
    }
}

/// Handle to a running subscriber. Dropping it cancels the subscription.
#[derive(Debug)]
pub struct Subscription {
    cancel: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Stop delivering events. The event being handled, if any, finishes first.
    ///
    /// Calling this more than once has no further effect.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    /// Whether events are still being delivered.
    pub fn is_active(&self) -> bool {
        !*self.cancel.borrow() && self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel and wait for the subscriber task to finish.
    pub async fn unhook(mut self) {
        self.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!(error = %e, "Event subscriber task failed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
