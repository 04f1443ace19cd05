//! Fan-out of refresh events to connected browser tabs.
//!
//! Each open `/subscribe` connection holds a [`Subscriber`]. Publishing
//! pushes one [`RefreshEvent`] into every subscriber registered at that
//! moment; a subscriber created afterwards only sees later events.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_stream::{Stream, wrappers::ReceiverStream};

/// Pending events per subscriber. Refresh events carry no payload, so one
/// queued event is as good as several.
const SUBSCRIBER_BUFFER: usize = 8;

/// Signal telling a browser tab to reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshEvent;

#[derive(Debug, Default)]
struct Registry {
    subscribers: Mutex<HashMap<usize, mpsc::Sender<RefreshEvent>>>,
    next_id: AtomicUsize,
}

/// Cloneable handle to the subscriber registry.
#[derive(Debug, Clone, Default)]
pub struct RefreshNotifier {
    registry: Arc<Registry>,
}

impl RefreshNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber. It receives every event published from now
    /// on until it is dropped.
    pub fn subscribe(&self) -> Subscriber {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);
        self.registry.subscribers.lock().insert(id, tx);

        Subscriber {
            id,
            events: ReceiverStream::new(rx),
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Send one refresh event to every current subscriber.
    ///
    /// Never waits. Subscribers whose connection has gone away are removed.
    /// Returns how many subscribers have the event queued.
    pub fn publish(&self) -> usize {
        let mut subscribers = self.registry.subscribers.lock();
        let mut delivered = 0;

        subscribers.retain(|id, tx| match tx.try_send(RefreshEvent) {
            Ok(()) => {
                delivered += 1;
                true
            }
            // An undelivered refresh is already waiting.
            Err(TrySendError::Full(_)) => {
                delivered += 1;
                true
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(id, "pruning closed subscriber");
                false
            }
        });

        tracing::debug!(delivered, "published refresh event");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.subscribers.lock().len()
    }
}

/// One open event stream. Dropping it unregisters it.
#[derive(Debug)]
pub struct Subscriber {
    id: usize,
    events: ReceiverStream<RefreshEvent>,
    registry: Weak<Registry>,
}

impl Subscriber {
    pub fn id(&self) -> usize {
        self.id
    }

    /// Take a queued event without waiting.
    pub fn try_recv(&mut self) -> Option<RefreshEvent> {
        self.events.as_mut().try_recv().ok()
    }
}

impl Stream for Subscriber {
    type Item = RefreshEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.events).poll_next(cx)
    }
}

impl Drop for Subscriber {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.subscribers.lock().remove(&self.id);
            tracing::debug!(id = self.id, "subscriber closed");
        }
    }
}
