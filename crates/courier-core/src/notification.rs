//! Named-topic notification hub.
//!
//! A [`NotificationHub`] routes payloads from publishers to subscribers by
//! topic name. Components that finish background work publish under a
//! caller-chosen tag; only subscribers of exactly that tag observe the
//! payload.
//!
//! The hub is an explicit value, not a process-wide broadcaster: the caller
//! constructs one, hands clones to the components that should publish into
//! it, and keeps a clone for subscribing. Clones share state (same pattern
//! as the cheaply-cloneable HTTP client in `courier-http`).
//!
//! Two subscription styles are available:
//!
//! - [`subscribe`](NotificationHub::subscribe): run a closure on the
//!   publishing thread. Lowest overhead, but the closure must be happy to
//!   run wherever the publisher happens to be.
//! - [`watch`](NotificationHub::watch): receive payloads through a channel
//!   on whatever thread the caller likes. This is the marshaling point for
//!   callers with thread-affine state.
//!
//! # Example
//!
//! ```
//! use courier_core::NotificationHub;
//!
//! let hub = NotificationHub::<String>::new();
//!
//! let watcher = hub.watch("greetings");
//! hub.publish("greetings", "hello".to_string());
//!
//! assert_eq!(watcher.try_recv(), Some("hello".to_string()));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use parking_lot::Mutex;

use crate::signal::{ConnectionId, Signal};

struct HubInner<T> {
    topics: Mutex<HashMap<String, Arc<Signal<T>>>>,
}

/// A publish/subscribe registry keyed by topic name.
///
/// Cheaply cloneable; clones share the same topic table.
pub struct NotificationHub<T: Clone + Send + 'static> {
    inner: Arc<HubInner<T>>,
}

impl<T: Clone + Send + 'static> Clone for NotificationHub<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Default for NotificationHub<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> NotificationHub<T> {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HubInner {
                topics: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Publish a payload to every subscriber of `topic`.
    ///
    /// Subscribers of other topics never observe it. With no subscribers the
    /// payload is dropped (trace-logged); publishing is never an error.
    pub fn publish(&self, topic: &str, payload: T) {
        let signal = self.inner.topics.lock().get(topic).cloned();
        match signal {
            Some(signal) => signal.emit(payload),
            None => {
                tracing::trace!(
                    target: "courier_core::notification",
                    topic,
                    "no subscribers for topic, dropping payload"
                );
            }
        }
    }

    /// Subscribe a closure to `topic`.
    ///
    /// The closure runs on the publishing thread. The subscription lasts
    /// until the returned [`Subscription`] is dropped or
    /// [`cancel`](Subscription::cancel)ed.
    pub fn subscribe<F>(&self, topic: impl Into<String>, slot: F) -> Subscription<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let topic = topic.into();
        // Entry lookup and connect happen under the topics lock, so teardown
        // of a draining topic cannot interleave and orphan this slot.
        let (signal, id) = {
            let mut topics = self.inner.topics.lock();
            let signal = topics
                .entry(topic.clone())
                .or_insert_with(|| Arc::new(Signal::new()))
                .clone();
            let id = signal.connect(slot);
            (signal, id)
        };
        Subscription {
            hub: self.clone(),
            topic,
            signal,
            id: Some(id),
        }
    }

    /// Subscribe to `topic` through a channel.
    ///
    /// Every payload published to the topic is cloned into the watcher's
    /// queue; the caller drains it with [`Watcher::recv`],
    /// [`Watcher::recv_timeout`] or [`Watcher::try_recv`] from any thread.
    /// Dropping the watcher unsubscribes.
    pub fn watch(&self, topic: impl Into<String>) -> Watcher<T> {
        let (tx, rx): (Sender<T>, Receiver<T>) = unbounded();
        let subscription = self.subscribe(topic, move |payload: &T| {
            // Receiver gone means the watcher is mid-drop; nothing to do.
            let _ = tx.send(payload.clone());
        });
        Watcher { subscription, rx }
    }

    /// Number of subscribers currently attached to `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.inner
            .topics
            .lock()
            .get(topic)
            .map(|s| s.connection_count())
            .unwrap_or(0)
    }
}

impl<T: Clone + Send + 'static> std::fmt::Debug for NotificationHub<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub")
            .field("topics", &self.inner.topics.lock().len())
            .finish()
    }
}

/// A live closure subscription; unsubscribes when dropped.
pub struct Subscription<T: Clone + Send + 'static> {
    hub: NotificationHub<T>,
    topic: String,
    signal: Arc<Signal<T>>,
    id: Option<ConnectionId>,
}

impl<T: Clone + Send + 'static> Subscription<T> {
    /// The topic this subscription is attached to.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Unsubscribe now instead of waiting for drop.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            let mut topics = self.hub.inner.topics.lock();
            self.signal.disconnect(id);
            // Drop the table entry once its last subscriber is gone, but only
            // if it is still our signal and not a re-created topic.
            if self.signal.connection_count() == 0
                && topics
                    .get(&self.topic)
                    .is_some_and(|s| Arc::ptr_eq(s, &self.signal))
            {
                topics.remove(&self.topic);
            }
        }
    }
}

impl<T: Clone + Send + 'static> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.release();
    }
}

/// A channel-backed subscription created by [`NotificationHub::watch`].
pub struct Watcher<T: Clone + Send + 'static> {
    subscription: Subscription<T>,
    rx: Receiver<T>,
}

impl<T: Clone + Send + 'static> Watcher<T> {
    /// The watched topic.
    pub fn topic(&self) -> &str {
        self.subscription.topic()
    }

    /// Block until the next payload arrives.
    ///
    /// Returns `None` only if the hub side is gone.
    pub fn recv(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Block for at most `timeout` waiting for the next payload.
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(payload) => Some(payload),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Take the next payload if one is already queued.
    pub fn try_recv(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}
