//! Typed signal primitive for Courier.
//!
//! A [`Signal<Args>`] holds a set of connected slots (closures) and invokes
//! every one of them when emitted. It is the fan-out building block under the
//! [`notification`](crate::notification) hub, but can also be used directly
//! when a component wants to expose a completion or change notification.
//!
//! Slots are invoked directly on the emitting thread. Courier has no event
//! loop of its own; callers that need delivery on a specific thread should
//! subscribe through a channel-backed watcher instead (see
//! [`NotificationHub::watch`](crate::notification::NotificationHub::watch)).
//!
//! # Example
//!
//! ```
//! use courier_core::Signal;
//!
//! let finished = Signal::<String>::new();
//!
//! let id = finished.connect(|name| {
//!     println!("finished: {name}");
//! });
//!
//! finished.emit("upload".to_string());
//! finished.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Returned by [`Signal::connect`]; pass it to [`Signal::disconnect`] to
    /// remove the slot. Remains valid until the connection is removed or the
    /// signal is dropped.
    pub struct ConnectionId;
}

struct Connection<Args> {
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal with multiple connected slots.
///
/// Emitting a signal invokes every connected slot with a reference to the
/// emitted arguments. Use `()` for signals without arguments, or a tuple for
/// several.
///
/// `Signal<Args>` is `Send + Sync`; connections and emissions may happen from
/// any thread. Slots always run on the thread that calls [`emit`](Self::emit).
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether emission is temporarily suppressed.
    blocked: AtomicBool,
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a [`ConnectionId`] for later disconnection.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Disconnect a slot by its connection ID.
    ///
    /// Returns `true` if the connection existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect every slot from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Suppress or re-enable emission.
    ///
    /// While blocked, [`emit`](Self::emit) does nothing. Useful during batch
    /// updates to avoid cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots on the current thread.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "courier_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Clone the slot handles out so a slot may connect/disconnect on
        // this same signal without deadlocking on the connections lock.
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.connections.lock();
            tracing::trace!(
                target: "courier_core::signal",
                connection_count = connections.len(),
                "emitting signal"
            );
            connections.iter().map(|(_, c)| c.slot.clone()).collect()
        };

        for slot in slots {
            slot(&args);
        }
    }
}

// Slots are Send + Sync by construction; the connection table is behind a Mutex.
unsafe impl<Args: Send> Send for Signal<Args> {}
unsafe impl<Args: Send> Sync for Signal<Args> {}

/// A connection that disconnects itself when dropped.
///
/// Created via [`Signal::connect_scoped`] on an `Arc`-shared signal. Holding
/// the guard keeps the slot connected; dropping it removes the slot.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use courier_core::Signal;
///
/// let signal = Arc::new(Signal::<i32>::new());
/// let sum = Arc::new(AtomicI32::new(0));
/// {
///     let sum = sum.clone();
///     let _guard = signal.clone().connect_scoped(move |&n| {
///         sum.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);
/// }
/// signal.emit(1); // guard dropped, slot gone
/// assert_eq!(sum.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<Args: Clone + Send + 'static> {
    signal: Arc<Signal<Args>>,
    id: ConnectionId,
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Connect a slot whose lifetime is tied to the returned guard.
    pub fn connect_scoped<F>(self: Arc<Self>, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }
}

impl<Args: Clone + Send + 'static> ConnectionGuard<Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: Clone + Send + 'static> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        let _ = self.signal.disconnect(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn connect_and_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn disconnect_removes_slot() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn blocked_signal_drops_emissions() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        signal.set_blocked(true);
        signal.emit(2);
        signal.set_blocked(false);
        signal.emit(3);

        assert_eq!(*received.lock(), vec![1, 3]);
    }

    #[test]
    fn multiple_connections_all_fire() {
        let signal = Signal::<String>::new();
        let count = Arc::new(Mutex::new(0));

        for _ in 0..3 {
            let count_clone = count.clone();
            signal.connect(move |_| {
                *count_clone.lock() += 1;
            });
        }

        assert_eq!(signal.connection_count(), 3);
        signal.emit("test".to_string());
        assert_eq!(*count.lock(), 3);
    }

    #[test]
    fn guard_disconnects_on_drop() {
        let signal = Arc::new(Signal::<i32>::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let received_clone = received.clone();
            let _guard = signal.clone().connect_scoped(move |&value| {
                received_clone.lock().push(value);
            });
            signal.emit(1);
        }

        signal.emit(2);
        assert_eq!(*received.lock(), vec![1]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn emit_from_multiple_threads() {
        let signal = Arc::new(Signal::<i32>::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        let mut handles = vec![];
        for i in 0..10 {
            let signal_clone = signal.clone();
            handles.push(std::thread::spawn(move || {
                signal_clone.emit(i);
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let values = received.lock();
        assert_eq!(values.len(), 10);
        for i in 0..10 {
            assert!(values.contains(&i), "missing value {}", i);
        }
    }

    #[test]
    fn slot_may_reconnect_during_emit() {
        // Emission must not hold the connection lock while running slots.
        let signal = Arc::new(Signal::<()>::new());
        let inner = signal.clone();
        signal.connect(move |_| {
            inner.connect(|_| {});
        });

        signal.emit(());
        assert_eq!(signal.connection_count(), 2);
    }
}
