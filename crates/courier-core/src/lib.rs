//! Core primitives for Courier.
//!
//! This crate provides the foundation pieces shared by Courier components:
//!
//! - **Signals**: type-safe fan-out to connected closure slots
//! - **Notification hub**: named-topic publish/subscribe for routing
//!   background completions to the right listener
//! - **Runtime**: a shared tokio runtime for blocking and fire-and-forget
//!   network work
//!
//! # Signal Example
//!
//! ```
//! use courier_core::Signal;
//!
//! let changed = Signal::<i32>::new();
//!
//! let id = changed.connect(|value| {
//!     println!("value is now {value}");
//! });
//!
//! changed.emit(42);
//! changed.disconnect(id);
//! ```
//!
//! # Notification Example
//!
//! ```
//! use courier_core::NotificationHub;
//!
//! let hub = NotificationHub::<String>::new();
//!
//! // A caller subscribes under its own tag...
//! let watcher = hub.watch("profile-screen");
//!
//! // ...and some background component publishes there later.
//! hub.publish("profile-screen", "loaded".to_string());
//!
//! assert_eq!(watcher.try_recv(), Some("loaded".to_string()));
//! ```

pub mod logging;
pub mod notification;
pub mod runtime;
pub mod signal;

pub use notification::{NotificationHub, Subscription, Watcher};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
