//! Logging integration.
//!
//! Courier instruments itself with the `tracing` crate; it never installs a
//! subscriber. To see logs, install one in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! The constants in [`targets`] name the per-module targets Courier logs
//! under, for use in filter directives such as
//! `courier_http::api=debug,courier_core=warn`.

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "courier_core";
    /// Signal primitive target.
    pub const SIGNAL: &str = "courier_core::signal";
    /// Notification hub target.
    pub const NOTIFICATION: &str = "courier_core::notification";
    /// HTTP transport target.
    pub const CLIENT: &str = "courier_http::client";
    /// API client target.
    pub const API: &str = "courier_http::api";
}
