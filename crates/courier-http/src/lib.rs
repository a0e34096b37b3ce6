//! HTTP module for Courier.
//!
//! This crate provides a compact client for applications that consume a
//! single JSON-over-HTTP API:
//!
//! - **Transport**: a thin, cheaply-cloneable wrapper over `reqwest`
//! - **API client**: fixed base URL, blocking `fetch`/`post` returning the
//!   decoded JSON object, and fire-and-forget variants that publish their
//!   outcome to a named notification hub
//!
//! # Blocking calls
//!
//! ```ignore
//! use courier_http::ApiClient;
//!
//! let api = ApiClient::builder("https://api.example.com/webroot").build()?;
//!
//! // GET {base}/users/1, decoded as a JSON object
//! let user = api.fetch("/users/1")?;
//! println!("id = {:?}", user.get("id"));
//!
//! // POST with a pre-encoded form body, sent byte-for-byte
//! let session = api.post("/session", "user=ada&pin=1234")?;
//! ```
//!
//! # Fire-and-forget calls
//!
//! Build the client with a subscription tag and a hub; completions (and
//! failures) arrive under that tag:
//!
//! ```ignore
//! use courier_core::NotificationHub;
//! use courier_http::{ApiClient, FetchOutcome};
//!
//! let hub = NotificationHub::<FetchOutcome>::new();
//! let watcher = hub.watch("profile-screen");
//!
//! let api = ApiClient::builder("https://api.example.com/webroot")
//!     .subscription(hub.clone(), "profile-screen")
//!     .build()?;
//!
//! api.fetch_async("/users/1"); // returns immediately
//!
//! if let Some(FetchOutcome::Completed(object)) = watcher.recv() {
//!     println!("loaded: {object:?}");
//! }
//! ```
//!
//! # Errors
//!
//! Both blocking operations report failures explicitly: a transport
//! failure or an undecodable body is an `Err`, never an empty object. See
//! [`NetworkError::is_network`] and [`NetworkError::is_decode`] for the
//! two-way classification.

mod api;
mod client;
mod error;
mod request;
mod response;

pub use api::{ApiClient, ApiClientBuilder, FetchOutcome};
pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use error::{NetworkError, Result};
pub use request::{HttpMethod, RequestBody, WebRequest, WebRequestBuilder};
pub use response::{JsonObject, WebResponse};
