//! The Courier API client.
//!
//! [`ApiClient`] talks to one JSON-over-HTTP API: it holds the deployment's
//! base URL, composes request URLs from caller-supplied paths, and decodes
//! every response body as a top-level JSON object.
//!
//! Two calling modes are supported:
//!
//! - **Blocking**: [`fetch`](ApiClient::fetch) and [`post`](ApiClient::post)
//!   block the calling thread for the round trip and return the decoded
//!   object, or an explicit error; never a silently empty object.
//! - **Fire-and-forget**: [`fetch_async`](ApiClient::fetch_async) and
//!   [`post_async`](ApiClient::post_async) return immediately; the transfer
//!   runs on the shared runtime and the outcome is published to the client's
//!   subscription tag on a [`NotificationHub`].
//!
//! # Example
//!
//! ```ignore
//! use courier_core::NotificationHub;
//! use courier_http::{ApiClient, FetchOutcome};
//!
//! // Blocking use: no tag needed.
//! let api = ApiClient::builder("https://api.example.com/webroot").build()?;
//! let user = api.fetch("/users/1")?;
//! println!("name = {:?}", user.get("name"));
//!
//! let session = api.post("/session", "user=ada&pin=1234")?;
//!
//! // Fire-and-forget: completions arrive under the chosen tag.
//! let hub = NotificationHub::<FetchOutcome>::new();
//! let watcher = hub.watch("profile-screen");
//!
//! let api = ApiClient::builder("https://api.example.com/webroot")
//!     .subscription(hub.clone(), "profile-screen")
//!     .build()?;
//! api.fetch_async("/users/1");
//!
//! match watcher.recv() {
//!     Some(FetchOutcome::Completed(object)) => println!("got {object:?}"),
//!     Some(FetchOutcome::Failed(message)) => eprintln!("failed: {message}"),
//!     None => {}
//! }
//! ```

use std::sync::Arc;

use courier_core::{NotificationHub, runtime};
use parking_lot::Mutex;

use super::client::HttpClient;
use super::request::WebRequestBuilder;
use super::response::JsonObject;
use crate::error::Result;

/// The outcome of a fire-and-forget request, published to the client's tag.
///
/// A failed transfer or decode publishes [`Failed`](Self::Failed) on the same
/// topic instead of vanishing, so subscribers can always tell "nothing yet"
/// from "finished badly".
#[derive(Clone, Debug)]
pub enum FetchOutcome {
    /// The request completed and its body decoded to a JSON object.
    Completed(JsonObject),
    /// The transfer or the decode failed.
    Failed(String),
}

impl FetchOutcome {
    /// Whether the request completed with a decoded object.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Whether the request failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The decoded object, if the request completed.
    pub fn object(&self) -> Option<&JsonObject> {
        match self {
            Self::Completed(object) => Some(object),
            Self::Failed(_) => None,
        }
    }

    /// Consume the outcome, yielding the decoded object if present.
    pub fn into_object(self) -> Option<JsonObject> {
        match self {
            Self::Completed(object) => Some(object),
            Self::Failed(_) => None,
        }
    }
}

#[derive(Clone)]
struct SubscriptionTarget {
    hub: NotificationHub<FetchOutcome>,
    tag: String,
}

/// Builder for creating an [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: String,
    http_client: Option<HttpClient>,
    subscription: Option<SubscriptionTarget>,
}

impl ApiClientBuilder {
    /// Create a new builder with the deployment's base URL.
    ///
    /// All request paths are appended to this URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: None,
            subscription: None,
        }
    }

    /// Use an existing HTTP transport instead of creating a new one.
    ///
    /// Several `ApiClient`s can share one transport (and its connection
    /// pool) this way.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Enable fire-and-forget calls, publishing completions to `tag` on `hub`.
    ///
    /// Without a subscription the built client is blocking-only.
    pub fn subscription(
        mut self,
        hub: NotificationHub<FetchOutcome>,
        tag: impl Into<String>,
    ) -> Self {
        self.subscription = Some(SubscriptionTarget {
            hub,
            tag: tag.into(),
        });
        self
    }

    /// Build the API client.
    ///
    /// Fails if the base URL does not parse.
    pub fn build(self) -> Result<ApiClient> {
        // Normalize base URL (remove trailing slash)
        let base_url = self.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)?;

        let client = self.http_client.unwrap_or_default();

        Ok(ApiClient {
            client,
            base_url,
            subscription: self.subscription,
            parsed: Arc::new(Mutex::new(None)),
        })
    }
}

/// A client for one fixed-base-URL JSON API.
///
/// An `ApiClient` serves one logical caller and issues one request at a
/// time; every issued request owns its context (URL, body, receive buffer)
/// by value. The only state shared across requests is the last successfully
/// parsed response, available through [`parsed_data`](Self::parsed_data).
pub struct ApiClient {
    client: HttpClient,
    base_url: String,
    subscription: Option<SubscriptionTarget>,
    parsed: Arc<Mutex<Option<JsonObject>>>,
}

impl ApiClient {
    /// Create a new builder with the deployment's base URL.
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The subscription tag, if this client can make fire-and-forget calls.
    pub fn tag(&self) -> Option<&str> {
        self.subscription.as_ref().map(|s| s.tag.as_str())
    }

    /// The last successfully parsed response, if any.
    pub fn parsed_data(&self) -> Option<JsonObject> {
        self.parsed.lock().clone()
    }

    /// Perform a blocking GET of `path` and decode the body as a JSON object.
    ///
    /// Blocks the calling thread for the full round trip; must not be called
    /// from an async context (see [`runtime::block_on`]).
    pub fn fetch(&self, path: &str) -> Result<JsonObject> {
        let request = self.client.get(self.join_url(path));
        self.execute_blocking(request)
    }

    /// Perform a blocking POST of `path` with a pre-encoded form body.
    ///
    /// `encoded_body` is a `key=value&key=value` string sent byte-for-byte
    /// with `Content-Type: application/x-www-form-urlencoded`. Same contract
    /// as [`fetch`](Self::fetch) otherwise.
    pub fn post(&self, path: &str, encoded_body: impl Into<String>) -> Result<JsonObject> {
        let request = self
            .client
            .post(self.join_url(path))
            .form_urlencoded(encoded_body);
        self.execute_blocking(request)
    }

    /// Start a GET of `path` without blocking.
    ///
    /// The outcome is published to this client's subscription tag. On a
    /// client built without a subscription this logs a warning and issues no
    /// request, since there is nowhere to deliver the result.
    pub fn fetch_async(&self, path: &str) {
        let Some(target) = self.subscription.clone() else {
            tracing::warn!(
                target: "courier_http::api",
                path,
                "fetch_async on a client with no subscription tag, dropping request"
            );
            return;
        };
        let request = self.client.get(self.join_url(path));
        self.spawn_and_publish(request, target);
    }

    /// Start a POST of `path` with a pre-encoded form body, without blocking.
    ///
    /// Delivery follows [`fetch_async`](Self::fetch_async).
    pub fn post_async(&self, path: &str, encoded_body: impl Into<String>) {
        let Some(target) = self.subscription.clone() else {
            tracing::warn!(
                target: "courier_http::api",
                path,
                "post_async on a client with no subscription tag, dropping request"
            );
            return;
        };
        let request = self
            .client
            .post(self.join_url(path))
            .form_urlencoded(encoded_body);
        self.spawn_and_publish(request, target);
    }

    fn execute_blocking(&self, request: WebRequestBuilder) -> Result<JsonObject> {
        let object =
            runtime::block_on(async move { request.send().await?.json_object().await })?;
        *self.parsed.lock() = Some(object.clone());
        Ok(object)
    }

    fn spawn_and_publish(&self, request: WebRequestBuilder, target: SubscriptionTarget) {
        let parsed = self.parsed.clone();
        runtime::spawn(async move {
            let result: Result<JsonObject> =
                async move { request.send().await?.json_object().await }.await;

            let outcome = match result {
                Ok(object) => {
                    *parsed.lock() = Some(object.clone());
                    FetchOutcome::Completed(object)
                }
                Err(err) => {
                    tracing::debug!(
                        target: "courier_http::api",
                        tag = %target.tag,
                        error = %err,
                        "background request failed"
                    );
                    FetchOutcome::Failed(err.to_string())
                }
            };

            target.hub.publish(&target.tag, outcome);
        });
    }

    fn join_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("tag", &self.tag())
            .finish()
    }
}
