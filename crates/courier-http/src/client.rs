//! HTTP transport client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::Policy;

use super::request::{HttpMethod, WebRequestBuilder};
use crate::error::Result;

/// Configuration for the HTTP transport.
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    /// Connect timeout. `None` leaves the transport default in place.
    pub connect_timeout: Option<Duration>,
    /// Whether to follow redirects.
    pub follow_redirects: bool,
    /// Maximum number of redirects to follow.
    pub max_redirects: usize,
    /// Default user agent.
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            follow_redirects: true,
            max_redirects: 10,
            user_agent: Some(format!("Courier/{} (Rust)", env!("CARGO_PKG_VERSION"))),
        }
    }
}

/// Builder for creating an HTTP client with custom configuration.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Disable redirect following.
    pub fn no_redirects(mut self) -> Self {
        self.config.follow_redirects = false;
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Build the HTTP client.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if self.config.follow_redirects {
            builder = builder.redirect(Policy::limited(self.config.max_redirects));
        } else {
            builder = builder.redirect(Policy::none());
        }

        if let Some(ref ua) = self.config.user_agent {
            builder = builder.user_agent(ua);
        }

        let client = builder.build()?;

        Ok(HttpClient {
            inner: Arc::new(HttpClientInner {
                client,
                config: self.config,
            }),
        })
    }
}

struct HttpClientInner {
    client: reqwest::Client,
    config: HttpClientConfig,
}

/// The HTTP transport used by the API client.
///
/// Cheaply cloneable and thread-safe; clones share the same underlying
/// connection pool and configuration.
///
/// # Example
///
/// ```ignore
/// use courier_http::HttpClient;
///
/// let client = HttpClient::new();
/// let response = client.get("https://api.example.com/status").send().await?;
/// println!("Status: {}", response.status());
/// ```
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default configuration.
    pub fn new() -> Self {
        HttpClientBuilder::new()
            .build()
            .expect("Failed to create HTTP client with default configuration")
    }

    /// Create a builder for configuring a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Get the client's configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl AsRef<str>) -> WebRequestBuilder {
        WebRequestBuilder::new(self.clone(), HttpMethod::Get, url.as_ref().to_string())
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl AsRef<str>) -> WebRequestBuilder {
        WebRequestBuilder::new(self.clone(), HttpMethod::Post, url.as_ref().to_string())
    }

    /// Get a reference to the underlying reqwest client.
    pub(crate) fn reqwest_client(&self) -> &reqwest::Client {
        &self.inner.client
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
