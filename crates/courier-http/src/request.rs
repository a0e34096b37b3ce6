//! HTTP request types and builder.

use std::time::Duration;

use crate::error::Result;
use super::client::HttpClient;
use super::response::WebResponse;

/// The request methods the API surface uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method.
    Get,
    /// HTTP POST method.
    Post,
}

impl HttpMethod {
    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// The body of an HTTP request.
#[derive(Clone, Debug, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// A caller-pre-encoded `key=value&key=value` string, transmitted
    /// byte-for-byte with `Content-Type: application/x-www-form-urlencoded`.
    FormUrlEncoded(String),
}

/// A built HTTP request ready to be sent.
#[derive(Debug)]
pub struct WebRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The request URL.
    pub url: String,
    /// Request headers.
    pub headers: http::HeaderMap,
    /// Request body.
    pub body: RequestBody,
    /// Request timeout override.
    pub timeout: Option<Duration>,
}

/// Builder for constructing HTTP requests.
pub struct WebRequestBuilder {
    client: HttpClient,
    method: HttpMethod,
    url: String,
    headers: http::HeaderMap,
    body: RequestBody,
    timeout: Option<Duration>,
}

impl WebRequestBuilder {
    pub(crate) fn new(client: HttpClient, method: HttpMethod, url: String) -> Self {
        Self {
            client,
            method,
            url,
            headers: http::HeaderMap::new(),
            body: RequestBody::None,
            timeout: None,
        }
    }

    /// Add a header to the request. Invalid names or values are ignored.
    pub fn header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set a pre-encoded `application/x-www-form-urlencoded` body.
    ///
    /// The string is sent exactly as provided; no re-encoding happens.
    pub fn form_urlencoded(mut self, encoded: impl Into<String>) -> Self {
        self.body = RequestBody::FormUrlEncoded(encoded.into());
        self
    }

    /// Set a timeout for this specific request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the request without sending it.
    pub fn build(self) -> WebRequest {
        WebRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            timeout: self.timeout,
        }
    }

    /// Send the request and wait for the response headers.
    pub async fn send(self) -> Result<WebResponse> {
        let client = self.client.clone();
        let request = self.build();

        let url = url::Url::parse(&request.url)?;

        let mut req_builder = client
            .reqwest_client()
            .request(request.method.to_reqwest(), url);

        for (name, value) in request.headers.iter() {
            req_builder = req_builder.header(name, value);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        match request.body {
            RequestBody::None => {}
            RequestBody::FormUrlEncoded(encoded) => {
                req_builder = req_builder
                    .header(
                        http::header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(encoded);
            }
        }

        let response = req_builder.send().await?;
        Ok(WebResponse::from_reqwest(response))
    }
}
