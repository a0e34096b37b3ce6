//! HTTP response types and JSON object decoding.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{NetworkError, Result};

/// The parsed response payload: string keys mapped to arbitrary JSON values.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// An HTTP response from a request.
///
/// Any status code is represented here; whether a non-2xx response is an
/// error is the caller's decision, not the transport's.
pub struct WebResponse {
    inner: reqwest::Response,
}

impl WebResponse {
    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        Self { inner: response }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get the response headers.
    pub fn headers(&self) -> &http::HeaderMap {
        self.inner.headers()
    }

    /// Get a specific header value.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.inner
            .headers()
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    /// Get the Content-Type header value.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the final URL after redirects.
    pub fn url(&self) -> &str {
        self.inner.url().as_str()
    }

    /// Read the full response body.
    ///
    /// Bytes are accumulated chunk-by-chunk into a buffer private to this
    /// request; an interrupted transfer surfaces as a transport error.
    pub async fn bytes(self) -> Result<Bytes> {
        let mut response = self.inner;
        let mut buffer = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
        while let Some(chunk) = response.chunk().await? {
            buffer.extend_from_slice(&chunk);
        }
        Ok(Bytes::from(buffer))
    }

    /// Read the full response body as text.
    pub async fn text(self) -> Result<String> {
        Ok(self.inner.text().await?)
    }

    /// Decode the response body as JSON into a deserializable type.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Decode the response body as a top-level JSON object.
    ///
    /// Fails with a decode error if the body is not valid JSON, and with
    /// [`NetworkError::NotAnObject`] if the top level is an array, scalar or
    /// `null`. `{}` decodes to an empty map, which is a success.
    pub async fn json_object(self) -> Result<JsonObject> {
        let value: serde_json::Value = self.json().await?;
        match value {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(NetworkError::NotAnObject(json_type_name(&other).to_string())),
        }
    }
}

impl std::fmt::Debug for WebResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebResponse")
            .field("status", &self.status())
            .field("url", &self.url())
            .finish()
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
