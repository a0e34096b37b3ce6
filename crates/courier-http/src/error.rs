//! Error types for the HTTP module.

use std::fmt;

/// Errors produced by Courier's HTTP operations.
///
/// The variants split into two families: transport failures (the connection
/// could not be established or the transfer did not finish) and decode
/// failures (the body arrived but is not a JSON object). Use
/// [`is_network`](Self::is_network) and [`is_decode`](Self::is_decode) to
/// classify without matching every variant.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// HTTP request failed.
    Request(String),
    /// Invalid URL provided.
    InvalidUrl(String),
    /// Request timed out.
    Timeout,
    /// Connection refused or failed.
    Connection(String),
    /// Response body is not valid JSON.
    Decode(String),
    /// Response body decoded, but the top level is not a JSON object.
    NotAnObject(String),
}

impl NetworkError {
    /// Whether this is a transport failure (connection, DNS, timeout,
    /// interrupted transfer).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Timeout | Self::Connection(_))
    }

    /// Whether this is a decode failure (malformed JSON or a non-object top
    /// level).
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::NotAnObject(_))
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(msg) => write!(f, "HTTP request error: {msg}"),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Connection(msg) => write!(f, "Connection error: {msg}"),
            Self::Decode(msg) => write!(f, "JSON decode error: {msg}"),
            Self::NotAnObject(found) => {
                write!(f, "Expected a JSON object at the top level, got {found}")
            }
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized Result type for Courier HTTP operations.
pub type Result<T> = std::result::Result<T, NetworkError>;
