//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for opening streaming HTTP responses,
//! enabling dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// A boxed stream of body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Look up a header by name, ignoring ASCII case.
pub fn header_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Request method for opening an event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request whose response body is consumed incrementally.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamRequest {
    /// HTTP method (default GET)
    pub method: HttpMethod,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<String>,
}

impl StreamRequest {
    /// Create a GET request for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the request method.
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a header, replacing any existing value with the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a header only if the caller has not set it already.
    pub fn set_header_fallback(&mut self, name: &str, value: &str) {
        if header_value(&self.headers, name).is_none() {
            self.headers.insert(name.to_string(), value.to_string());
        }
    }
}

/// A streaming HTTP response.
pub struct StreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body, `None` when the response has no body at all
    pub body: Option<ByteStream>,
}

impl StreamResponse {
    /// Create a new response.
    pub fn new(status: u16, body: Option<ByteStream>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Option<ByteStream>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `Content-Type` header, if present.
    pub fn content_type(&self) -> Option<&str> {
        header_value(&self.headers, "content-type")
    }
}

impl std::fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// Request was cancelled
    Cancelled,
    /// IO error
    Io(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::Cancelled => write!(f, "Request cancelled"),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for opening streaming HTTP responses.
///
/// Implementations include the production reqwest-based client and a mock
/// client for testing. Implementations return the response for any status;
/// status handling belongs to the caller.
///
/// # Example
///
/// ```ignore
/// use sse_decode::traits::{HttpClient, StreamRequest, HttpError};
///
/// async fn status_of<C: HttpClient>(client: &C) -> Result<u16, HttpError> {
///     let response = client.open_stream(&StreamRequest::new("https://example.com/sse")).await?;
///     Ok(response.status)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send `request` and return the response with its body still unread.
    async fn open_stream(&self, request: &StreamRequest) -> Result<StreamResponse, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_request_defaults() {
        let request = StreamRequest::new("https://example.com/sse");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://example.com/sse");
        assert!(request.headers.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_stream_request_builder() {
        let request = StreamRequest::new("https://example.com/sse")
            .with_method(HttpMethod::Post)
            .with_header("Authorization", "Bearer token")
            .with_body("{}");
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            header_value(&request.headers, "authorization"),
            Some("Bearer token")
        );
        assert_eq!(request.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_with_header_replaces_case_insensitively() {
        let request = StreamRequest::new("u")
            .with_header("accept", "text/plain")
            .with_header("Accept", "text/event-stream");
        assert_eq!(request.headers.len(), 1);
        assert_eq!(header_value(&request.headers, "ACCEPT"), Some("text/event-stream"));
    }

    #[test]
    fn test_set_header_fallback() {
        let mut request = StreamRequest::new("u").with_header("content-type", "text/plain");
        request.set_header_fallback("Content-Type", "application/json");
        request.set_header_fallback("Accept", "text/event-stream");
        assert_eq!(header_value(&request.headers, "content-type"), Some("text/plain"));
        assert_eq!(header_value(&request.headers, "accept"), Some("text/event-stream"));
    }

    #[test]
    fn test_stream_response_is_success() {
        assert!(StreamResponse::new(200, None).is_success());
        assert!(StreamResponse::new(204, None).is_success());
        assert!(!StreamResponse::new(301, None).is_success());
        assert!(!StreamResponse::new(500, None).is_success());
    }

    #[test]
    fn test_stream_response_content_type() {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "text/event-stream".to_string());
        let response = StreamResponse::with_headers(200, headers, None);
        assert_eq!(response.content_type(), Some("text/event-stream"));
    }

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            HttpError::ServerError {
                status: 500,
                message: "Internal Error".to_string()
            }
            .to_string(),
            "Server error (500): Internal Error"
        );
        assert_eq!(HttpError::Cancelled.to_string(), "Request cancelled");
        assert_eq!(
            HttpError::Io("read failed".to_string()).to_string(),
            "IO error: read failed"
        );
        assert_eq!(
            HttpError::InvalidUrl("bad url".to_string()).to_string(),
            "Invalid URL: bad url"
        );
    }
}
