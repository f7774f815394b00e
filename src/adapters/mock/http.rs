//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! streaming responses or errors for testing purposes.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{
    ByteStream, Headers, HttpClient, HttpError, HttpMethod, StreamRequest, StreamResponse,
};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response whose body streams these chunks
    Stream { status: u16, chunks: Vec<Bytes> },
    /// Stream these chunks, then fail the body with an error
    StreamThenError {
        status: u16,
        chunks: Vec<Bytes>,
        error: HttpError,
    },
    /// Stream these chunks, then never yield again
    Stalled { status: u16, chunks: Vec<Bytes> },
    /// Return a response without a body
    NoBody { status: u16 },
    /// Fail the request itself
    Error(HttpError),
}

impl MockResponse {
    /// A 200 response streaming `chunks`.
    pub fn ok<I, T>(chunks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        MockResponse::Stream {
            status: 200,
            chunks: chunks.into_iter().map(Into::into).collect(),
        }
    }

    fn into_response(self) -> Result<StreamResponse, HttpError> {
        match self {
            MockResponse::Stream { status, chunks } => {
                let stream = futures::stream::iter(chunks.into_iter().map(Ok));
                Ok(StreamResponse::new(status, Some(Box::pin(stream) as ByteStream)))
            }
            MockResponse::StreamThenError {
                status,
                chunks,
                error,
            } => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(error)));
                let stream = futures::stream::iter(items);
                Ok(StreamResponse::new(status, Some(Box::pin(stream) as ByteStream)))
            }
            MockResponse::Stalled { status, chunks } => {
                let stream = futures::stream::iter(chunks.into_iter().map(Ok))
                    .chain(futures::stream::pending());
                Ok(StreamResponse::new(status, Some(Box::pin(stream) as ByteStream)))
            }
            MockResponse::NoBody { status } => Ok(StreamResponse::new(status, None)),
            MockResponse::Error(err) => Err(err),
        }
    }
}

/// Mock HTTP client for testing.
///
/// This client can be configured to return specific responses for URLs,
/// allowing tests to verify HTTP interactions without network access.
///
/// # Example
///
/// ```ignore
/// use sse_decode::adapters::mock::{MockHttpClient, MockResponse};
/// use sse_decode::traits::{HttpClient, StreamRequest};
///
/// let client = MockHttpClient::new();
/// client.set_response("https://example.com/sse", MockResponse::ok(["data: hi\n\n"]));
///
/// let response = client.open_stream(&StreamRequest::new("https://example.com/sse")).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, request: &StreamRequest) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        });
    }

    /// Get the response for a URL: exact match, then prefix match, then default.
    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn open_stream(&self, request: &StreamRequest) -> Result<StreamResponse, HttpError> {
        self.record_request(request);

        match self.get_response(&request.url) {
            Some(response) => response.into_response(),
            None => Err(HttpError::Other(format!(
                "No mock response for URL: {}",
                request.url
            ))),
        }
    }
}
