//! Reqwest-based HTTP client adapter.
//!
//! This module provides a production HTTP client implementation using reqwest,
//! implementing the [`HttpClient`] trait from `crate::traits`.

use async_trait::async_trait;
use futures_util::StreamExt;

use crate::traits::{Headers, HttpClient, HttpError, HttpMethod, StreamRequest, StreamResponse};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use sse_decode::adapters::ReqwestHttpClient;
/// use sse_decode::traits::{HttpClient, StreamRequest};
///
/// let client = ReqwestHttpClient::new();
/// let response = client.open_stream(&StreamRequest::new("https://example.com/sse")).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a new ReqwestHttpClient with a custom reqwest::Client.
    ///
    /// Timeouts, proxies and TLS settings are configured on the client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Convert a body read error to HttpError.
    fn convert_body_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else {
            HttpError::Io(err.to_string())
        }
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Build a reqwest request from a StreamRequest.
    fn build_request(&self, request: &StreamRequest) -> reqwest::RequestBuilder {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        builder
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn open_stream(&self, request: &StreamRequest) -> Result<StreamResponse, HttpError> {
        let response = self
            .build_request(request)
            .send()
            .await
            .map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let headers = Self::convert_headers(response.headers());
        tracing::debug!("{} {} -> {}", request.method, request.url, status);

        let body = response
            .bytes_stream()
            .map(|result| result.map_err(Self::convert_body_error));

        Ok(StreamResponse::with_headers(
            status,
            headers,
            Some(Box::pin(body)),
        ))
    }
}
