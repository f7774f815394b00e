//! Event-stream request helper.
//!
//! Opens an HTTP request with event-stream defaults and hands the response
//! body to the decoder. Reconnection and retry are left to the caller.

use std::future::Future;

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::adapters::ReqwestHttpClient;
use crate::config::DecoderConfig;
use crate::sse::{events_with_config, EventStream, Utf8Decoder};
use crate::traits::{ByteStream, HttpClient, HttpError, StreamRequest};

/// Accept header value sent unless the caller provides one.
pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";

/// Content-Type header value sent unless the caller provides one.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Upper bound on the error body text kept for [`HttpError::ServerError`].
pub const MAX_ERROR_BODY_BYTES: usize = 4096;

/// Client for opening Server-Sent Events streams.
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
/// use sse_decode::client::EventSourceClient;
/// use sse_decode::traits::{HttpMethod, StreamRequest};
///
/// let client = EventSourceClient::default();
/// let request = StreamRequest::new("https://api.example.com/v1/chat")
///     .with_method(HttpMethod::Post)
///     .with_body(r#"{"stream":true}"#);
/// let mut events = client.stream(request, None).await?;
/// while let Some(event) = events.next().await {
///     let event = event?;
///     if event.is_done() {
///         break;
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EventSourceClient<C> {
    http: C,
    config: DecoderConfig,
}

impl Default for EventSourceClient<ReqwestHttpClient> {
    fn default() -> Self {
        Self::new(ReqwestHttpClient::new())
    }
}

impl<C: HttpClient> EventSourceClient<C> {
    /// Create a client over an HTTP implementation.
    pub fn new(http: C) -> Self {
        Self {
            http,
            config: DecoderConfig::default(),
        }
    }

    /// Use a custom decoder configuration for opened streams.
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &C {
        &self.http
    }

    /// Send `request` and decode the response as an event stream.
    ///
    /// `Accept: text/event-stream` and `Content-Type: application/json` are
    /// added only when the request does not already carry them. A non-2xx
    /// status fails with [`HttpError::ServerError`] carrying at most
    /// [`MAX_ERROR_BODY_BYTES`] of the response text.
    ///
    /// `cancel` also covers the request itself and the error body read; a
    /// cancel there fails with [`HttpError::Cancelled`].
    pub async fn stream(
        &self,
        mut request: StreamRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<EventStream<ByteStream>, HttpError> {
        request.set_header_fallback("Accept", EVENT_STREAM_CONTENT_TYPE);
        request.set_header_fallback("Content-Type", JSON_CONTENT_TYPE);

        let response = until_cancelled(cancel.as_ref(), self.http.open_stream(&request)).await??;

        if !response.is_success() {
            let status = response.status;
            let message = match response.body {
                Some(body) => until_cancelled(cancel.as_ref(), read_text(body)).await?,
                None => String::new(),
            };
            tracing::warn!("Event stream request to {} failed with {}", request.url, status);
            return Err(HttpError::ServerError { status, message });
        }

        if let Some(content_type) = response.content_type() {
            if !content_type.starts_with(EVENT_STREAM_CONTENT_TYPE) {
                tracing::debug!("Decoding event stream with content type {}", content_type);
            }
        }

        Ok(events_with_config(response, cancel, &self.config))
    }
}

/// Run `future` unless `cancel` fires first.
async fn until_cancelled<F: Future>(
    cancel: Option<&CancellationToken>,
    future: F,
) -> Result<F::Output, HttpError> {
    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!("Event stream request cancelled");
                Err(HttpError::Cancelled)
            }
            output = future => Ok(output),
        },
        None => Ok(future.await),
    }
}

/// Read up to [`MAX_ERROR_BODY_BYTES`] of an error body as text.
///
/// A body that fails midway yields what was read. The body is dropped once
/// the limit is reached.
async fn read_text(mut body: ByteStream) -> String {
    let mut bytes = Vec::new();
    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(chunk) => {
                let room = MAX_ERROR_BODY_BYTES - bytes.len();
                bytes.extend_from_slice(&chunk[..chunk.len().min(room)]);
                if bytes.len() >= MAX_ERROR_BODY_BYTES {
                    tracing::debug!("Error body truncated at {} bytes", MAX_ERROR_BODY_BYTES);
                    break;
                }
            }
            Err(e) => {
                tracing::debug!("Error body read failed: {}", e);
                break;
            }
        }
    }

    let mut decoder = Utf8Decoder::new();
    let mut text = decoder.decode(&bytes);
    // A multi-byte character cut at the limit is dropped, not replaced
    if bytes.len() < MAX_ERROR_BODY_BYTES {
        text.push_str(&decoder.finish());
    }
    text
}
