//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - Opening streaming HTTP responses
//! - [`ResponseBody`] - Response-like objects that hand over a byte stream

pub mod body;
pub mod http;

pub use body::ResponseBody;
pub use http::{
    header_value, ByteStream, Headers, HttpClient, HttpError, HttpMethod, StreamRequest,
    StreamResponse,
};
