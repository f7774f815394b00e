//! Mock implementations for testing.
//!
//! Enables unit testing of event-stream consumers without network access.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
