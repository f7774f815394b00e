//! sse-decode - incremental `text/event-stream` decoding
//!
//! Turns a response body delivered in arbitrary chunks into a lazy stream of
//! Server-Sent Events. Decoding is pull-driven: each poll of the
//! [`EventStream`] reads at most what it needs to produce the next event.
//!
//! ```ignore
//! use futures::StreamExt;
//! use sse_decode::events;
//!
//! let mut stream = events(response, None);
//! while let Some(event) = stream.next().await {
//!     let event = event?;
//!     if event.is_done() {
//!         break;
//!     }
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod sse;
pub mod traits;

pub use client::EventSourceClient;
pub use config::DecoderConfig;
pub use sse::{events, events_with_config, EventId, EventStream, SseEvent};
pub use tokio_util::sync::CancellationToken;
