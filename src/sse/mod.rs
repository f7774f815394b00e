//! SSE (Server-Sent Events) stream decoder
//!
//! Decodes a `text/event-stream` body into events.
//! SSE format consists of:
//! - `field: value` lines for the `data`, `event`, `id` and `retry` fields
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `decoder` - Incremental UTF-8 decoding of body chunks
//! - `lines` - Line splitting across chunk boundaries (LineSplitter)
//! - `assembler` - Field accumulation into events (EventAssembler, parse_field)
//! - `event` - Event type definitions (SseEvent, EventId)
//! - `stream` - The pull-based EventStream over a response body

mod assembler;
mod decoder;
mod event;
mod lines;
mod stream;

// Re-export public types
pub use assembler::{parse_field, EventAssembler};
pub use decoder::Utf8Decoder;
pub use event::{coerce_number, is_truthy, EventId, SseEvent, DONE_SENTINEL};
pub use lines::{lines, LineSplitter};
pub use stream::{events, events_with_config, EventStream};
