//! SSE event assembly
//!
//! Contains the stateful `EventAssembler` that accumulates field lines and
//! emits an `SseEvent` at each blank line, plus the field/value split.

use crate::sse::event::{coerce_number, is_js_whitespace, is_truthy, EventId, SseEvent};

/// Split a line into field name and value.
///
/// The split happens at the first colon; the value starts after any run of
/// whitespace following it. Returns `None` for lines without a colon and for
/// comment lines (colon in the first position).
pub fn parse_field(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    if colon == 0 {
        return None;
    }

    let value = line[colon + 1..].trim_start_matches(is_js_whitespace);
    Some((&line[..colon], value))
}

/// Fields accumulated for the event currently being assembled.
#[derive(Debug, Default)]
struct PendingEvent {
    data: Option<String>,
    event: Option<String>,
    id: Option<EventId>,
    retry: Option<f64>,
}

impl From<PendingEvent> for SseEvent {
    fn from(pending: PendingEvent) -> Self {
        SseEvent {
            data: pending.data,
            event: pending.event,
            id: pending.id,
            retry: pending.retry,
        }
    }
}

/// Stateful assembler that accumulates lines and emits complete events
///
/// A pending event exists only after a recognized field line has been seen
/// since the last blank line; blank lines with nothing pending emit nothing.
#[derive(Debug, Default)]
pub struct EventAssembler {
    pending: Option<PendingEvent>,
}

impl EventAssembler {
    /// Create a new assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line to the assembler, potentially returning a complete event
    ///
    /// Returns:
    /// - `Some(event)` - A blank line closed out a pending event
    /// - `None` - Line was consumed (or ignored) and no event is complete
    pub fn feed_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.pending.take().map(SseEvent::from);
        }

        let Some((field, value)) = parse_field(line) else {
            tracing::trace!("Ignoring SSE line without field: {:?}", line);
            return None;
        };

        match field {
            "data" => {
                let pending = self.pending.get_or_insert_with(PendingEvent::default);
                let data = pending.data.get_or_insert_with(String::new);
                if !data.is_empty() {
                    data.push('\n');
                }
                data.push_str(value);
            }
            "event" => {
                self.pending.get_or_insert_with(PendingEvent::default).event =
                    Some(value.to_string());
            }
            "id" => {
                self.pending.get_or_insert_with(PendingEvent::default).id =
                    Some(EventId::from_raw(value));
            }
            "retry" => {
                // A non-numeric retry still opens the event, but leaves the field unset
                let n = coerce_number(value);
                self.pending.get_or_insert_with(PendingEvent::default).retry =
                    is_truthy(n).then_some(n);
            }
            _ => {
                tracing::trace!("Ignoring unknown SSE field: {}", field);
            }
        }

        None
    }

    /// Whether field lines have been accumulated since the last boundary.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// End of input: an event without a closing blank line is dropped, not emitted.
    pub fn finish(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(
                "Dropping unterminated SSE event at end of stream (event={:?})",
                pending.event
            );
        }
    }

    /// Reset the assembler state
    pub fn reset(&mut self) {
        self.pending = None;
    }
}
