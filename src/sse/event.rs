//! Decoded SSE event types
//!
//! Contains the `SseEvent` record emitted by the assembler, the `EventId`
//! value type, and the numeric coercion shared by the `id` and `retry` fields.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};

/// Data value producers send to signal that no more events will follow.
///
/// The assembler never inspects it; consumers decide when to stop.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Value of an `id:` field.
///
/// Numeric-looking ids are coerced to numbers, everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(f64),
    Text(String),
}

impl EventId {
    /// Coerce a raw `id` value. A falsy coercion (`0`, NaN) keeps the raw text.
    pub fn from_raw(raw: &str) -> Self {
        let n = coerce_number(raw);
        if is_truthy(n) {
            EventId::Number(n)
        } else {
            EventId::Text(raw.to_string())
        }
    }

    /// Returns the numeric value, if this id was coerced to a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            EventId::Number(n) => Some(*n),
            EventId::Text(_) => None,
        }
    }

    /// Returns the raw text, if this id was kept as a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EventId::Number(_) => None,
            EventId::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Number(n) => write_number(f, *n),
            EventId::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EventId::Number(n) => serialize_number(n, serializer),
            EventId::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<f64> for EventId {
    fn from(n: f64) -> Self {
        EventId::Number(n)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId::Text(s.to_string())
    }
}

/// A finalized event, snapshotted from the pending accumulator at a blank line.
///
/// Every field is optional: an event may legitimately carry none of them when
/// its only field line held a value that was discarded (e.g. `retry: soon`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SseEvent {
    /// Concatenated `data:` lines, joined with `\n`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Event type name from the last `event:` line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Last `id:` value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    /// Reconnection delay hint in milliseconds
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_retry"
    )]
    pub retry: Option<f64>,
}

impl SseEvent {
    /// Whether the data payload is the `[DONE]` sentinel.
    pub fn is_done(&self) -> bool {
        self.data.as_deref() == Some(DONE_SENTINEL)
    }

    /// The `retry` hint as a duration, when it is finite and non-negative.
    pub fn retry_duration(&self) -> Option<Duration> {
        self.retry
            .filter(|ms| *ms >= 0.0)
            .and_then(|ms| Duration::try_from_secs_f64(ms / 1000.0).ok())
    }

    /// Deserialize the data payload as JSON.
    ///
    /// An event without data is treated as an empty payload, which fails to parse.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.data.as_deref().unwrap_or_default())
    }
}

/// Convert a field value to a number with JavaScript unary-plus rules.
///
/// Surrounding whitespace is trimmed and an empty value is zero. Decimal,
/// `0x`/`0o`/`0b` literals and signed `Infinity` parse; anything else is NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim_matches(is_js_whitespace);
    if s.is_empty() {
        return 0.0;
    }

    if let Some(n) = parse_radix_literal(s) {
        return n;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust's float grammar also accepts "inf" and "nan", which are not numbers here.
    let decimal_chars = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal_chars || !s.bytes().any(|b| b.is_ascii_digit()) {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Whitespace as JavaScript's `\s` and string-to-number conversion see it.
///
/// Unicode `White_Space` plus the byte-order mark, minus U+0085 (NEL).
pub(crate) fn is_js_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Zero and NaN are falsy; every other number is truthy.
pub fn is_truthy(n: f64) -> bool {
    n != 0.0 && !n.is_nan()
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }

    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &s[2..];
    let mut value = 0.0_f64;
    for c in digits.chars() {
        let digit = c.to_digit(radix)?;
        value = value * radix as f64 + digit as f64;
    }
    Some(value)
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if is_integral(n) {
        write!(f, "{}", n as i64)
    } else if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{}", n)
    }
}

fn serialize_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if is_integral(*n) {
        serializer.serialize_i64(*n as i64)
    } else {
        serializer.serialize_f64(*n)
    }
}

fn serialize_retry<S: Serializer>(retry: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match retry {
        Some(n) => serialize_number(n, serializer),
        None => serializer.serialize_none(),
    }
}
