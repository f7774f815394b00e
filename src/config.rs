//! Decoder configuration.

/// Configuration for decoding an event stream.
///
/// Use the builder pattern to customize decoding.
///
/// # Example
///
/// ```
/// use sse_decode::config::DecoderConfig;
///
/// let config = DecoderConfig::new().with_allow_cr(false);
/// assert!(!config.allow_cr);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Treat a bare carriage return as a line terminator (default: true)
    pub allow_cr: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self { allow_cr: true }
    }
}

impl DecoderConfig {
    /// Create a new DecoderConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a bare `\r` terminates a line.
    pub fn with_allow_cr(mut self, allow_cr: bool) -> Self {
        self.allow_cr = allow_cr;
        self
    }
}
