//! Incremental UTF-8 decoding for chunked response bodies
//!
//! Network chunks can split a multi-byte character anywhere, so the
//! incomplete tail of each chunk is held back until the next one arrives.
//! Invalid bytes decode to U+FFFD rather than failing the stream.

const REPLACEMENT: char = '\u{FFFD}';
const BOM: char = '\u{FEFF}';

/// Streaming lossy UTF-8 decoder.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Bytes of a character that is not yet complete
    incomplete: Vec<u8>,
    /// Whether the start of the text has been seen (for BOM stripping)
    started: bool,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, returning all text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let joined;
        let mut input: &[u8] = if self.incomplete.is_empty() {
            chunk
        } else {
            self.incomplete.extend_from_slice(chunk);
            joined = std::mem::take(&mut self.incomplete);
            &joined
        };

        let mut out = String::with_capacity(input.len());
        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT);
                            input = &rest[len..];
                        }
                        None => {
                            self.incomplete = rest.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        self.strip_bom(out)
    }

    /// Flush at end of input. A dangling partial character becomes one U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.incomplete.is_empty() {
            return String::new();
        }
        self.incomplete.clear();
        self.strip_bom(REPLACEMENT.to_string())
    }

    fn strip_bom(&mut self, mut text: String) -> String {
        if !self.started && !text.is_empty() {
            self.started = true;
            if text.starts_with(BOM) {
                text.drain(..BOM.len_utf8());
            }
        }
        text
    }
}
