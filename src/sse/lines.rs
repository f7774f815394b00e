//! Line splitting for chunked text
//!
//! Re-chunks arbitrarily sized text into terminator-stripped lines. A line
//! terminator may arrive split across two chunks (`\r` at the end of one,
//! `\n` at the start of the next), so a trailing `\r` is never treated as a
//! terminator until more input or end of input decides it.

/// Stateful splitter that turns pushed text chunks into complete lines.
///
/// Lines are pulled one at a time with [`LineSplitter::next_line`]; only the
/// unterminated tail of the input is retained between calls.
#[derive(Debug, Default)]
pub struct LineSplitter {
    /// Pending, not yet terminated text
    buffer: String,
    /// Offset of the first unconsumed byte in `buffer`
    start: usize,
    /// Offset up to which `buffer` is known to hold no terminator
    scanned: usize,
    /// Whether a bare `\r` also terminates a line
    allow_cr: bool,
    /// Set once the input has ended
    finished: bool,
}

impl LineSplitter {
    /// Create a splitter. With `allow_cr`, a lone carriage return ends a line too.
    pub fn new(allow_cr: bool) -> Self {
        Self {
            allow_cr,
            ..Self::default()
        }
    }

    /// Append a chunk of decoded text.
    pub fn push(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        if self.start > 0 {
            self.buffer.drain(..self.start);
            self.scanned -= self.start;
            self.start = 0;
        }
        self.buffer.push_str(chunk);
    }

    /// Mark the end of input; the pending fragment is flushed by the next pull.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Whether `finish` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The unterminated fragment currently held back.
    pub fn pending(&self) -> &str {
        &self.buffer[self.start..]
    }

    /// Pull the next complete line, without its terminator.
    ///
    /// Returns `None` when the buffered text holds no complete line. After
    /// [`finish`](Self::finish), a non-empty pending fragment is returned as
    /// the final line.
    pub fn next_line(&mut self) -> Option<String> {
        let from = self.scanned.max(self.start);
        let found = if self.allow_cr {
            self.buffer[from..].find(|c: char| c == '\n' || c == '\r')
        } else {
            self.buffer[from..].find('\n')
        };

        if let Some(offset) = found {
            let at = from + offset;
            let bytes = self.buffer.as_bytes();

            let (end, next) = if bytes[at] == b'\n' {
                // Without allow_cr a CR before the LF is still part of the terminator
                let end = if at > self.start && bytes[at - 1] == b'\r' {
                    at - 1
                } else {
                    at
                };
                (end, at + 1)
            } else if at + 1 == bytes.len() {
                // A trailing CR may be the first half of a CRLF
                (at, at)
            } else if bytes[at + 1] == b'\n' {
                (at, at + 2)
            } else {
                (at, at + 1)
            };

            if next > at {
                let line = self.buffer[self.start..end].to_string();
                self.start = next;
                self.scanned = next;
                return Some(line);
            }
            self.scanned = at;
        } else {
            self.scanned = self.buffer.len();
        }

        let rest = &self.buffer[self.start..];
        if self.finished && !rest.is_empty() {
            let mut line = std::mem::take(&mut self.buffer).split_off(self.start);
            self.start = 0;
            self.scanned = 0;
            if self.allow_cr && line.ends_with('\r') {
                line.pop();
            }
            return Some(line);
        }

        None
    }
}

/// Split a complete text into lines using the same rules as the streaming splitter.
pub fn lines(text: &str, allow_cr: bool) -> impl Iterator<Item = String> {
    let mut splitter = LineSplitter::new(allow_cr);
    splitter.push(text);
    splitter.finish();
    std::iter::from_fn(move || splitter.next_line())
}
