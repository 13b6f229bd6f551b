//! Accumulation buffer with tail-bounded prompt search.
//!
//! Prompt patterns are only searched in the last `search_depth` bytes of the
//! buffer rather than the whole accumulated output; login trigger markers
//! are literals and are searched over the full buffer, since the buffer is
//! cleared every time one is answered.

use memchr::memmem;
use regex::bytes::Regex;

/// Strip VT escape sequences from a chunk of terminal output.
pub fn clean(data: &[u8]) -> Vec<u8> {
    strip_ansi_escapes::strip(data)
}

/// Buffer accumulating shell output for trigger and prompt detection.
#[derive(Debug)]
pub struct PatternBuffer {
    buffer: Vec<u8>,

    /// How many bytes from the end to search for prompt patterns.
    search_depth: usize,
}

impl PatternBuffer {
    /// Create a buffer with the given prompt search depth.
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            search_depth,
        }
    }

    /// Append a chunk, stripping ANSI escape codes.
    pub fn extend(&mut self, data: &[u8]) {
        let cleaned = clean(data);
        self.buffer.extend_from_slice(&cleaned);
    }

    /// Whether the buffer contains a literal marker anywhere.
    pub fn contains(&self, needle: &str) -> bool {
        memmem::find(&self.buffer, needle.as_bytes()).is_some()
    }

    /// Whether the buffer tail matches the pattern.
    pub fn tail_matches(&self, pattern: &Regex) -> bool {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        pattern.is_match(&self.buffer[start..])
    }

    /// Discard accumulated content.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// The buffer contents as a string (lossy UTF-8 conversion).
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    /// Current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer holds no data.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}
