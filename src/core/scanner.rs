//! SIMD-accelerated delimiter scanning using memchr
//!
//! Every delimiter the partial tokenizer cares about is ASCII, so positions
//! found here always fall on UTF-8 character boundaries and can be used to
//! slice the original `&str` directly.

use memchr::memchr;

/// Scanner for XML delimiter detection over in-progress text
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Total input length in bytes
    #[inline]
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Byte at an absolute position
    #[inline]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.as_bytes().get(pos).copied()
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.set_position(self.pos + n);
    }

    /// Get a slice from start to end positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Get everything from `start` to the end of input
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..]
    }

    /// Find next '<' (tag start) using SIMD
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', &self.input.as_bytes()[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next '>' (tag end) using SIMD
    #[inline]
    pub fn find_tag_end(&self) -> Option<usize> {
        memchr(b'>', &self.input.as_bytes()[self.pos..]).map(|i| self.pos + i)
    }

    /// Find the `>` that closes a processing instruction (`?>`)
    ///
    /// The `?` may be the one that opened the instruction, so `<?>` counts
    /// as closed.
    pub fn find_pi_end(&self) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let mut from = self.pos;
        while let Some(i) = memchr(b'>', &bytes[from..]) {
            let at = from + i;
            if at > 0 && bytes[at - 1] == b'?' {
                return Some(at);
            }
            from = at + 1;
        }
        None
    }

    /// Find the end of a tag name: the first whitespace or '>'
    pub fn find_name_end(&self) -> Option<usize> {
        self.input.as_bytes()[self.pos..]
            .iter()
            .position(|&b| b == b'>' || is_whitespace(b))
            .map(|i| self.pos + i)
    }
}

/// XML whitespace: space, tab, carriage return, newline
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
