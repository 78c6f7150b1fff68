//! `InputStream` - Byte-at-a-time input with one-byte push-back
//!
//! The scanners need exactly one byte of lookahead: a `/` may or may not
//! start a comment, a `*` inside a block comment may or may not be the start
//! of `*/`. Rather than requiring a seekable source, the stream keeps a
//! single push-back slot that is drained before the underlying reader.

use std::io::{BufRead, BufReader};

use crate::error::Result;

/// `InputStream` reads single bytes from a reader with one-byte push-back
pub struct InputStream<R: BufRead> {
    reader: R,
    pushback: Option<u8>,
    line_number: usize,
}

impl<R: BufRead> InputStream<R> {
    /// Create a new `InputStream`
    ///
    /// # Arguments
    /// * `reader` - The underlying reader
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pushback: None,
            line_number: 1,
        }
    }

    /// Get the current line number (1-based, counts consumed newlines)
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next byte
    ///
    /// Returns the pushed-back byte first if one is pending.
    /// Returns None at end-of-input.
    pub fn next_byte(&mut self) -> Result<Option<u8>> {
        if let Some(b) = self.pushback.take() {
            return Ok(Some(b));
        }

        let buf = self.reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(None);
        }

        let b = buf[0];
        self.reader.consume(1);
        if b == b'\n' {
            self.line_number += 1;
        }
        Ok(Some(b))
    }

    /// Push a byte back onto the stream
    ///
    /// The slot holds at most one byte; the scanners never need more.
    pub fn push_back(&mut self, b: u8) {
        debug_assert!(self.pushback.is_none(), "push-back slot already occupied");
        self.pushback = Some(b);
    }
}

/// Helper to create an `InputStream` from a string (for testing)
impl<'a> InputStream<BufReader<&'a [u8]>> {
    #[must_use]
    pub fn from_string(s: &'a str) -> Self {
        Self::new(BufReader::new(s.as_bytes()))
    }
}
