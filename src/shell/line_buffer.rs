// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! Fixed-capacity input line.

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Size of the line storage in bytes, terminator included.
pub const LINE_CAPACITY: usize = 256;

/// One line of operator input.
///
/// Holds at most `LINE_CAPACITY - 1` content bytes so that the terminator always fits. Bytes
/// arriving after that are dropped and the line is marked truncated.
pub struct LineBuffer {
    bytes: [u8; LINE_CAPACITY],
    len: usize,
    truncated: bool,
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl LineBuffer {
    /// Create an instance.
    pub const fn new() -> Self {
        Self {
            bytes: [0; LINE_CAPACITY],
            len: 0,
            truncated: false,
        }
    }

    /// Forget the current line.
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }

    /// Append a content byte, or drop it if the line is full.
    pub fn push(&mut self, byte: u8) {
        if self.len == LINE_CAPACITY - 1 {
            self.truncated = true;
            return;
        }

        self.bytes[self.len] = byte;
        self.len += 1;
    }

    /// Close the line with the null terminator.
    pub fn terminate(&mut self) {
        self.bytes[self.len] = 0;
    }

    /// The content bytes, without terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether input was dropped since the last `clear()`.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_pushed_bytes_in_order() {
        let mut line = LineBuffer::new();
        for &b in b"info" {
            line.push(b);
        }
        line.terminate();

        assert_eq!(line.as_bytes(), b"info");
        assert_eq!(line.len(), 4);
        assert!(!line.is_truncated());
    }

    #[test]
    fn terminator_follows_content() {
        let mut line = LineBuffer::new();
        line.bytes = [0xAA; LINE_CAPACITY];
        line.push(b'x');
        line.terminate();

        assert_eq!(line.bytes[..2], [b'x', 0]);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut line = LineBuffer::new();
        for _ in 0..1000 {
            line.push(b'a');
        }
        line.terminate();

        assert_eq!(line.len(), LINE_CAPACITY - 1);
        assert_eq!(line.bytes[LINE_CAPACITY - 1], 0);
        assert!(line.is_truncated());
    }

    #[test]
    fn exactly_full_line_is_not_truncated() {
        let mut line = LineBuffer::new();
        for _ in 0..LINE_CAPACITY - 1 {
            line.push(b'a');
        }

        assert!(!line.is_truncated());

        line.push(b'a');
        assert!(line.is_truncated());
    }

    #[test]
    fn clear_resets_length_and_truncation() {
        let mut line = LineBuffer::new();
        for _ in 0..LINE_CAPACITY {
            line.push(b'a');
        }
        line.clear();

        assert!(line.is_empty());
        assert!(!line.is_truncated());
        assert_eq!(line.as_bytes(), b"");
    }
}
