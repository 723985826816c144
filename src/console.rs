// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! System console.
//!
//! The console is byte oriented. A driver only provides the two busy-waiting primitives,
//! [`write_byte`] and [`read_byte`]. String output with line-feed expansion and hexadecimal
//! rendering are built on top of `write_byte`, so every console speaks the same wire protocol.
//!
//! [`write_byte`]: interface::Write::write_byte
//! [`read_byte`]: interface::Read::read_byte

mod null_console;

use crate::synchronization::{self, NullLock};

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Carriage return.
pub const CR: u8 = b'\r';

/// Line feed, the logical end-of-line byte.
pub const LF: u8 = b'\n';

/// Number of bytes emitted by [`interface::Write::write_hex`].
pub const HEX_LEN: usize = 10;

/// Console interfaces.
pub mod interface {
    use core::fmt;

    /// Console write functions.
    pub trait Write {
        /// Write a single byte, as-is.
        ///
        /// Blocks until the transmitter can accept it.
        fn write_byte(&self, byte: u8);

        /// Write a string.
        ///
        /// Every line feed is preceded by a carriage return on the wire. No other byte is altered.
        fn write_string(&self, s: &str) {
            for &byte in s.as_bytes() {
                if byte == super::LF {
                    self.write_byte(super::CR);
                }

                self.write_byte(byte);
            }
        }

        /// Write `value` as `0x` followed by exactly eight uppercase hex digits.
        fn write_hex(&self, value: u32) {
            for byte in super::hex_digits(value) {
                self.write_byte(byte);
            }
        }

        /// Write a Rust format string.
        fn write_fmt(&self, args: fmt::Arguments) -> fmt::Result {
            struct Adapter<'a, T: ?Sized>(&'a T);

            impl<T: Write + ?Sized> fmt::Write for Adapter<'_, T> {
                fn write_str(&mut self, s: &str) -> fmt::Result {
                    self.0.write_string(s);

                    Ok(())
                }
            }

            fmt::write(&mut Adapter(self), args)
        }

        /// Block until the last buffered byte has been physically put on the TX wire.
        fn flush(&self);
    }

    /// Console read functions.
    pub trait Read {
        /// Read a single byte.
        ///
        /// Blocks until one is available. A received carriage return is handed out as a line feed.
        fn read_byte(&self) -> u8 {
            super::LF
        }

        /// Clear RX buffers, if any.
        fn clear_rx(&self);
    }

    /// Console statistics.
    pub trait Statistics {
        /// Return the number of bytes written.
        fn chars_written(&self) -> usize {
            0
        }

        /// Return the number of bytes read.
        fn chars_read(&self) -> usize {
            0
        }
    }

    /// Trait alias for a full-fledged console.
    pub trait All: Write + Read + Statistics {}
}

//--------------------------------------------------------------------------------------------------
// Global instances
//--------------------------------------------------------------------------------------------------

static CUR_CONSOLE: NullLock<&'static (dyn interface::All + Sync)> =
    NullLock::new(&null_console::NULL_CONSOLE);

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------
use synchronization::interface::Mutex;

/// Render `value` as `0x` followed by eight uppercase hex digits, most significant nibble first.
pub const fn hex_digits(value: u32) -> [u8; HEX_LEN] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = [0; HEX_LEN];
    out[0] = b'0';
    out[1] = b'x';

    let mut i = 0;
    while i < 8 {
        let shift = 28 - 4 * i;
        out[2 + i] = DIGITS[((value >> shift) & 0xF) as usize];
        i += 1;
    }

    out
}

/// Register a new console.
pub fn register_console(new_console: &'static (dyn interface::All + Sync)) {
    CUR_CONSOLE.lock(|con| *con = new_console);
}

/// Return a reference to the currently registered console.
///
/// This is the global console used by all printing macros.
pub fn console() -> &'static dyn interface::All {
    CUR_CONSOLE.lock(|con| *con)
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::interface::{Statistics, Write};
    use super::*;
    use core::cell::RefCell;
    use std::vec::Vec;

    #[derive(Default)]
    struct Recorder {
        wire: RefCell<Vec<u8>>,
    }

    impl Write for Recorder {
        fn write_byte(&self, byte: u8) {
            self.wire.borrow_mut().push(byte);
        }

        fn flush(&self) {}
    }

    #[test]
    fn hex_is_zero_padded_to_eight_digits() {
        assert_eq!(&hex_digits(0), b"0x00000000");
        assert_eq!(&hex_digits(4096), b"0x00001000");
        assert_eq!(&hex_digits(0xFFFF_FFFF), b"0xFFFFFFFF");
    }

    #[test]
    fn hex_uses_uppercase_and_msb_first() {
        assert_eq!(&hex_digits(0x00A0_2082), b"0x00A02082");
        assert_eq!(&hex_digits(0xDEAD_BEEF), b"0xDEADBEEF");
        assert_eq!(&hex_digits(0x1234_5678), b"0x12345678");
    }

    #[test]
    fn write_hex_goes_through_write_byte() {
        let rec = Recorder::default();
        rec.write_hex(0x3B40_0000);

        assert_eq!(rec.wire.borrow().as_slice(), b"0x3B400000");
    }

    #[test]
    fn write_string_expands_every_line_feed() {
        let rec = Recorder::default();
        rec.write_string("a\nb\n\nc");

        assert_eq!(rec.wire.borrow().as_slice(), b"a\r\nb\r\n\r\nc");
    }

    #[test]
    fn write_string_leaves_other_bytes_alone() {
        let rec = Recorder::default();
        rec.write_string("tab\there\rcr");

        assert_eq!(rec.wire.borrow().as_slice(), b"tab\there\rcr");
    }

    #[test]
    fn write_fmt_shares_the_line_feed_expansion() {
        let rec = Recorder::default();
        rec.write_fmt(format_args!("{} drivers\n", 4)).unwrap();

        assert_eq!(rec.wire.borrow().as_slice(), b"4 drivers\r\n");
    }

    #[test]
    fn null_console_is_registered_by_default() {
        console().write_string("dropped\n");

        assert_eq!(console().chars_written(), 0);
    }
}
