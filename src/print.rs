// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! Printing.
//!
//! These macros are for the kernel's own log lines. Shell output does not go through them; it is
//! written with the console's byte primitives so the operator protocol stays verbatim.

use crate::console;
use core::fmt;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use console::interface::Write;

    // Console writes are infallible; the `fmt::Result` can only carry a formatting error.
    let _ = console::console().write_fmt(args);
}

/// Print one log line, prefixed with `level` and the uptime in seconds.
#[doc(hidden)]
#[cfg(target_arch = "aarch64")]
pub fn _log(level: char, args: fmt::Arguments) {
    use crate::time::interface::TimeManager;

    let timestamp = crate::time::time_manager().uptime();

    _print(format_args!(
        "[{} {:>3}.{:06}] {}\n",
        level,
        timestamp.as_secs(),
        timestamp.subsec_micros(),
        args
    ));
}

/// Prints without a newline.
///
/// Carbon copy from <https://doc.rust-lang.org/src/std/macros.rs.html>
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::print::_print(format_args!($($arg)*)));
}

/// Prints with a newline.
///
/// Carbon copy from <https://doc.rust-lang.org/src/std/macros.rs.html>
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ({
        $crate::print::_print(format_args!("{}\n", format_args!($($arg)*)));
    })
}

/// Prints an info, with a newline.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => ($crate::print::_log(' ', format_args!($($arg)*)));
}

/// Prints a warning, with a newline.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => ($crate::print::_log('W', format_args!($($arg)*)));
}
