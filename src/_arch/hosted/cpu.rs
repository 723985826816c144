// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! Processor code for builds on the development host.
//!
//! Drivers and the shell are unit tested on the host. Busy-wait loops there spin on the host CPU
//! with the same structure as on the board.
//!
//! # Orientation
//!
//! Since arch modules are imported into generic modules using the path attribute, the path of this
//! file is:
//!
//! crate::cpu::arch_cpu

use core::hint;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// The closest equivalent of a `nop` the host offers.
#[inline(always)]
pub fn nop() {
    hint::spin_loop();
}

/// Spin for `n` cycles.
#[inline(always)]
pub fn spin_for_cycles(n: usize) {
    for _ in 0..n {
        hint::spin_loop();
    }
}

/// Pause execution forever.
#[inline(always)]
pub fn wait_forever() -> ! {
    loop {
        hint::spin_loop();
    }
}
