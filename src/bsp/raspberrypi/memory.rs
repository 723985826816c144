// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! BSP Memory Management.
//!
//! The kernel runs from physical addresses with the MMU off. The load address (`0x8_0000`), the
//! boot core's stack below it and the `.bss` bounds are owned by the linker script.

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// The board's physical memory map.
#[rustfmt::skip]
pub(super) mod map {

    pub const GPIO_OFFSET:         usize = 0x0020_0000;
    pub const AUX_OFFSET:          usize = 0x0021_5000;
    pub const MAILBOX_OFFSET:      usize = 0x0000_B880;
    pub const PM_OFFSET:           usize = 0x0010_0000;

    /// Physical devices.
    pub mod mmio {
        use super::*;

        pub const START:           usize =         0x3F00_0000;
        pub const GPIO_START:      usize = START + GPIO_OFFSET;
        pub const MINI_UART_START: usize = START + AUX_OFFSET;
        pub const MAILBOX_START:   usize = START + MAILBOX_OFFSET;
        pub const PM_START:        usize = START + PM_OFFSET;
    }
}
