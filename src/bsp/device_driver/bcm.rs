// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! BCM driver top level.

mod bcm2xxx_gpio;
mod bcm2xxx_mailbox;
mod bcm2xxx_mini_uart;
mod bcm2xxx_watchdog;

pub use bcm2xxx_gpio::*;
pub use bcm2xxx_mailbox::*;
pub use bcm2xxx_mini_uart::*;
pub use bcm2xxx_watchdog::*;
