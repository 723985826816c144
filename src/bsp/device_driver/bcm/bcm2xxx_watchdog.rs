// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! Power management watchdog driver.
//!
//! A full reset is triggered by letting the PM watchdog expire with the full-reset bit set in the
//! reset control register. The firmware then boots from partition 0.

use crate::{
    bsp::device_driver::common::MMIODerefWrapper,
    cpu, driver, power,
    synchronization::{interface::Mutex, NullLock},
};
use tock_registers::{
    interfaces::{Readable, Writeable},
    register_bitfields, register_structs,
    registers::ReadWrite,
};

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

/// Every write to a PM register must carry this in the upper byte to be accepted.
const PM_PASSWORD: u32 = 0x5A00_0000;

/// Boot partition bits of `PM_RSTS`. Clearing them selects partition 0.
const PM_RSTS_PARTITION_CLR: u32 = 0xFFFF_FAAA;

register_bitfields! {
    u32,

    /// Watchdog timer
    PM_WDOG [
        /// Ticks until the watchdog fires. One tick is 16 µs.
        TIME OFFSET(0) NUMBITS(20) []
    ],

    /// Reset control
    PM_RSTC [
        WRCFG OFFSET(4) NUMBITS(2) [
            Clear = 0b00,
            FullReset = 0b10
        ]
    ]
}

register_structs! {
    #[allow(non_snake_case)]
    RegisterBlock {
        (0x00 => _reserved1),
        (0x1C => PM_RSTC: ReadWrite<u32, PM_RSTC::Register>),
        (0x20 => PM_RSTS: ReadWrite<u32>),
        (0x24 => PM_WDOG: ReadWrite<u32, PM_WDOG::Register>),
        (0x28 => @END),
    }
}

/// Abstraction for the associated MMIO registers.
type Registers = MMIODerefWrapper<RegisterBlock>;

struct WatchdogInner {
    registers: Registers,
}

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Representation of the PM watchdog.
pub struct Watchdog {
    inner: NullLock<WatchdogInner>,
}

//--------------------------------------------------------------------------------------------------
// Private Code
//--------------------------------------------------------------------------------------------------

impl WatchdogInner {
    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - The user must ensure to provide a correct MMIO start address.
    pub const unsafe fn new(mmio_start_addr: usize) -> Self {
        Self {
            registers: Registers::new(mmio_start_addr),
        }
    }

    /// Select boot partition 0, load the timer and request a full reset on expiry.
    ///
    /// The tick count is truncated to the 20 bit width of the timer.
    fn arm(&mut self, ticks: u32) {
        let rsts = self.registers.PM_RSTS.get() & !PM_RSTS_PARTITION_CLR;
        self.registers.PM_RSTS.set(PM_PASSWORD | rsts);

        self.registers
            .PM_WDOG
            .set(PM_PASSWORD | PM_WDOG::TIME.val(ticks).value);
        self.registers
            .PM_RSTC
            .set(PM_PASSWORD | PM_RSTC::WRCFG::FullReset.value);
    }
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl Watchdog {
    pub const COMPATIBLE: &'static str = "BCM PM Watchdog";

    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - The user must ensure to provide a correct MMIO start address.
    pub const unsafe fn new(mmio_start_addr: usize) -> Self {
        Self {
            inner: NullLock::new(WatchdogInner::new(mmio_start_addr)),
        }
    }
}

//------------------------------------------------------------------------------
// OS Interface Code
//------------------------------------------------------------------------------

impl driver::interface::DeviceDriver for Watchdog {
    fn compatible(&self) -> &'static str {
        Self::COMPATIBLE
    }
}

impl power::interface::Reset for Watchdog {
    fn reset(&self, ticks: u32) -> ! {
        self.inner.lock(|inner| inner.arm(ticks));

        cpu::wait_forever()
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::device_driver::common::FakeMmio;

    const RSTC_OFFSET: usize = 0x1C;
    const RSTS_OFFSET: usize = 0x20;
    const WDOG_OFFSET: usize = 0x24;

    #[test]
    fn arm_programs_a_full_reset() {
        let mmio = FakeMmio::new();
        mmio.set(RSTS_OFFSET, 0x0000_1555);

        let wdog = unsafe { Watchdog::new(mmio.start_addr()) };
        wdog.inner.lock(|inner| inner.arm(1000));

        assert_eq!(mmio.get(WDOG_OFFSET), 0x5A00_03E8);
        assert_eq!(mmio.get(RSTC_OFFSET), 0x5A00_0020);
        // Partition bits cleared, everything else kept.
        assert_eq!(mmio.get(RSTS_OFFSET), 0x5A00_0000 | (0x0000_1555 & !0xFFFF_FAAA));
    }

    #[test]
    fn tick_count_is_truncated_to_timer_width() {
        let mmio = FakeMmio::new();

        let wdog = unsafe { Watchdog::new(mmio.start_addr()) };
        wdog.inner.lock(|inner| inner.arm(0x0123_4567));

        assert_eq!(mmio.get(WDOG_OFFSET), 0x5A00_0000 | 0x0003_4567);
    }
}
