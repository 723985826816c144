// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! BSP driver support.

use super::memory::map::mmio;
use crate::{bsp::device_driver, console, driver as generic_driver, hwinfo, power};
use core::sync::atomic::{AtomicBool, Ordering};

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

/// The VPU core clock the mini UART is derived from. Fixed by the firmware's default config.
const CORE_CLOCK_HZ: u32 = 250_000_000;

const CONSOLE_BAUDRATE: u32 = 115_200;

//--------------------------------------------------------------------------------------------------
// Global instances
//--------------------------------------------------------------------------------------------------

static GPIO: device_driver::GPIO = unsafe { device_driver::GPIO::new(mmio::GPIO_START) };

static MINI_UART: device_driver::MiniUart = unsafe {
    device_driver::MiniUart::new(mmio::MINI_UART_START, CORE_CLOCK_HZ, CONSOLE_BAUDRATE)
};

static MAILBOX: device_driver::Mailbox =
    unsafe { device_driver::Mailbox::new(mmio::MAILBOX_START) };

static WATCHDOG: device_driver::Watchdog =
    unsafe { device_driver::Watchdog::new(mmio::PM_START) };

//--------------------------------------------------------------------------------------------------
// Private Code
//--------------------------------------------------------------------------------------------------

/// This must be called only after successful init of the GPIO and mini UART drivers.
///
/// The pins are only handed to the UART once it is fully configured, so no garbage is clocked out
/// while the line settings are in flux.
unsafe fn post_init_mini_uart() -> Result<(), &'static str> {
    GPIO.map_mini_uart();
    console::register_console(&MINI_UART);

    Ok(())
}

fn driver_gpio() -> Result<(), &'static str> {
    let gpio_descriptor = generic_driver::DeviceDriverDescriptor::new(&GPIO, None);
    generic_driver::driver_manager().register_driver(gpio_descriptor)
}

fn driver_mini_uart() -> Result<(), &'static str> {
    let uart_descriptor =
        generic_driver::DeviceDriverDescriptor::new(&MINI_UART, Some(post_init_mini_uart));
    generic_driver::driver_manager().register_driver(uart_descriptor)
}

fn driver_mailbox() -> Result<(), &'static str> {
    let mailbox_descriptor = generic_driver::DeviceDriverDescriptor::new(&MAILBOX, None);
    generic_driver::driver_manager().register_driver(mailbox_descriptor)
}

fn driver_watchdog() -> Result<(), &'static str> {
    let watchdog_descriptor = generic_driver::DeviceDriverDescriptor::new(&WATCHDOG, None);
    generic_driver::driver_manager().register_driver(watchdog_descriptor)
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Initialize the driver subsystem.
///
/// Registration order is init order. GPIO must come before the mini UART.
///
/// # Safety
///
/// See child function calls.
///
/// # Note
///
/// Using atomics here relieves us from needing to use `unsafe` for the static variable.
///
/// On `AArch64`, which is the only implemented architecture at the time of writing this,
/// [`AtomicBool::load`] and [`AtomicBool::store`] are lowered to ordinary load and store
/// instructions. They are therefore safe to use even with MMU + caching deactivated.
///
/// [`AtomicBool::load`]: core::sync::atomic::AtomicBool::load
/// [`AtomicBool::store`]: core::sync::atomic::AtomicBool::store
pub unsafe fn init() -> Result<(), &'static str> {
    static INIT_DONE: AtomicBool = AtomicBool::new(false);
    if INIT_DONE.load(Ordering::Relaxed) {
        return Err("Init already done");
    }

    driver_gpio()?;
    driver_mini_uart()?;
    driver_mailbox()?;
    driver_watchdog()?;

    INIT_DONE.store(true, Ordering::Relaxed);
    Ok(())
}

/// The board's firmware property queries.
pub fn hardware_info() -> &'static dyn hwinfo::interface::HardwareInfo {
    &MAILBOX
}

/// The board's reset controller.
pub fn reset_controller() -> &'static dyn power::interface::Reset {
    &WATCHDOG
}
