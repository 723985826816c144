// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

// Rust embedded logo for `make doc`.
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/rust-embedded/wg/master/assets/logo/ewg-logo-blue-white-on-transparent.png"
)]

//! The `kernel` binary.
//!
//! Brings up the Raspberry Pi 3's drivers and hands the mini UART to the operator shell.

#![no_main]
#![no_std]

use libkernel::{bsp, console, driver, info, shell, time};

/// Early init code.
///
/// # Safety
///
/// - Only a single core must be active and running this function.
/// - The init calls in this function must appear in the correct order.
#[no_mangle]
unsafe fn kernel_init() -> ! {
    // Initialize the BSP driver subsystem.
    if let Err(x) = bsp::driver::init() {
        panic!("Error initializing BSP driver subsystem: {}", x);
    }

    // Initialize all device drivers.
    if let Err(x) = driver::driver_manager().init_drivers() {
        panic!("Error initializing drivers: {}", x);
    }
    // println! is usable from here on.

    // Transition from unsafe to safe.
    kernel_main()
}

/// The main function running after the early init.
fn kernel_main() -> ! {
    use console::interface::{Read, Statistics, Write};
    use time::interface::TimeManager;

    info!("{}", libkernel::version());
    info!("Booting on: {}", bsp::board_name());

    info!(
        "Architectural timer resolution: {} ns",
        time::time_manager().resolution().as_nanos()
    );

    info!("Drivers loaded:");
    driver::driver_manager().enumerate(|i, compatible| info!("      {}. {}", i + 1, compatible));

    info!(
        "Chars written so far: {}",
        console::console().chars_written()
    );
    info!("Starting shell");
    console::console().flush();

    // Drop anything that arrived on the line before the operator saw a prompt.
    console::console().clear_rx();

    shell::Shell::new(
        console::console(),
        bsp::driver::hardware_info(),
        bsp::driver::reset_controller(),
    )
    .run()
}
