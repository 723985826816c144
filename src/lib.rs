// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

// Rust embedded logo for `make doc`.
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/rust-embedded/wg/master/assets/logo/ewg-logo-blue-white-on-transparent.png"
)]

//! The `kernel` library.
//!
//! Used by `main.rs` to compose a bare-metal serial shell for the Raspberry Pi 3.
//!
//! # Code organization and architecture
//!
//! The code is divided into different *modules*, each representing a typical **subsystem** of the
//! `kernel`. Top-level module files of subsystems reside directly in the `src` folder. For example,
//! `src/console.rs` contains code that is concerned with the operator console.
//!
//! ## Visibility of processor architecture code
//!
//! Some subsystems depend on low-level code that is specific to the target processor architecture.
//! For each supported processor architecture, there exists a subfolder in `src/_arch`, for example,
//! `src/_arch/aarch64`. The architecture module is loaded by the generic module using the `path`
//! attribute and publicly reexported, e.g. `crate::cpu::nop()`.
//!
//! Code that is built for the development host (unit and integration tests) uses
//! `src/_arch/hosted`, which provides the same functions on top of `core` only.
//!
//! ## BSP code
//!
//! `BSP` stands for Board Support Package. `BSP` code is organized under `src/bsp.rs` and contains
//! target board specific definitions and functions: the board's memory map and the instances of the
//! drivers for the devices this kernel uses (GPIO, mini UART, VideoCore mailbox, watchdog).
//!
//! ## Kernel interfaces
//!
//! `interface` traits sit between `bsp` code and generic `kernel` code:
//!
//! - [`console::interface`] for byte-level serial I/O.
//! - [`hwinfo::interface`] for the firmware property queries.
//! - [`power::interface`] for the watchdog reset.
//!
//! The [`shell`] is written against these traits only, which is also what allows it to be tested
//! on the development host.
//!
//! # Boot flow
//!
//! 1. The kernel's entry point is the function `cpu::boot::arch_boot::_start()`.
//!     - It is implemented in `src/_arch/aarch64/cpu/boot.s`.
//! 2. Once finished with architectural setup, the arch code calls `kernel_init()`.

#![allow(clippy::upper_case_acronyms)]
#![cfg_attr(not(test), no_std)]

#[cfg(target_os = "none")]
mod panic_wait;
mod synchronization;

pub mod bsp;
pub mod console;
pub mod cpu;
pub mod driver;
pub mod hwinfo;
pub mod power;
pub mod print;
pub mod shell;
#[cfg(target_arch = "aarch64")]
pub mod time;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Version string.
pub fn version() -> &'static str {
    concat!(
        env!("CARGO_PKG_NAME"),
        " version ",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(target_os = "none")]
extern "Rust" {
    fn kernel_init() -> !;
}
