// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2020-2023 Andre Richter <andre.o.richter@gmail.com>

//! Processor code.

#[cfg(target_arch = "aarch64")]
#[path = "_arch/aarch64/cpu.rs"]
mod arch_cpu;

#[cfg(not(target_arch = "aarch64"))]
#[path = "_arch/hosted/cpu.rs"]
mod arch_cpu;

#[cfg(all(target_arch = "aarch64", target_os = "none"))]
mod boot;

//--------------------------------------------------------------------------------------------------
// Architectural Public Reexports
//--------------------------------------------------------------------------------------------------
pub use arch_cpu::{nop, spin_for_cycles, wait_forever};
