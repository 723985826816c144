// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! Device driver.
//!
//! The drivers only depend on an MMIO start address, so they are built for every target. The BSP
//! decides which instances exist and where.

mod bcm;
mod common;

pub use bcm::*;
