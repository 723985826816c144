// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! Hardware information.
//!
//! On the Raspberry Pi, these facts are owned by the VideoCore firmware and obtained through the
//! mailbox property interface. Generic kernel code only sees the interface below.

use core::fmt;

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// A firmware query that did not produce an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// The firmware answered, but flagged the request as erroneous.
    Rejected,
    /// No well-formed answer could be obtained.
    NoResponse,
}

/// The ARM core's share of the SDRAM, as split off by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmMemory {
    /// Base address.
    pub base: u32,
    /// Size in bytes.
    pub size: u32,
}

/// Hardware information interfaces.
pub mod interface {
    use super::{ArmMemory, QueryError};

    /// Board property queries.
    pub trait HardwareInfo {
        /// The board revision code.
        fn board_revision(&self) -> Result<u32, QueryError>;

        /// Base and size of the memory assigned to the ARM core.
        fn arm_memory(&self) -> Result<ArmMemory, QueryError>;
    }
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "request rejected by firmware"),
            Self::NoResponse => write!(f, "no valid response"),
        }
    }
}
