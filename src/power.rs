// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! Power management.

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Power management interfaces.
pub mod interface {

    /// System reset.
    pub trait Reset {
        /// Reset the whole board after `ticks` watchdog ticks.
        ///
        /// Does not return.
        fn reset(&self, ticks: u32) -> !;
    }
}
