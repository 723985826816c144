// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2020-2023 Andre Richter <andre.o.richter@gmail.com>

//! Common device driver code.

use core::{marker::PhantomData, ops};

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

pub struct MMIODerefWrapper<T> {
    start_addr: usize,
    phantom: PhantomData<fn() -> T>,
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl<T> MMIODerefWrapper<T> {
    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - `start_addr` must point to a live, suitably aligned `T` for as long as the wrapper is used.
    pub const unsafe fn new(start_addr: usize) -> Self {
        Self {
            start_addr,
            phantom: PhantomData,
        }
    }
}

impl<T> ops::Deref for MMIODerefWrapper<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { &*(self.start_addr as *const _) }
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

/// A block of ordinary memory standing in for a device's MMIO window.
///
/// Drivers access it through the very same volatile register types they use on hardware. Status
/// bits a test wants the "device" to report are preset with [`FakeMmio::set`].
#[cfg(test)]
#[repr(C, align(16))]
pub struct FakeMmio {
    words: core::cell::UnsafeCell<[u32; FakeMmio::WORDS]>,
}

#[cfg(test)]
impl FakeMmio {
    const WORDS: usize = 64;

    pub fn new() -> Self {
        Self {
            words: core::cell::UnsafeCell::new([0; Self::WORDS]),
        }
    }

    /// Start address to hand to a driver.
    pub fn start_addr(&self) -> usize {
        self.words.get() as usize
    }

    /// Read the word at byte offset `offset`.
    pub fn get(&self, offset: usize) -> u32 {
        assert!(offset % 4 == 0 && offset / 4 < Self::WORDS);
        unsafe { core::ptr::read_volatile((self.start_addr() + offset) as *const u32) }
    }

    /// Write the word at byte offset `offset`.
    pub fn set(&self, offset: usize, value: u32) {
        assert!(offset % 4 == 0 && offset / 4 < Self::WORDS);
        unsafe { core::ptr::write_volatile((self.start_addr() + offset) as *mut u32, value) }
    }
}
