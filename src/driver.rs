// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! Driver support.
//!
//! Drivers are initialized strictly in registration order. Bring-up sequences that span several
//! register blocks (e.g. the mini UART needing the GPIO block before and after its own
//! configuration) are expressed through that order plus post-init callbacks.

use crate::synchronization::{interface::Mutex, NullLock};
use core::fmt;

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

const NUM_DRIVERS: usize = 4;

struct DriverManagerInner {
    next_index: usize,
    descriptors: [Option<DeviceDriverDescriptor>; NUM_DRIVERS],
}

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Driver interfaces.
pub mod interface {
    /// Device Driver functions.
    pub trait DeviceDriver {
        /// Return a compatibility string for identifying the driver.
        fn compatible(&self) -> &'static str;

        /// Called by the kernel to bring up the device.
        ///
        /// # Safety
        ///
        /// - During init, drivers might do stuff with system-wide impact.
        unsafe fn init(&self) -> Result<(), &'static str> {
            Ok(())
        }
    }
}

/// Type to be used as an optional callback after a driver's init() has run.
pub type DeviceDriverPostInitCallback = unsafe fn() -> Result<(), &'static str>;

/// A descriptor for device drivers.
#[derive(Copy, Clone)]
pub struct DeviceDriverDescriptor {
    device_driver: &'static (dyn interface::DeviceDriver + Sync),
    post_init_callback: Option<DeviceDriverPostInitCallback>,
}

/// A driver that failed to come up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitError {
    /// Compatibility string of the failing driver.
    pub compatible: &'static str,
    /// Whether the failure happened in the post-init callback.
    pub in_post_init: bool,
    /// The driver's error text.
    pub reason: &'static str,
}

/// Provides device driver management functions.
pub struct DriverManager {
    inner: NullLock<DriverManagerInner>,
}

//--------------------------------------------------------------------------------------------------
// Global instances
//--------------------------------------------------------------------------------------------------

static DRIVER_MANAGER: DriverManager = DriverManager::new();

//--------------------------------------------------------------------------------------------------
// Private Code
//--------------------------------------------------------------------------------------------------

impl DriverManagerInner {
    /// Create an instance.
    pub const fn new() -> Self {
        Self {
            next_index: 0,
            descriptors: [None; NUM_DRIVERS],
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl DeviceDriverDescriptor {
    /// Create an instance.
    pub fn new(
        device_driver: &'static (dyn interface::DeviceDriver + Sync),
        post_init_callback: Option<DeviceDriverPostInitCallback>,
    ) -> Self {
        Self {
            device_driver,
            post_init_callback,
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = if self.in_post_init { "post-init" } else { "init" };

        write!(f, "{}: {} failed: {}", self.compatible, stage, self.reason)
    }
}

/// Return a reference to the global DriverManager.
pub fn driver_manager() -> &'static DriverManager {
    &DRIVER_MANAGER
}

impl DriverManager {
    /// Create an instance.
    pub const fn new() -> Self {
        Self {
            inner: NullLock::new(DriverManagerInner::new()),
        }
    }

    /// Register a device driver with the kernel.
    pub fn register_driver(&self, descriptor: DeviceDriverDescriptor) -> Result<(), &'static str> {
        self.inner.lock(|inner| {
            let slot = inner
                .descriptors
                .get_mut(inner.next_index)
                .ok_or("Driver table full")?;

            *slot = Some(descriptor);
            inner.next_index += 1;

            Ok(())
        })
    }

    /// Helper for iterating over registered drivers.
    fn for_each_descriptor<'a>(&'a self, f: impl FnMut(&'a DeviceDriverDescriptor)) {
        self.inner.lock(|inner| {
            inner
                .descriptors
                .iter()
                .filter_map(|x| x.as_ref())
                .for_each(f)
        })
    }

    /// Fully initialize all drivers, in registration order.
    ///
    /// Stops at the first driver whose init or post-init callback fails.
    ///
    /// # Safety
    ///
    /// - During init, drivers might do stuff with system-wide impact.
    pub unsafe fn init_drivers(&self) -> Result<(), InitError> {
        let mut result = Ok(());

        self.for_each_descriptor(|descriptor| {
            if result.is_err() {
                return;
            }

            let compatible = descriptor.device_driver.compatible();

            // 1. Initialize driver.
            if let Err(reason) = descriptor.device_driver.init() {
                result = Err(InitError {
                    compatible,
                    in_post_init: false,
                    reason,
                });
                return;
            }

            // 2. Call corresponding post init callback.
            if let Some(callback) = &descriptor.post_init_callback {
                if let Err(reason) = callback() {
                    result = Err(InitError {
                        compatible,
                        in_post_init: true,
                        reason,
                    });
                }
            }
        });

        result
    }

    /// Enumerate all registered drivers.
    pub fn enumerate(&self, mut f: impl FnMut(usize, &'static str)) {
        let mut i: usize = 0;
        self.for_each_descriptor(|descriptor| {
            f(i, descriptor.device_driver.compatible());

            i += 1;
        });
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
