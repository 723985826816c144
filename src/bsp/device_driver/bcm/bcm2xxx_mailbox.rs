// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! VideoCore mailbox driver.
//!
//! Only the property channel is used, and only for single-tag requests.
//!
//! # Resources
//!
//! - <https://github.com/raspberrypi/firmware/wiki/Mailboxes>
//! - <https://github.com/raspberrypi/firmware/wiki/Mailbox-property-interface>

use crate::{
    bsp::device_driver::common::MMIODerefWrapper,
    cpu, driver, hwinfo,
    synchronization::{interface::Mutex, NullLock},
};
use core::{
    ptr,
    sync::atomic::{compiler_fence, Ordering},
};
use tock_registers::{
    interfaces::{Readable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, WriteOnly},
};

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

register_bitfields! {
    u32,

    /// Mailbox 0 status
    STATUS [
        /// Set while the ARM-to-VideoCore mailbox cannot take another message.
        FULL  OFFSET(31) NUMBITS(1) [],

        /// Set while the VideoCore-to-ARM mailbox holds no message.
        EMPTY OFFSET(30) NUMBITS(1) []
    ]
}

register_structs! {
    #[allow(non_snake_case)]
    RegisterBlock {
        (0x00 => READ: ReadOnly<u32>),
        (0x04 => _reserved1),
        (0x18 => STATUS: ReadOnly<u32, STATUS::Register>),
        (0x1C => _reserved2),
        (0x20 => WRITE: WriteOnly<u32>),
        (0x24 => @END),
    }
}

/// Abstraction for the associated MMIO registers.
type Registers = MMIODerefWrapper<RegisterBlock>;

/// Number of 32 bit words in the message buffer.
const BUFFER_WORDS: usize = 36;

mod channel {
    /// Property tags, ARM to VideoCore.
    pub const PROP: u32 = 8;
}

mod tag {
    pub const GET_BOARD_REVISION: u32 = 0x0001_0002;
    pub const GET_ARM_MEMORY: u32 = 0x0001_0005;
    pub const LAST: u32 = 0;
}

mod code {
    pub const REQUEST: u32 = 0;
    pub const RESPONSE_SUCCESS: u32 = 0x8000_0000;
    /// Error parsing request buffer (partial response).
    pub const RESPONSE_ERROR: u32 = 0x8000_0001;
}

/// The message buffer. The VideoCore only sees the upper 28 bits of its address, so it must be
/// 16 byte aligned.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
struct Message([u32; BUFFER_WORDS]);

struct MailboxInner {
    registers: Registers,
    message: Message,
}

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Reasons a mailbox call did not yield a usable response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxError {
    /// The firmware flagged the request buffer as erroneous.
    ResponseError,
    /// The response code is neither success nor error.
    UnknownError,
    /// The buffer lies outside the 32 bit address space the mailbox can express.
    BufferAddress,
}

/// Representation of the VideoCore mailbox.
pub struct Mailbox {
    inner: NullLock<MailboxInner>,
}

//--------------------------------------------------------------------------------------------------
// Private Code
//--------------------------------------------------------------------------------------------------

impl Message {
    const fn new() -> Self {
        Self([0; BUFFER_WORDS])
    }

    /// Lay out a request for a single tag with an 8 byte value buffer.
    ///
    /// The answer, if any, is placed in words 5 and 6.
    fn prepare(&mut self, tag: u32) {
        let buffer = &mut self.0;

        buffer[0] = 7 * 4; // Size of the message in bytes.
        buffer[1] = code::REQUEST;
        buffer[2] = tag;
        buffer[3] = 8; // Value buffer size in bytes.
        buffer[4] = 0; // Request/response indicator.
        buffer[5] = 0;
        buffer[6] = 0;
        buffer[7] = tag::LAST;
    }

    /// Interpret the response code written back by the firmware.
    fn status(&self) -> Result<(), MailboxError> {
        match self.0[1] {
            code::RESPONSE_SUCCESS => Ok(()),
            code::RESPONSE_ERROR => Err(MailboxError::ResponseError),
            _ => Err(MailboxError::UnknownError),
        }
    }
}

impl From<MailboxError> for hwinfo::QueryError {
    fn from(e: MailboxError) -> Self {
        match e {
            MailboxError::ResponseError => Self::Rejected,
            MailboxError::UnknownError | MailboxError::BufferAddress => Self::NoResponse,
        }
    }
}

impl MailboxInner {
    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - The user must ensure to provide a correct MMIO start address.
    pub const unsafe fn new(mmio_start_addr: usize) -> Self {
        Self {
            registers: Registers::new(mmio_start_addr),
            message: Message::new(),
        }
    }

    /// Send a single-tag property request and return words 5 and 6 of the response.
    fn property(&mut self, tag: u32) -> Result<[u32; 2], MailboxError> {
        self.message.prepare(tag);

        let response = self.call(channel::PROP)?;
        response.status()?;

        Ok([response.0[5], response.0[6]])
    }

    /// Hand the message buffer to the VideoCore and wait for its answer on `channel`.
    ///
    /// Returns a copy of the buffer as written back by the firmware.
    fn call(&mut self, channel: u32) -> Result<Message, MailboxError> {
        let addr = u32::try_from(self.message.0.as_ptr() as usize)
            .map_err(|_| MailboxError::BufferAddress)?;

        // Wait until we can write to the mailbox.
        while self.registers.STATUS.is_set(STATUS::FULL) {
            cpu::nop();
        }

        // All stores to the buffer must be done before the VideoCore is signaled, which is a
        // store as well.
        compiler_fence(Ordering::Release);

        self.registers.WRITE.set((addr & !0xF) | (channel & 0xF));

        loop {
            while self.registers.STATUS.is_set(STATUS::EMPTY) {
                cpu::nop();
            }

            let resp = self.registers.READ.get();

            // Is it a response to our message?
            if (resp & 0xF) == channel && (resp & !0xF) == addr {
                compiler_fence(Ordering::Acquire);

                // The firmware wrote the buffer behind the compiler's back.
                return Ok(unsafe { ptr::read_volatile(&self.message) });
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl Mailbox {
    pub const COMPATIBLE: &'static str = "BCM VideoCore Mailbox";

    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - The user must ensure to provide a correct MMIO start address.
    pub const unsafe fn new(mmio_start_addr: usize) -> Self {
        Self {
            inner: NullLock::new(MailboxInner::new(mmio_start_addr)),
        }
    }
}

//------------------------------------------------------------------------------
// OS Interface Code
//------------------------------------------------------------------------------

impl driver::interface::DeviceDriver for Mailbox {
    fn compatible(&self) -> &'static str {
        Self::COMPATIBLE
    }
}

impl hwinfo::interface::HardwareInfo for Mailbox {
    fn board_revision(&self) -> Result<u32, hwinfo::QueryError> {
        let [revision, _] = self
            .inner
            .lock(|inner| inner.property(tag::GET_BOARD_REVISION))?;

        Ok(revision)
    }

    fn arm_memory(&self) -> Result<hwinfo::ArmMemory, hwinfo::QueryError> {
        let [base, size] = self
            .inner
            .lock(|inner| inner.property(tag::GET_ARM_MEMORY))?;

        Ok(hwinfo::ArmMemory { base, size })
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
