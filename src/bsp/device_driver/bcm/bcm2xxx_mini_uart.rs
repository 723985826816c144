// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! Mini UART driver.
//!
//! The mini UART is the auxiliary UART of the BCM2837 (UART1). It runs off the VPU core clock and
//! is driven purely by polling: no interrupt is ever enabled.
//!
//! # Resources
//!
//! - <https://github.com/raspberrypi/documentation/files/1888662/BCM2837-ARM-Peripherals.-.Revised.-.V2-1.pdf>

use crate::{
    bsp::device_driver::common::MMIODerefWrapper,
    console, cpu, driver,
    synchronization::{interface::Mutex, NullLock},
};
use tock_registers::{
    interfaces::{ReadWriteable, Readable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite, WriteOnly},
};

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

// Mini UART registers.
//
// Descriptions taken from
// - https://github.com/raspberrypi/documentation/files/1888662/BCM2837-ARM-Peripherals.-.Revised.-.V2-1.pdf
register_bitfields! {
    u32,

    /// Auxiliary enables
    AUX_ENABLES [
        /// If set the mini UART is enabled. The UART will immediately start receiving data,
        /// especially if the UART1_RX line is low.
        ///
        /// If clear the mini UART is disabled. That also disables any mini UART register access.
        MINI_UART_ENABLE OFFSET(0) NUMBITS(1) []
    ],

    /// Mini Uart Interrupt Identify
    AUX_MU_IIR [
        /// Writing with bit 1 set will clear the receive FIFO.
        /// Writing with bit 2 set will clear the transmit FIFO.
        FIFO_CLEAR OFFSET(1) NUMBITS(2) [
            Rx = 0b01,
            Tx = 0b10,
            All = 0b11
        ]
    ],

    /// Mini Uart Line Control
    AUX_MU_LCR [
        /// Mode the UART works in.
        DATA_SIZE OFFSET(0) NUMBITS(2) [
            SevenBit = 0b00,
            EightBit = 0b11
        ]
    ],

    /// Mini Uart Line Status
    AUX_MU_LSR [
        /// This bit is set if the transmit FIFO is empty and the transmitter is idle. (Finished
        /// shifting out the last bit).
        TX_IDLE    OFFSET(6) NUMBITS(1) [],

        /// This bit is set if the transmit FIFO can accept at least one byte.
        TX_EMPTY   OFFSET(5) NUMBITS(1) [],

        /// This bit is set if the receive FIFO holds at least 1 symbol.
        DATA_READY OFFSET(0) NUMBITS(1) []
    ],

    /// Mini Uart Extra Control
    AUX_MU_CNTL [
        /// If this bit is set the mini UART transmitter is enabled.
        /// If this bit is clear the mini UART transmitter is disabled.
        TX_EN OFFSET(1) NUMBITS(1) [
            Disabled = 0,
            Enabled = 1
        ],

        /// If this bit is set the mini UART receiver is enabled.
        /// If this bit is clear the mini UART receiver is disabled.
        RX_EN OFFSET(0) NUMBITS(1) [
            Disabled = 0,
            Enabled = 1
        ]
    ],

    /// Mini Uart Baudrate
    AUX_MU_BAUD [
        /// Mini UART baudrate counter
        RATE OFFSET(0) NUMBITS(16) []
    ]
}

register_structs! {
    #[allow(non_snake_case)]
    RegisterBlock {
        (0x00 => _reserved1),
        (0x04 => AUX_ENABLES: ReadWrite<u32, AUX_ENABLES::Register>),
        (0x08 => _reserved2),
        (0x40 => AUX_MU_IO: ReadWrite<u32>),
        (0x44 => AUX_MU_IER: WriteOnly<u32>),
        (0x48 => AUX_MU_IIR: WriteOnly<u32, AUX_MU_IIR::Register>),
        (0x4C => AUX_MU_LCR: WriteOnly<u32, AUX_MU_LCR::Register>),
        (0x50 => AUX_MU_MCR: WriteOnly<u32>),
        (0x54 => AUX_MU_LSR: ReadOnly<u32, AUX_MU_LSR::Register>),
        (0x58 => _reserved3),
        (0x60 => AUX_MU_CNTL: WriteOnly<u32, AUX_MU_CNTL::Register>),
        (0x64 => _reserved4),
        (0x68 => AUX_MU_BAUD: WriteOnly<u32, AUX_MU_BAUD::Register>),
        (0x6C => @END),
    }
}

/// Abstraction for the associated MMIO registers.
type Registers = MMIODerefWrapper<RegisterBlock>;

struct MiniUartInner {
    registers: Registers,
    baud_divisor: u32,
    initialized: bool,
    chars_written: usize,
    chars_read: usize,
}

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Representation of the mini UART.
pub struct MiniUart {
    inner: NullLock<MiniUartInner>,
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Compute the value of the baud rate register.
///
/// The mini UART samples eight times per bit: `baudrate = core_clock / (8 * (divisor + 1))`.
pub const fn baud_divisor(core_clock_hz: u32, baudrate: u32) -> u32 {
    core_clock_hz / (8 * baudrate) - 1
}

//--------------------------------------------------------------------------------------------------
// Private Code
//--------------------------------------------------------------------------------------------------

impl MiniUartInner {
    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - The user must ensure to provide a correct MMIO start address.
    pub const unsafe fn new(mmio_start_addr: usize, core_clock_hz: u32, baudrate: u32) -> Self {
        Self {
            registers: Registers::new(mmio_start_addr),
            baud_divisor: baud_divisor(core_clock_hz, baudrate),
            initialized: false,
            chars_written: 0,
            chars_read: 0,
        }
    }

    /// Set up baud rate and characteristics (8N1), then enable the transceiver.
    ///
    /// The transmitter and receiver stay disabled while the line is being configured. The
    /// register write order matters and must not be changed.
    pub fn init(&mut self) -> Result<(), &'static str> {
        if self.initialized {
            return Err("Mini UART already initialized");
        }

        // Enable register access to the mini UART.
        self.registers
            .AUX_ENABLES
            .modify(AUX_ENABLES::MINI_UART_ENABLE::SET);

        self.registers.AUX_MU_CNTL.set(0); // Disable send and receive.
        self.registers.AUX_MU_IER.set(0); // Disable RX and TX interrupts.
        self.registers
            .AUX_MU_LCR
            .write(AUX_MU_LCR::DATA_SIZE::EightBit);
        self.registers.AUX_MU_MCR.set(0); // Set "ready to send" high.
        self.registers
            .AUX_MU_BAUD
            .write(AUX_MU_BAUD::RATE.val(self.baud_divisor));

        // Clear FIFOs before using the device.
        self.registers
            .AUX_MU_IIR
            .write(AUX_MU_IIR::FIFO_CLEAR::All);

        // Turn the UART on.
        self.registers
            .AUX_MU_CNTL
            .write(AUX_MU_CNTL::RX_EN::Enabled + AUX_MU_CNTL::TX_EN::Enabled);

        self.initialized = true;

        Ok(())
    }

    /// Send a byte.
    fn write_byte(&mut self, byte: u8) {
        // Wait until the TX FIFO can take another byte.
        while !self.registers.AUX_MU_LSR.is_set(AUX_MU_LSR::TX_EMPTY) {
            cpu::nop();
        }

        // Write the byte to the buffer.
        self.registers.AUX_MU_IO.set(byte as u32);

        self.chars_written += 1;
    }

    /// Block execution until the last buffered byte has been physically put on the TX wire.
    fn flush(&self) {
        while !self.registers.AUX_MU_LSR.is_set(AUX_MU_LSR::TX_IDLE) {
            cpu::nop();
        }
    }

    /// Retrieve a byte.
    fn read_byte(&mut self) -> u8 {
        // Wait until the RX FIFO holds a byte.
        while !self.registers.AUX_MU_LSR.is_set(AUX_MU_LSR::DATA_READY) {
            cpu::nop();
        }

        // Read one byte.
        let mut ret = self.registers.AUX_MU_IO.get() as u8;

        // Convert carrige return to newline.
        if ret == console::CR {
            ret = console::LF
        }

        self.chars_read += 1;

        ret
    }
}

impl MiniUart {
    pub const COMPATIBLE: &'static str = "BCM Mini UART";

    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - The user must ensure to provide a correct MMIO start address.
    pub const unsafe fn new(mmio_start_addr: usize, core_clock_hz: u32, baudrate: u32) -> Self {
        Self {
            inner: NullLock::new(MiniUartInner::new(mmio_start_addr, core_clock_hz, baudrate)),
        }
    }
}

//------------------------------------------------------------------------------
// OS Interface Code
//------------------------------------------------------------------------------

impl driver::interface::DeviceDriver for MiniUart {
    fn compatible(&self) -> &'static str {
        Self::COMPATIBLE
    }

    unsafe fn init(&self) -> Result<(), &'static str> {
        self.inner.lock(|inner| inner.init())
    }
}

impl console::interface::Write for MiniUart {
    fn write_byte(&self, byte: u8) {
        self.inner.lock(|inner| inner.write_byte(byte));
    }

    fn flush(&self) {
        // Spin until TX is idle.
        self.inner.lock(|inner| inner.flush());
    }
}

impl console::interface::Read for MiniUart {
    fn read_byte(&self) -> u8 {
        self.inner.lock(|inner| inner.read_byte())
    }

    fn clear_rx(&self) {
        self.inner.lock(|inner| {
            inner
                .registers
                .AUX_MU_IIR
                .write(AUX_MU_IIR::FIFO_CLEAR::Rx)
        });
    }
}

impl console::interface::Statistics for MiniUart {
    fn chars_written(&self) -> usize {
        self.inner.lock(|inner| inner.chars_written)
    }

    fn chars_read(&self) -> usize {
        self.inner.lock(|inner| inner.chars_read)
    }
}

impl console::interface::All for MiniUart {}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::device_driver::common::FakeMmio;
    use console::interface::{Read, Statistics, Write};
    use driver::interface::DeviceDriver;

    const AUX_ENABLES_OFFSET: usize = 0x04;
    const IO_OFFSET: usize = 0x40;
    const IER_OFFSET: usize = 0x44;
    const IIR_OFFSET: usize = 0x48;
    const LCR_OFFSET: usize = 0x4C;
    const MCR_OFFSET: usize = 0x50;
    const LSR_OFFSET: usize = 0x54;
    const CNTL_OFFSET: usize = 0x60;
    const BAUD_OFFSET: usize = 0x68;

    const LSR_DATA_READY: u32 = 1 << 0;
    const LSR_TX_EMPTY: u32 = 1 << 5;
    const LSR_TX_IDLE: u32 = 1 << 6;

    fn uart_on(mmio: &FakeMmio) -> MiniUart {
        unsafe { MiniUart::new(mmio.start_addr(), 250_000_000, 115_200) }
    }

    #[test]
    fn divisor_for_115200_at_250_mhz() {
        assert_eq!(baud_divisor(250_000_000, 115_200), 270);
        assert_eq!(baud_divisor(250_000_000, 9_600), 3254);
    }

    #[test]
    fn init_leaves_registers_configured() {
        let mmio = FakeMmio::new();
        // SPI1 enabled by someone else, must survive.
        mmio.set(AUX_ENABLES_OFFSET, 0b010);
        mmio.set(IER_OFFSET, 0b11);
        mmio.set(MCR_OFFSET, 0xFF);

        let uart = uart_on(&mmio);
        assert_eq!(unsafe { uart.init() }, Ok(()));

        assert_eq!(mmio.get(AUX_ENABLES_OFFSET), 0b011);
        assert_eq!(mmio.get(IER_OFFSET), 0);
        assert_eq!(mmio.get(LCR_OFFSET), 3);
        assert_eq!(mmio.get(MCR_OFFSET), 0);
        assert_eq!(mmio.get(BAUD_OFFSET), 270);
        assert_eq!(mmio.get(IIR_OFFSET), 6);
        assert_eq!(mmio.get(CNTL_OFFSET), 3);
    }

    #[test]
    fn second_init_is_rejected() {
        let mmio = FakeMmio::new();
        let uart = uart_on(&mmio);

        assert_eq!(unsafe { uart.init() }, Ok(()));
        mmio.set(BAUD_OFFSET, 0);
        assert_eq!(unsafe { uart.init() }, Err("Mini UART already initialized"));

        // Nothing was reprogrammed.
        assert_eq!(mmio.get(BAUD_OFFSET), 0);
    }

    #[test]
    fn write_byte_lands_in_io_register() {
        let mmio = FakeMmio::new();
        mmio.set(LSR_OFFSET, LSR_TX_EMPTY | LSR_TX_IDLE);
        let uart = uart_on(&mmio);

        uart.write_byte(b'#');
        assert_eq!(mmio.get(IO_OFFSET), u32::from(b'#'));

        uart.write_string("\n");
        // The last byte written is the LF, after the CR.
        assert_eq!(mmio.get(IO_OFFSET), u32::from(b'\n'));
        assert_eq!(uart.chars_written(), 3);

        uart.flush();
    }

    #[test]
    fn read_byte_turns_carriage_return_into_line_feed() {
        let mmio = FakeMmio::new();
        mmio.set(LSR_OFFSET, LSR_DATA_READY);
        let uart = uart_on(&mmio);

        mmio.set(IO_OFFSET, u32::from(b'\r'));
        assert_eq!(uart.read_byte(), b'\n');

        mmio.set(IO_OFFSET, u32::from(b'h'));
        assert_eq!(uart.read_byte(), b'h');

        assert_eq!(uart.chars_read(), 2);
    }

    #[test]
    fn clear_rx_only_resets_the_receive_fifo() {
        let mmio = FakeMmio::new();
        let uart = uart_on(&mmio);

        uart.clear_rx();

        assert_eq!(mmio.get(IIR_OFFSET), 0b010);
    }
}
