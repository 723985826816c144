// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2019-2023 Andre Richter <andre.o.richter@gmail.com>

//! Scripted devices for driving the shell on the host.

#![allow(dead_code)]

use libkernel::{
    console::interface::{All, Read, Statistics, Write},
    hwinfo::{interface::HardwareInfo, ArmMemory, QueryError},
    power::interface::Reset,
    shell::Shell,
};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    panic::{self, AssertUnwindSafe},
};

/// A terminal that types a fixed script and records everything sent back to it.
///
/// Carriage returns in the script reach the shell as line feeds, like the mini UART does it.
#[derive(Default)]
pub struct ScriptedConsole {
    input: RefCell<VecDeque<u8>>,
    wire: RefCell<Vec<u8>>,
    flushes: Cell<usize>,
}

impl ScriptedConsole {
    pub fn typing(script: &[u8]) -> Self {
        Self {
            input: RefCell::new(script.iter().copied().collect()),
            ..Default::default()
        }
    }

    /// Everything the shell sent, as transmitted.
    pub fn wire(&self) -> Vec<u8> {
        self.wire.borrow().clone()
    }

    pub fn wire_string(&self) -> String {
        String::from_utf8(self.wire()).unwrap()
    }

    pub fn pending_input(&self) -> usize {
        self.input.borrow().len()
    }

    pub fn flushes(&self) -> usize {
        self.flushes.get()
    }
}

impl Write for ScriptedConsole {
    fn write_byte(&self, byte: u8) {
        self.wire.borrow_mut().push(byte);
    }

    fn flush(&self) {
        self.flushes.set(self.flushes.get() + 1);
    }
}

impl Read for ScriptedConsole {
    fn read_byte(&self) -> u8 {
        let byte = self
            .input
            .borrow_mut()
            .pop_front()
            .expect("shell read past the end of the script");

        if byte == b'\r' {
            b'\n'
        } else {
            byte
        }
    }

    fn clear_rx(&self) {}
}

impl Statistics for ScriptedConsole {
    fn chars_written(&self) -> usize {
        self.wire.borrow().len()
    }
}

impl All for ScriptedConsole {}

/// Firmware that answers like a Raspberry Pi 3 B+ with the default memory split.
pub struct FixedBoard {
    pub revision: Result<u32, QueryError>,
    pub memory: Result<ArmMemory, QueryError>,
    pub queries: Cell<usize>,
}

impl FixedBoard {
    pub fn rpi3b_plus() -> Self {
        Self {
            revision: Ok(0x00A0_20D3),
            memory: Ok(ArmMemory {
                base: 0x0000_0000,
                size: 0x3B40_0000,
            }),
            queries: Cell::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            revision: Err(QueryError::NoResponse),
            memory: Err(QueryError::NoResponse),
            queries: Cell::new(0),
        }
    }
}

impl HardwareInfo for FixedBoard {
    fn board_revision(&self) -> Result<u32, QueryError> {
        self.queries.set(self.queries.get() + 1);
        self.revision
    }

    fn arm_memory(&self) -> Result<ArmMemory, QueryError> {
        self.queries.set(self.queries.get() + 1);
        self.memory
    }
}

/// Records the requested delay, then unwinds out of the shell in place of the hardware reset.
#[derive(Default)]
pub struct RecordingReset {
    pub ticks: Cell<Option<u32>>,
}

impl Reset for RecordingReset {
    fn reset(&self, ticks: u32) -> ! {
        self.ticks.set(Some(ticks));

        panic!("board reset");
    }
}

/// Run `lines` shell cycles against `script` and return the console for inspection.
pub fn run_cycles(script: &[u8], lines: usize, board: &FixedBoard) -> ScriptedConsole {
    let console = ScriptedConsole::typing(script);
    let reset = RecordingReset::default();

    let mut shell = Shell::new(&console, board, &reset);
    for _ in 0..lines {
        shell.run_once();
    }

    assert_eq!(reset.ticks.get(), None, "unexpected reset");
    console
}

/// Run shell cycles until the reset collaborator is invoked. Returns the delay it was given.
pub fn run_until_reset(console: &ScriptedConsole, board: &FixedBoard) -> Option<u32> {
    let reset = RecordingReset::default();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        Shell::new(console, board, &reset).run();
    }));
    assert!(outcome.is_err());

    reset.ticks.get()
}
