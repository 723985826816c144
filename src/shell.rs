// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2023 Andre Richter <andre.o.richter@gmail.com>

//! The operator shell.
//!
//! One cycle: print the prompt, read a line while echoing every byte, run the command whose name
//! equals the whole line. Lines that match nothing are ignored without a message.
//!
//! ```text
//! # hello
//! Hello World!
//! # info
//! My board revision is: 0x00A02082
//! My ARM memory base address is: 0x00000000
//! My ARM memory size is: 0x3B400000
//! #
//! ```
//!
//! All output goes through the console's byte primitives, so every line feed leaves the board as
//! CR LF.

mod line_buffer;

use crate::{
    console::{
        self,
        interface::{Read, Write},
    },
    hwinfo::{self, interface::HardwareInfo},
    power::interface::Reset,
};

pub use line_buffer::{LineBuffer, LINE_CAPACITY};

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

struct Command {
    name: &'static str,
    brief: &'static str,
    run: fn(&Shell<'_>),
}

static COMMANDS: [Command; 4] = [
    Command {
        name: "help",
        brief: "print this help menu",
        run: help,
    },
    Command {
        name: "hello",
        brief: "print Hello World!",
        run: hello,
    },
    Command {
        name: "info",
        brief: "Get the hardware's information",
        run: info,
    },
    Command {
        name: "reboot",
        brief: "reboot the device",
        run: reboot,
    },
];

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Printed before every line of input.
pub const PROMPT: &str = "# ";

/// Watchdog ticks between the `reboot` command and the actual reset.
pub const REBOOT_DELAY_TICKS: u32 = 1000;

/// The shell and the devices it talks to.
pub struct Shell<'a> {
    console: &'a dyn console::interface::All,
    hw_info: &'a dyn HardwareInfo,
    reset: &'a dyn Reset,
    line: LineBuffer,
}

//--------------------------------------------------------------------------------------------------
// Private Code
//--------------------------------------------------------------------------------------------------

fn help(shell: &Shell<'_>) {
    for cmd in COMMANDS.iter() {
        shell.console.write_string(cmd.name);
        shell.console.write_string("\t:");
        shell.console.write_string(cmd.brief);
        shell.console.write_string("\n");
    }
}

fn hello(shell: &Shell<'_>) {
    shell.console.write_string("Hello World!\n");
}

/// Both queries must succeed before anything is printed.
fn info(shell: &Shell<'_>) {
    let query = || -> Result<(u32, hwinfo::ArmMemory), hwinfo::QueryError> {
        Ok((shell.hw_info.board_revision()?, shell.hw_info.arm_memory()?))
    };

    let Ok((revision, memory)) = query() else {
        shell.console.write_string("Unable to query serial!\n");
        return;
    };

    shell.console.write_string("My board revision is: ");
    shell.console.write_hex(revision);
    shell.console.write_string("\n");

    shell.console.write_string("My ARM memory base address is: ");
    shell.console.write_hex(memory.base);
    shell.console.write_string("\n");

    shell.console.write_string("My ARM memory size is: ");
    shell.console.write_hex(memory.size);
    shell.console.write_string("\n");
}

fn reboot(shell: &Shell<'_>) {
    shell.console.write_string("Rebooting....\n");
    shell.console.flush();

    shell.reset.reset(REBOOT_DELAY_TICKS)
}

impl Shell<'_> {
    /// Read bytes into the line buffer until a line feed arrives. Every byte is echoed.
    fn read_line(&mut self) {
        self.line.clear();

        loop {
            let byte = self.console.read_byte();
            self.console.write_byte(byte);

            if byte == console::LF {
                break;
            }

            self.line.push(byte);
        }

        self.line.terminate();
    }

    fn dispatch(&self) {
        if self.line.is_truncated() {
            return;
        }

        let line = self.line.as_bytes();
        if let Some(cmd) = COMMANDS.iter().find(|cmd| cmd.name.as_bytes() == line) {
            (cmd.run)(self);
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl<'a> Shell<'a> {
    /// Create an instance.
    pub fn new(
        console: &'a dyn console::interface::All,
        hw_info: &'a dyn HardwareInfo,
        reset: &'a dyn Reset,
    ) -> Self {
        Self {
            console,
            hw_info,
            reset,
            line: LineBuffer::new(),
        }
    }

    /// One prompt, one line, one dispatch.
    pub fn run_once(&mut self) {
        self.console.write_string(PROMPT);
        self.read_line();
        self.dispatch();
    }

    /// Serve the operator forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.run_once();
        }
    }
}

/// Names and descriptions of all commands, in `help` order.
pub fn commands() -> impl Iterator<Item = (&'static str, &'static str)> {
    COMMANDS.iter().map(|cmd| (cmd.name, cmd.brief))
}
