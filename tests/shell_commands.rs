// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2019-2023 Andre Richter <andre.o.richter@gmail.com>

//! Output of every shell command, byte for byte as it appears on the wire.

mod common;

use common::{run_cycles, run_until_reset, FixedBoard, ScriptedConsole};
use libkernel::{hwinfo::QueryError, shell};

#[test]
fn help_lists_all_commands() {
    let console = run_cycles(b"help\r", 1, &FixedBoard::rpi3b_plus());

    assert_eq!(
        console.wire_string(),
        "# help\n\
         help\t:print this help menu\r\n\
         hello\t:print Hello World!\r\n\
         info\t:Get the hardware's information\r\n\
         reboot\t:reboot the device\r\n"
    );
}

#[test]
fn help_order_matches_command_table() {
    let names: Vec<_> = shell::commands().map(|(name, _)| name).collect();

    assert_eq!(names, ["help", "hello", "info", "reboot"]);
}

#[test]
fn hello_greets() {
    let console = run_cycles(b"hello\r", 1, &FixedBoard::rpi3b_plus());

    assert_eq!(console.wire(), b"# hello\nHello World!\r\n");
}

#[test]
fn prompt_follows_command_output() {
    let console = run_cycles(b"hello\rhello\r", 2, &FixedBoard::rpi3b_plus());

    assert_eq!(
        console.wire(),
        b"# hello\nHello World!\r\n# hello\nHello World!\r\n"
    );
}

#[test]
fn info_prints_revision_and_memory() {
    let console = run_cycles(b"info\r", 1, &FixedBoard::rpi3b_plus());

    assert_eq!(
        console.wire_string(),
        "# info\n\
         My board revision is: 0x00A020D3\r\n\
         My ARM memory base address is: 0x00000000\r\n\
         My ARM memory size is: 0x3B400000\r\n"
    );
}

#[test]
fn info_reports_failed_query_without_values() {
    let console = run_cycles(b"info\r", 1, &FixedBoard::unreachable());

    let out = console.wire_string();
    assert!(out.ends_with("Unable to query serial!\r\n"));
    assert!(!out.contains("0x"));
}

#[test]
fn info_prints_nothing_partial_when_memory_query_fails() {
    let board = FixedBoard {
        memory: Err(QueryError::Rejected),
        ..FixedBoard::rpi3b_plus()
    };

    let console = run_cycles(b"info\r", 1, &board);

    assert_eq!(console.wire(), b"# info\nUnable to query serial!\r\n");
}

#[test]
fn reboot_announces_and_resets_with_fixed_delay() {
    let console = ScriptedConsole::typing(b"reboot\rhello\r");

    let ticks = run_until_reset(&console, &FixedBoard::rpi3b_plus());

    assert_eq!(ticks, Some(shell::REBOOT_DELAY_TICKS));
    assert_eq!(ticks, Some(1000));
    assert_eq!(console.wire(), b"# reboot\nRebooting....\r\n");
    // The announcement is flushed before the watchdog is armed.
    assert_eq!(console.flushes(), 1);
    // Nothing after the reboot line was consumed.
    assert_eq!(console.pending_input(), b"hello\r".len());
}

#[test]
fn reboot_after_other_commands() {
    let console = ScriptedConsole::typing(b"hello\rreboot\r");

    let ticks = run_until_reset(&console, &FixedBoard::rpi3b_plus());

    assert_eq!(ticks, Some(1000));
    assert!(console
        .wire_string()
        .ends_with("# reboot\nRebooting....\r\n"));
}
