// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2019-2023 Andre Richter <andre.o.richter@gmail.com>

//! Line handling: echo, exact matching, unknown input and overlong lines.

mod common;

use common::{run_cycles, FixedBoard};
use libkernel::shell::{LINE_CAPACITY, PROMPT};

#[test]
fn first_output_is_the_prompt() {
    let console = run_cycles(b"\r", 1, &FixedBoard::rpi3b_plus());

    assert!(console.wire().starts_with(PROMPT.as_bytes()));
    assert_eq!(PROMPT, "# ");
}

#[test]
fn unknown_input_is_only_echoed() {
    let console = run_cycles(b"foo\r", 1, &FixedBoard::rpi3b_plus());

    assert_eq!(console.wire(), b"# foo\n");
}

#[test]
fn empty_line_does_nothing() {
    let console = run_cycles(b"\r\r", 2, &FixedBoard::rpi3b_plus());

    assert_eq!(console.wire(), b"# \n# \n");
}

#[test]
fn arguments_prevent_a_match() {
    let console = run_cycles(b"help foo\r", 1, &FixedBoard::rpi3b_plus());

    assert_eq!(console.wire(), b"# help foo\n");
}

#[test]
fn matching_is_exact() {
    for line in [&b"Hello\r"[..], b"hell\r", b"helloo\r", b" hello\r", b"hello \r"] {
        let console = run_cycles(line, 1, &FixedBoard::rpi3b_plus());

        let mut expected = b"# ".to_vec();
        expected.extend_from_slice(&line[..line.len() - 1]);
        expected.push(b'\n');
        assert_eq!(console.wire(), expected, "line {:?}", line);
    }
}

#[test]
fn every_input_byte_is_echoed_in_order() {
    let script = b"he\tl\x7flo wo\x1brld\r";
    let console = run_cycles(script, 1, &FixedBoard::rpi3b_plus());

    let mut expected = b"# ".to_vec();
    expected.extend_from_slice(&script[..script.len() - 1]);
    expected.push(b'\n');
    assert_eq!(console.wire(), expected);
}

#[test]
fn line_feed_also_ends_a_line() {
    let console = run_cycles(b"hello\n", 1, &FixedBoard::rpi3b_plus());

    assert_eq!(console.wire(), b"# hello\nHello World!\r\n");
}

#[test]
fn overlong_line_is_echoed_but_never_dispatched() {
    let mut script = b"hello".to_vec();
    script.resize(LINE_CAPACITY * 2, b' ');
    script.push(b'\r');

    let console = run_cycles(&script, 1, &FixedBoard::rpi3b_plus());

    let wire = console.wire();
    assert_eq!(wire.len(), PROMPT.len() + script.len());
    assert!(!console.wire_string().contains("Hello World!"));
}

#[test]
fn overlong_command_prefix_does_not_match() {
    // 255 bytes fit, everything after is dropped. The kept prefix must not be dispatched either.
    let mut script = vec![b'x'; LINE_CAPACITY - 1];
    script.extend_from_slice(b"hello\r");

    let console = run_cycles(&script, 1, &FixedBoard::rpi3b_plus());

    assert_eq!(console.wire().len(), PROMPT.len() + script.len());
}

#[test]
fn shell_recovers_after_overflow() {
    let mut script = vec![b'a'; LINE_CAPACITY + 10];
    script.push(b'\r');
    script.extend_from_slice(b"hello\r");

    let console = run_cycles(&script, 2, &FixedBoard::rpi3b_plus());

    assert!(console.wire_string().ends_with("# hello\nHello World!\r\n"));
}

#[test]
fn longest_fitting_line_is_still_dispatched_when_it_matches_nothing() {
    let mut script = vec![b'y'; LINE_CAPACITY - 1];
    script.push(b'\r');
    script.extend_from_slice(b"hello\r");

    let console = run_cycles(&script, 2, &FixedBoard::rpi3b_plus());

    assert!(console.wire_string().ends_with("Hello World!\r\n"));
    assert_eq!(console.pending_input(), 0);
}
