#![no_std]

//! Compile-time settings for the demo.

/// Message buffer capacity; the longest accepted message is one byte shorter.
pub const INPUT_BUFFER_SIZE: usize = 64;

/// Start-of-message marker used when `--use-start-byte` is passed.
pub const START_BYTE: u8 = b'/';

/// End-of-message marker. Raw mode delivers Enter as `\r`.
pub const END_BYTE: u8 = b'\r';

/// Start-byte framing is off unless requested.
pub const USE_START_BYTE: bool = false;

/// Ctrl-D ends the session.
pub const EXIT_BYTE: u8 = 0x04;
