//! # msg_parser
//!
//! A byte-stream message framer and command dispatcher for small devices that
//! talk over a serial link.
//!
//! Bytes are pushed one at a time into a [`MsgParser`]. The parser assembles
//! them into messages delimited by a configurable start and end byte, takes the
//! first whitespace-separated word as the command name, looks it up in a
//! [`CommandTable`] and calls the matching handler. Handlers receive an
//! [`Args`] view of the message and pull their numeric arguments from it in
//! order:
//!
//! ```
//! use msg_parser::{Args, CommandEntry, MsgParser};
//!
//! fn set(args: &mut Args<'_>) {
//!     let channel = args.get_int();
//!     let level = args.get_float();
//!     assert_eq!((channel, level), (10, 3.5));
//! }
//!
//! static COMMANDS: [CommandEntry; 1] = [
//!     CommandEntry::new("SET", set).with_description("SET <channel> <level>"),
//! ];
//!
//! let mut parser = MsgParser::new();
//! parser.set_table(&COMMANDS);
//! parser.process_bytes(b"SET 10 3.5\r");
//! assert_eq!(parser.stats().dispatched, 1);
//! ```
//!
//! Messages that match no entry are handed, untouched, to the optional
//! not-found handler. Messages longer than the buffer are dropped silently.
//! Neither case is reported to the caller feeding bytes; both show up in
//! [`ParserStats`] and through the optional [`ParserEvent`] hook.
//!
//! ## Cargo features
//! - `heap-input-buffer`: keep the message buffer in a `Box` (needs `alloc`).
//! - `tracing`: emit framing and dispatch logs through `tracing`.
//! - `defmt`: emit the same logs through `defmt`.

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "heap-input-buffer")]
extern crate alloc;

#[macro_use]
mod fmt;

pub mod args;
pub mod buffer;
pub mod config;
pub mod error;
pub mod events;
pub mod framer;
pub mod parser;
pub mod table;

pub use args::Args;
pub use buffer::MessageBuffer;
pub use config::{ParserConfig, DEFAULT_END_BYTE, DEFAULT_START_BYTE, INPUT_BUFFER_SIZE};
pub use error::{ConfigError, TableError};
pub use events::{EventHook, ParserEvent, ParserStats};
pub use framer::{Framer, ParserState, Step};
pub use parser::{MsgParser, NotFoundHandler, VERSION};
pub use table::{CommandEntry, CommandList, CommandTable, Entries, Handler};

// reexport heapless
pub use heapless;
