//! MsgParser frames a serial byte stream into text messages and dispatches
//! them to command handlers. It is built for embedded or constrained targets:
//! - Fixed-size message buffer, no allocation
//! - Optional start byte, configurable end byte
//! - Table-driven command lookup with a not-found fallback
//! - Ordered argument extraction through [`Args`]
//!
//! It integrates with:
//! - Framer
//! - CommandTable
//! - ParserStats / ParserEvent

use crate::args::Args;
use crate::config::{ParserConfig, INPUT_BUFFER_SIZE};
use crate::events::{EventHook, ParserEvent, ParserStats};
use crate::framer::{Framer, ParserState, Step};
use crate::table::{CommandEntry, CommandTable};

/// Version identifier of the message parser component.
pub const VERSION: u8 = 0x04;

/// Called with the complete, untouched message when no command matched.
/// The slice length is the number of bytes received before the end byte.
pub type NotFoundHandler = fn(&[u8]);

static NO_COMMANDS: [CommandEntry; 0] = [];

/// # Type Parameters
/// - `'t`: Lifetime of the installed command table.
/// - `N`: Message buffer capacity (defaults to [`INPUT_BUFFER_SIZE`]).
///
/// # Fields
/// - `framer`: Start/end byte state machine owning the message buffer.
/// - `table`: Commands searched on every completed message.
/// - `not_found`: Fallback for messages whose command is not in `table`.
/// - `event_hook`: Optional observer for overflows and dispatch outcomes.
/// - `stats`: Running counters.
pub struct MsgParser<'t, const N: usize = INPUT_BUFFER_SIZE> {
    framer: Framer<N>,
    table: &'t dyn CommandTable,
    not_found: Option<NotFoundHandler>,
    event_hook: Option<EventHook>,
    stats: ParserStats,
}

impl<'t> MsgParser<'t, INPUT_BUFFER_SIZE> {
    /// Creates a parser with the default buffer size and configuration:
    /// no start byte, `\r` as end byte, an empty command table.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }
}

impl<'t, const N: usize> MsgParser<'t, N> {
    /// Creates a parser with the given framing configuration.
    ///
    /// # Behavior
    /// - Starts waiting for the start byte if `config.use_start_byte` is set,
    ///   otherwise starts reading straight away.
    /// - Installs an empty command table and no not-found handler.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            framer: Framer::new(config),
            table: &NO_COMMANDS,
            not_found: None,
            event_hook: None,
            stats: ParserStats::default(),
        }
    }

    /// Installs a new command table. Takes effect for the next completed
    /// message.
    pub fn set_table(&mut self, table: &'t dyn CommandTable) {
        self.table = table;
    }

    /// Sets the handler called with unmatched messages. `None` drops them.
    pub fn set_handler_for_cmd_not_found(&mut self, handler: Option<NotFoundHandler>) {
        self.not_found = handler;
    }

    /// Sets the observer called for every [`ParserEvent`].
    pub fn set_event_hook(&mut self, hook: Option<EventHook>) {
        self.event_hook = hook;
    }

    /// Changes the start byte. Applies to the next byte received.
    pub fn set_start_byte(&mut self, start_byte: u8) {
        self.framer.set_start_byte(start_byte);
    }

    /// Changes the end byte. Applies to the next byte received.
    pub fn set_end_byte(&mut self, end_byte: u8) {
        self.framer.set_end_byte(end_byte);
    }

    /// Enables or disables start-byte framing.
    ///
    /// Disabling it while waiting for a start byte switches to reading at
    /// once. Enabling it in the middle of a message only affects what happens
    /// after that message's end byte.
    pub fn use_start_byte_set(&mut self, use_start_byte: bool) {
        self.framer.set_use_start_byte(use_start_byte);
    }

    /// Replaces the whole framing configuration.
    pub fn set_config(&mut self, config: ParserConfig) {
        self.framer.set_config(config);
    }

    pub fn config(&self) -> &ParserConfig {
        self.framer.config()
    }

    pub fn state(&self) -> ParserState {
        self.framer.state()
    }

    /// Bytes of the message assembled so far.
    pub fn buffered(&self) -> &[u8] {
        self.framer.message()
    }

    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ParserStats::default();
    }

    /// Drops any partial message and returns to the initial framing state.
    pub fn reset(&mut self) {
        self.framer.reset();
    }

    /// Processes one byte.
    ///
    /// If the byte completes a message, the matching handler (or the
    /// not-found handler) runs before this returns. Nothing is reported back:
    /// overflows and unknown commands are resolved here.
    pub fn process_byte(&mut self, byte: u8) {
        match self.framer.push(byte) {
            Step::Discarded | Step::Stored => {}
            Step::Started => self.emit(ParserEvent::MessageStarted),
            Step::Overflow { dropped } => {
                warn!("message exceeded {} bytes, dropped", dropped);
                self.emit(ParserEvent::Overflow { dropped });
            }
            Step::Complete => {
                let event = self.dispatch();
                self.framer.clear();
                self.emit(event);
            }
        }
    }

    /// Processes every byte of `bytes` in order.
    pub fn process_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.process_byte(byte);
        }
    }

    /// Number of commands in the installed table.
    pub fn num_cmds(&self) -> usize {
        self.table.len()
    }

    /// Name of the command at `index`, `None` when out of range.
    pub fn cmd_string(&self, index: usize) -> Option<&'static str> {
        self.table.name(index)
    }

    /// Description of the command at `index`, `None` when out of range or
    /// when the command has none.
    pub fn cmd_desc(&self, index: usize) -> Option<&'static str> {
        self.table.description(index)
    }

    /// The installed command table.
    pub fn commands(&self) -> &'t dyn CommandTable {
        self.table
    }

    pub fn version(&self) -> u8 {
        VERSION
    }

    fn dispatch(&self) -> ParserEvent {
        let message = self.framer.message();
        let mut args = Args::new(message, self.table);
        let command = args.command();

        let found = if command.is_empty() {
            None
        } else {
            self.table.find(command)
        };

        match found {
            Some((index, entry)) => {
                debug!("dispatching command {}", entry.name);
                (entry.handler)(&mut args);
                ParserEvent::Dispatched { index }
            }
            None => {
                debug!("no command for {} byte message", message.len());
                let handled = match self.not_found {
                    Some(handler) => {
                        handler(message);
                        true
                    }
                    None => false,
                };
                ParserEvent::NotFound {
                    len: message.len(),
                    handled,
                }
            }
        }
    }

    fn emit(&mut self, event: ParserEvent) {
        self.stats.record(&event);
        if let Some(hook) = self.event_hook {
            hook(&event);
        }
    }
}

impl<const N: usize> Default for MsgParser<'_, N> {
    fn default() -> Self {
        Self::with_config(ParserConfig::default())
    }
}
