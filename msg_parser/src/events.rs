//! Observability for the silent paths.
//!
//! Overflows and unmatched commands never reach the code feeding bytes. They
//! are counted in [`ParserStats`] and, if a hook is installed, reported as
//! [`ParserEvent`]s.

/// Something the parser did with a byte or a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserEvent {
    /// Start byte received while waiting for one.
    MessageStarted,
    /// Message reached the buffer capacity and was dropped.
    Overflow { dropped: usize },
    /// Command found; `index` is its position in the table.
    Dispatched { index: usize },
    /// No entry matched. `handled` tells whether a not-found handler ran.
    NotFound { len: usize, handled: bool },
}

/// Observer called synchronously for every event.
pub type EventHook = fn(&ParserEvent);

/// Running counters, wrapping on overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParserStats {
    /// Messages completed by an end byte.
    pub messages: u32,
    pub dispatched: u32,
    pub not_found: u32,
    pub overflows: u32,
}

impl ParserStats {
    pub(crate) fn record(&mut self, event: &ParserEvent) {
        match event {
            ParserEvent::MessageStarted => {}
            ParserEvent::Overflow { .. } => self.overflows = self.overflows.wrapping_add(1),
            ParserEvent::Dispatched { .. } => {
                self.messages = self.messages.wrapping_add(1);
                self.dispatched = self.dispatched.wrapping_add(1);
            }
            ParserEvent::NotFound { .. } => {
                self.messages = self.messages.wrapping_add(1);
                self.not_found = self.not_found.wrapping_add(1);
            }
        }
    }
}
