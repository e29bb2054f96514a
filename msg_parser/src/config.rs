//! Framing configuration.

use crate::error::ConfigError;

/// Default capacity of the message buffer. Longest accepted message is one
/// byte shorter.
pub const INPUT_BUFFER_SIZE: usize = 64;

/// Default start-of-message marker.
pub const DEFAULT_START_BYTE: u8 = b'/';

/// Default end-of-message marker (carriage return).
pub const DEFAULT_END_BYTE: u8 = b'\r';

/// Start/end markers and whether the start marker is required.
///
/// All three values can be changed at any time on a running parser; see
/// [`MsgParser::use_start_byte_set`](crate::MsgParser::use_start_byte_set) for
/// how the framing state reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Marks the beginning of a message when `use_start_byte` is set.
    pub start_byte: u8,
    /// Terminates a message and triggers dispatch.
    pub end_byte: u8,
    /// When `false`, every byte belongs to a message.
    pub use_start_byte: bool,
}

impl ParserConfig {
    /// `/` to start, `\r` to end, start byte not required.
    pub const fn new() -> Self {
        Self {
            start_byte: DEFAULT_START_BYTE,
            end_byte: DEFAULT_END_BYTE,
            use_start_byte: false,
        }
    }

    pub const fn with_start_byte(mut self, start_byte: u8) -> Self {
        self.start_byte = start_byte;
        self
    }

    pub const fn with_end_byte(mut self, end_byte: u8) -> Self {
        self.end_byte = end_byte;
        self
    }

    pub const fn with_use_start_byte(mut self, use_start_byte: bool) -> Self {
        self.use_start_byte = use_start_byte;
        self
    }

    /// Checks the markers can frame a message at all.
    ///
    /// The parser itself never calls this and accepts any configuration; a
    /// start byte equal to the end byte just means every start byte is read
    /// as an empty message.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.use_start_byte && self.start_byte == self.end_byte {
            return Err(ConfigError::SameMarkers(self.end_byte));
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
