//! Byte-level framing state machine.
//!
//! The framer only decides where messages begin and end. It stores message
//! bytes in a [`MessageBuffer`] and reports what each byte did as a [`Step`];
//! dispatching a completed message is left to [`MsgParser`](crate::MsgParser).

#[cfg(feature = "heap-input-buffer")]
use alloc::boxed::Box;

use crate::buffer::MessageBuffer;
use crate::config::ParserConfig;

/// Where the framer is within the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Dropping bytes until the start byte arrives. Only reachable while
    /// start-byte framing is enabled.
    AwaitingStart,
    /// Storing bytes until the end byte arrives.
    ReadingMessage,
}

/// Outcome of pushing one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Byte arrived outside a message and was dropped.
    Discarded,
    /// Start byte seen, a new message begins.
    Started,
    /// Byte appended to the message.
    Stored,
    /// Buffer filled up before the end byte; the partial message is gone.
    Overflow { dropped: usize },
    /// End byte seen. The message stays in the buffer until [`Framer::clear`].
    Complete,
}

/// Turns single bytes into message boundaries.
///
/// # Type Parameters
/// - `N`: Message buffer capacity. A message is dropped as soon as it reaches
///   `N` bytes without an end byte, so the longest usable message is `N - 1`.
pub struct Framer<const N: usize> {
    state: ParserState,
    config: ParserConfig,

    #[cfg(feature = "heap-input-buffer")]
    buffer: Box<MessageBuffer<N>>,
    #[cfg(not(feature = "heap-input-buffer"))]
    buffer: MessageBuffer<N>,
}

impl<const N: usize> Framer<N> {
    pub fn new(config: ParserConfig) -> Self {
        #[cfg(feature = "heap-input-buffer")]
        let buffer = Box::new(MessageBuffer::<N>::new());
        #[cfg(not(feature = "heap-input-buffer"))]
        let buffer = MessageBuffer::<N>::new();

        Self {
            state: Self::initial_state(&config),
            config,
            buffer,
        }
    }

    /// Feeds one byte through the state machine.
    pub fn push(&mut self, byte: u8) -> Step {
        match self.state {
            ParserState::AwaitingStart => {
                if byte == self.config.start_byte {
                    self.state = ParserState::ReadingMessage;
                    trace!("start byte received");
                    Step::Started
                } else {
                    Step::Discarded
                }
            }

            ParserState::ReadingMessage => {
                if byte == self.config.end_byte {
                    if self.config.use_start_byte {
                        self.state = ParserState::AwaitingStart;
                    }
                    trace!("end byte received, {} bytes buffered", self.buffer.len());
                    return Step::Complete;
                }

                if !self.buffer.push(byte) || self.buffer.is_full() {
                    let dropped = self.buffer.len();
                    self.clear();
                    self.state = Self::initial_state(&self.config);
                    return Step::Overflow { dropped };
                }
                Step::Stored
            }
        }
    }

    /// Empties the message buffer. Called once a completed message has been
    /// dispatched.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Drops any partial message and returns to the initial state.
    pub fn reset(&mut self) {
        self.clear();
        self.state = Self::initial_state(&self.config);
    }

    /// Bytes of the current message, end byte excluded.
    pub fn message(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn set_start_byte(&mut self, start_byte: u8) {
        self.config.start_byte = start_byte;
    }

    pub fn set_end_byte(&mut self, end_byte: u8) {
        self.config.end_byte = end_byte;
    }

    /// Enables or disables start-byte framing.
    ///
    /// Disabling it while waiting for a start byte switches straight to
    /// reading. Enabling it mid-message changes nothing until that message
    /// ends.
    pub fn set_use_start_byte(&mut self, use_start_byte: bool) {
        self.config.use_start_byte = use_start_byte;
        if self.state == ParserState::AwaitingStart && !use_start_byte {
            self.state = ParserState::ReadingMessage;
        }
    }

    /// Replaces all three settings, with the same state rules as the
    /// individual setters.
    pub fn set_config(&mut self, config: ParserConfig) {
        self.set_start_byte(config.start_byte);
        self.set_end_byte(config.end_byte);
        self.set_use_start_byte(config.use_start_byte);
    }

    fn initial_state(config: &ParserConfig) -> ParserState {
        if config.use_start_byte {
            ParserState::AwaitingStart
        } else {
            ParserState::ReadingMessage
        }
    }
}

impl<const N: usize> Default for Framer<N> {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}
