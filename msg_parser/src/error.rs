//! Error types.
//!
//! Feeding bytes never fails; these only come out of building a command table
//! at runtime and of the opt-in configuration check.

use thiserror::Error;

/// Reasons a command cannot be added to a [`CommandList`](crate::CommandList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// The list already holds `capacity` entries.
    #[error("command table is full ({capacity} entries)")]
    Full { capacity: usize },

    /// An empty name can never be typed as a command.
    #[error("command name is empty")]
    EmptyName,

    /// Names are matched against a single whitespace-delimited token.
    #[error("command name `{0}` contains whitespace")]
    NameHasWhitespace(&'static str),

    /// Only the first of two equal names could ever be reached.
    #[error("command `{0}` is already registered")]
    Duplicate(&'static str),
}

/// Problems reported by [`ParserConfig::validate`](crate::ParserConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("start byte {0:#04x} is also the end byte")]
    SameMarkers(u8),
}
