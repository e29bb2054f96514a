//! Command tables.
//!
//! The parser only needs to read entries by index, so where a table lives
//! (a `static` in flash, an array on the stack, a list filled at runtime) is
//! hidden behind [`CommandTable`].

use heapless::Vec;

use crate::args::Args;
use crate::error::TableError;

/// Signature of a command handler. Arguments are pulled from [`Args`].
pub type Handler = fn(&mut Args<'_>);

/// One command: its name, an optional help line and the handler to call.
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    /// Matched exactly and case-sensitively against the first token.
    pub name: &'static str,

    /// Short help text.
    pub description: Option<&'static str>,

    pub handler: Handler,
}

impl CommandEntry {
    pub const fn new(name: &'static str, handler: Handler) -> Self {
        Self {
            name,
            description: None,
            handler,
        }
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// Read access to an ordered list of commands.
///
/// Order is search order; the first entry whose name matches wins.
pub trait CommandTable {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Entry at `index`, `None` when out of range.
    fn entry(&self, index: usize) -> Option<CommandEntry>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear search for `name`. Returns the first match and its index.
    fn find(&self, name: &[u8]) -> Option<(usize, CommandEntry)> {
        (0..self.len()).find_map(|i| {
            self.entry(i)
                .filter(|e| e.name.as_bytes() == name)
                .map(|e| (i, e))
        })
    }

    fn name(&self, index: usize) -> Option<&'static str> {
        self.entry(index).map(|e| e.name)
    }

    fn description(&self, index: usize) -> Option<&'static str> {
        self.entry(index).and_then(|e| e.description)
    }
}

impl<'a> dyn CommandTable + 'a {
    /// Iterates over the entries in search order.
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            table: self,
            index: 0,
        }
    }
}

/// Iterator over the entries of a [`CommandTable`].
pub struct Entries<'a> {
    table: &'a dyn CommandTable,
    index: usize,
}

impl Iterator for Entries<'_> {
    type Item = CommandEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.table.entry(self.index)?;
        self.index += 1;
        Some(entry)
    }
}

impl CommandTable for [CommandEntry] {
    fn len(&self) -> usize {
        <[CommandEntry]>::len(self)
    }

    fn entry(&self, index: usize) -> Option<CommandEntry> {
        self.get(index).copied()
    }
}

impl<const N: usize> CommandTable for [CommandEntry; N] {
    fn len(&self) -> usize {
        N
    }

    fn entry(&self, index: usize) -> Option<CommandEntry> {
        self.get(index).copied()
    }
}

impl<const N: usize> CommandTable for Vec<CommandEntry, N> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn entry(&self, index: usize) -> Option<CommandEntry> {
        self.get(index).copied()
    }
}

/// A command table filled at runtime, holding at most `N` entries.
///
/// Unlike the plain slice and array tables, `push` rejects names that could
/// never be matched and names that are already present.
pub struct CommandList<const N: usize> {
    entries: Vec<CommandEntry, N>,
}

impl<const N: usize> CommandList<N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends `entry` at the end of the search order.
    pub fn push(&mut self, entry: CommandEntry) -> Result<(), TableError> {
        if entry.name.is_empty() {
            return Err(TableError::EmptyName);
        }
        if entry.name.bytes().any(|b| b.is_ascii_whitespace()) {
            return Err(TableError::NameHasWhitespace(entry.name));
        }
        if self.entries.iter().any(|e| e.name == entry.name) {
            return Err(TableError::Duplicate(entry.name));
        }
        self.entries
            .push(entry)
            .map_err(|_| TableError::Full { capacity: N })
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn as_slice(&self) -> &[CommandEntry] {
        &self.entries
    }
}

impl<const N: usize> Default for CommandList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CommandTable for CommandList<N> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, index: usize) -> Option<CommandEntry> {
        self.entries.get(index).copied()
    }
}
