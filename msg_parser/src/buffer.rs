use heapless::Vec;

/// A fixed-size, heapless byte buffer holding the message being assembled.
///
/// `MessageBuffer` never allocates, which makes it suitable for embedded or
/// resource-constrained targets.
///
/// # Type Parameters
/// - `N`: The buffer capacity in bytes.
pub struct MessageBuffer<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> MessageBuffer<N> {
    /// Creates a new, empty `MessageBuffer`.
    ///
    /// # Example
    /// ```
    /// use msg_parser::MessageBuffer;
    /// let buf: MessageBuffer<8> = MessageBuffer::new();
    /// assert!(buf.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Appends a byte at the write index.
    ///
    /// Returns `true` if the byte was stored, or `false` if the buffer is full.
    ///
    /// # Example
    /// ```
    /// use msg_parser::MessageBuffer;
    /// let mut buf: MessageBuffer<1> = MessageBuffer::new();
    /// assert!(buf.push(b'a'));
    /// assert!(!buf.push(b'b'));
    /// ```
    pub fn push(&mut self, byte: u8) -> bool {
        self.bytes.push(byte).is_ok()
    }

    /// Empties the buffer and moves the write index back to the start.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Returns the stored bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of stored bytes, which is also the write index.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` once the write index has reached the capacity.
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for MessageBuffer<N> {
    /// Returns a new, empty `MessageBuffer`.
    fn default() -> Self {
        Self::new()
    }
}
