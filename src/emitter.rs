//! Byte emission.
//!
//! This module defines the `Emitter`, an append-only output buffer that the
//! image builder drives to produce the final byte sequence. It accumulates
//! bytes in emission order and never interprets their content.

/// An append-only buffer for emitting little-endian binary data.
pub struct Emitter {
    output: Vec<u8>,
}

impl Emitter {
    pub fn new() -> Self {
        Self { output: Vec::new() }
    }

    /// Appends the given bytes verbatim, in order.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    /// Encodes `value` as `width` bytes, least-significant byte first, and
    /// appends them.
    ///
    /// Values that do not fit in `width` bytes are silently truncated to the
    /// low-order bytes. The format only ever needs widths of 1, 2, 4, or 8.
    pub fn write_int(&mut self, width: usize, value: u64) {
        debug_assert!(width <= 8, "field width {width} exceeds 8 bytes");
        for i in 0..width {
            self.output.push((value >> (i * 8)) as u8);
        }
    }

    /// The accumulated bytes so far. Does not reset internal state.
    pub fn bytes(&self) -> &[u8] {
        &self.output
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Consumes the emitter, yielding the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.output
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
