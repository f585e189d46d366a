//! Data contract shared by the codec, the line reassembler and the host
//! transmit path: a fixed-capacity byte line with no heap behind it.

/// Line terminator used in both directions (carriage return).
pub const LINE_TERMINATOR: u8 = b'\r';

/// Longest protocol line accepted from the host, terminator excluded.
/// `T1FFFFFFF81122334455667788` is 26 bytes; the margin absorbs sloppy hosts.
pub const SLCAN_MTU: usize = 30;

/// Bounded ASCII line. Writes past the capacity are refused, never wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBuf<const CAP: usize = SLCAN_MTU> {
    len: usize,
    data: [u8; CAP],
}

impl<const CAP: usize> Default for LineBuf<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> LineBuf<CAP> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            len: 0,
            data: [0; CAP],
        }
    }

    /// Number of valid bytes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == CAP
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Reset the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append one byte. Returns `false` (and stores nothing) when full.
    #[inline]
    pub fn push(&mut self, byte: u8) -> bool {
        if self.len == CAP {
            return false;
        }
        self.data[self.len] = byte;
        self.len += 1;
        true
    }

    /// Append a whole slice, or nothing at all when it does not fit.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> bool {
        let end = self.len + bytes.len();
        if end > CAP {
            return false;
        }
        self.data[self.len..end].copy_from_slice(bytes);
        self.len = end;
        true
    }

    /// Replace the content with `slice`, clamped to the capacity.
    #[inline]
    pub fn copy_from_slice(&mut self, slice: &[u8]) {
        let clamped = slice.len().min(CAP);
        self.data[..clamped].copy_from_slice(&slice[..clamped]);
        self.len = clamped;
    }

    /// Immutable view over the populated bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

impl<const CAP: usize> core::fmt::Write for LineBuf<CAP> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if self.extend_from_slice(s.as_bytes()) {
            Ok(())
        } else {
            Err(core::fmt::Error)
        }
    }
}

#[cfg(feature = "defmt")]
impl<const CAP: usize> defmt::Format for LineBuf<CAP> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=[u8]:a}", self.as_slice())
    }
}
