//! Line Reassembler: turns the host byte stream into CR-delimited lines.
//!
//! Lines may straddle USB packets, so the accumulator persists between
//! packets. A line longer than the accumulator is discarded as a whole.
use crate::core::{LineBuf, LINE_TERMINATOR, SLCAN_MTU};

#[derive(Debug, PartialEq, Eq)]
pub enum LineEvent<const MTU: usize = SLCAN_MTU> {
    /// Byte stored, line not finished yet.
    Pending,
    /// Terminator seen; the line without terminator.
    Complete(LineBuf<MTU>),
    /// Accumulator was full. The partial line and this byte were dropped.
    Overflow,
}

/// Accumulator owned by the foreground loop.
#[derive(Debug, Default)]
pub struct LineReassembler<const MTU: usize = SLCAN_MTU> {
    line: LineBuf<MTU>,
}

impl<const MTU: usize> LineReassembler<MTU> {
    pub const fn new() -> Self {
        Self {
            line: LineBuf::new(),
        }
    }

    /// Bytes of the unfinished line.
    pub fn pending(&self) -> &[u8] {
        self.line.as_slice()
    }

    /// Process one byte.
    pub fn push_byte(&mut self, byte: u8) -> LineEvent<MTU> {
        if byte == LINE_TERMINATOR {
            let line = self.line;
            self.line.clear();
            return LineEvent::Complete(line);
        }
        if self.line.push(byte) {
            LineEvent::Pending
        } else {
            self.line.clear();
            LineEvent::Overflow
        }
    }

    /// Iterate over the completed lines and overflows produced by `bytes`.
    #[cfg(test)]
    pub(crate) fn feed<'a>(&'a mut self, bytes: &'a [u8]) -> Feed<'a, MTU> {
        Feed {
            reassembler: self,
            bytes: bytes.iter(),
        }
    }
}

/// Iterator returned by [`LineReassembler::feed`]. Never yields `Pending`.
#[cfg(test)]
pub(crate) struct Feed<'a, const MTU: usize> {
    reassembler: &'a mut LineReassembler<MTU>,
    bytes: core::slice::Iter<'a, u8>,
}

#[cfg(test)]
impl<const MTU: usize> Iterator for Feed<'_, MTU> {
    type Item = LineEvent<MTU>;

    fn next(&mut self) -> Option<Self::Item> {
        for &byte in self.bytes.by_ref() {
            match self.reassembler.push_byte(byte) {
                LineEvent::Pending => continue,
                event => return Some(event),
            }
        }
        None
    }
}
