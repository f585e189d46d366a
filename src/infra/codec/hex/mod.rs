//! Cursor-based ASCII hex reader and writer.
//! Numeric SLCAN fields are fixed-width runs of hex digits, so the reader
//! consumes an exact digit count and the writer always pads to the width.
use crate::core::LineBuf;
use crate::error::DecodeError;

/// Uppercase digit table used for every outgoing nibble.
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Value of one ASCII hex digit, `None` for anything outside `[0-9a-fA-F]`.
#[inline]
pub fn nibble_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Uppercase ASCII digit for the low nibble of `value`.
#[inline]
pub fn nibble_digit(value: u8) -> u8 {
    HEX_DIGITS[(value & 0x0F) as usize]
}

/// Reads fixed-width hex fields from a line without copying it.
pub struct HexReader<'a> {
    /// Whole line, command byte included, so error positions are absolute.
    line: &'a [u8],
    /// Index of the next byte to consume.
    cursor: usize,
}

impl<'a> HexReader<'a> {
    /// Create a reader positioned at `start` (usually 1, right after the command byte).
    pub fn new(line: &'a [u8], start: usize) -> Self {
        Self {
            line,
            cursor: start.min(line.len()),
        }
    }

    /// Bytes left after the cursor.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.line.len() - self.cursor
    }

    /// Current cursor position.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Read `digits` hex digits (1..=8) as a big-endian value.
    ///
    /// The cursor only moves when the whole field is valid.
    pub fn read_digits(&mut self, digits: usize) -> Result<u32, DecodeError> {
        debug_assert!((1..=8).contains(&digits));
        if self.remaining() < digits {
            return Err(DecodeError::Truncated {
                asked: digits,
                available: self.remaining(),
            });
        }

        let mut value: u32 = 0;
        for (offset, &byte) in self.line[self.cursor..self.cursor + digits]
            .iter()
            .enumerate()
        {
            let nibble = nibble_value(byte).ok_or(DecodeError::InvalidHexDigit {
                byte,
                position: self.cursor + offset,
            })?;
            value = (value << 4) | nibble as u32;
        }
        self.cursor += digits;
        Ok(value)
    }

    /// Read a single hex digit.
    #[inline]
    pub fn read_nibble(&mut self) -> Result<u8, DecodeError> {
        self.read_digits(1).map(|v| v as u8)
    }

    /// Read a two-digit byte (high nibble first).
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        self.read_digits(2).map(|v| v as u8)
    }

    /// Succeeds only when every byte of the line was consumed.
    pub fn finish(&self) -> Result<(), DecodeError> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(DecodeError::TrailingData {
                position: self.cursor,
            })
        }
    }
}

/// Appends uppercase hex fields to a [`LineBuf`].
pub struct HexWriter<'a, const CAP: usize> {
    out: &'a mut LineBuf<CAP>,
}

impl<'a, const CAP: usize> HexWriter<'a, CAP> {
    pub fn new(out: &'a mut LineBuf<CAP>) -> Self {
        Self { out }
    }

    /// Append a raw byte (command tag, terminator).
    #[inline]
    pub fn put_raw(&mut self, byte: u8) -> bool {
        self.out.push(byte)
    }

    /// Append the low `digits` nibbles of `value`, most significant first.
    pub fn put_digits(&mut self, value: u32, digits: usize) -> bool {
        debug_assert!((1..=8).contains(&digits));
        if self.out.len() + digits > self.out.capacity() {
            return false;
        }
        for shift in (0..digits).rev() {
            self.out.push(nibble_digit((value >> (shift * 4)) as u8));
        }
        true
    }

    /// Append one byte as two digits.
    #[inline]
    pub fn put_byte(&mut self, byte: u8) -> bool {
        self.put_digits(byte as u32, 2)
    }
}
