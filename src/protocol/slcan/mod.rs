//! SLCAN text codec: host lines into typed commands, CAN frames into lines.
//!
//! | Leading byte | Command | Payload |
//! |---|---|---|
//! | `O` / `C` | open / close bus | none |
//! | `S` | set bitrate | 1 digit selector |
//! | `M` `m` | set mode | 1 digit, `1` = silent |
//! | `A` `a` | set autoretransmit | 1 digit, `1` = enabled |
//! | `V` / `E` | report version / error register | none |
//! | `t` `r` | standard data / remote frame | 3 (or 4) id digits, dlc, data |
//! | `T` `R` | extended data / remote frame | 8 id digits, dlc, data |
//!
//! Both functions are pure. The terminator is never part of a decoded line.
//!
//! Standard identifiers are written with 3 digits and read with 3 or 4. The
//! width comes from the line length parity (`1 + width + 1 + 2 * dlc`), so a
//! 4-digit line carrying one stray trailing digit reads as a different, valid
//! 3-digit frame: `t01232AFF00` is id `0x012`, dlc 3, data `2A FF 00`.
use core::fmt::Write;

use crate::core::{LineBuf, LINE_TERMINATOR};
use crate::error::DecodeError;
use crate::infra::codec::hex::{HexReader, HexWriter};
use crate::protocol::transport::bus_config::{Bitrate, OperatingMode};
use crate::protocol::transport::can_frame::{CanFrame, MAX_DATA_LEN};
use crate::protocol::transport::HOST_TX_BUF_SIZE;

/// Hex digits of a standard identifier on output.
pub const STD_ID_DIGITS: usize = 3;
/// Alternative zero-padded standard identifier width accepted on input.
pub const STD_ID_DIGITS_WIDE: usize = 4;
/// Hex digits of an extended identifier.
pub const EXT_ID_DIGITS: usize = 8;

/// Prefix of the `E` command response.
pub const ERROR_REPORT_PREFIX: &str = "Error Register: ";

/// Default identity reported by `V`.
pub const FIRMWARE_VERSION: &str = concat!("korri-slcan v", env!("CARGO_PKG_VERSION"));

/// Decoded host request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Open,
    Close,
    SetBitrate(Bitrate),
    SetMode(OperatingMode),
    SetAutoRetransmit(bool),
    ReportVersion,
    ReportErrorRegister,
    Transmit(CanFrame),
}

//==================================================================================DECODE
/// Parse one line (terminator already stripped).
///
/// Either the whole line is valid and a command is returned, or nothing is.
pub fn decode_line(line: &[u8]) -> Result<Command, DecodeError> {
    let (&tag, _) = line.split_first().ok_or(DecodeError::Empty)?;

    match tag {
        b'O' => bare(line, Command::Open),
        b'C' => bare(line, Command::Close),
        b'V' => bare(line, Command::ReportVersion),
        b'E' => bare(line, Command::ReportErrorRegister),
        b'S' => single_digit(line).map(|d| Command::SetBitrate(Bitrate::from_index(d))),
        b'M' | b'm' => single_digit(line).map(|d| {
            Command::SetMode(if d == 1 {
                OperatingMode::Silent
            } else {
                OperatingMode::Normal
            })
        }),
        b'A' | b'a' => single_digit(line).map(|d| Command::SetAutoRetransmit(d == 1)),
        b't' => decode_frame(line, false, false).map(Command::Transmit),
        b'T' => decode_frame(line, true, false).map(Command::Transmit),
        b'r' => decode_frame(line, false, true).map(Command::Transmit),
        b'R' => decode_frame(line, true, true).map(Command::Transmit),
        other => Err(DecodeError::UnknownCommand(other)),
    }
}

/// Command without payload.
fn bare(line: &[u8], command: Command) -> Result<Command, DecodeError> {
    HexReader::new(line, 1).finish()?;
    Ok(command)
}

/// Command followed by exactly one hex digit.
fn single_digit(line: &[u8]) -> Result<u8, DecodeError> {
    let mut reader = HexReader::new(line, 1);
    let digit = reader.read_nibble()?;
    reader.finish()?;
    Ok(digit)
}

/// Width of a standard identifier field.
///
/// A standard line is `1 + width + 1 + 2 * dlc` bytes long, so an odd length
/// means three digits and an even one means four.
fn standard_id_digits(line: &[u8]) -> usize {
    if line.len() % 2 == 1 {
        STD_ID_DIGITS
    } else {
        STD_ID_DIGITS_WIDE
    }
}

fn decode_frame(line: &[u8], extended: bool, remote: bool) -> Result<CanFrame, DecodeError> {
    let id_digits = if extended {
        EXT_ID_DIGITS
    } else {
        standard_id_digits(line)
    };

    let mut reader = HexReader::new(line, 1);
    let raw_id = reader.read_digits(id_digits)?;

    let dlc = reader.read_nibble()?;
    if dlc as usize > MAX_DATA_LEN {
        return Err(DecodeError::LengthOutOfRange(dlc));
    }

    let mut data = [0u8; MAX_DATA_LEN];
    if !remote {
        for byte in data.iter_mut().take(dlc as usize) {
            *byte = reader.read_byte()?;
        }
    }
    reader.finish()?;

    let payload = if remote { &[][..] } else { &data[..dlc as usize] };
    Ok(CanFrame::from_raw(
        raw_id,
        extended,
        remote,
        payload,
        dlc as usize,
    )?)
}

//==================================================================================ENCODE
/// Serialize a frame into its line, terminator included.
pub fn encode_frame(frame: &CanFrame) -> LineBuf {
    let mut line = LineBuf::new();
    encode_frame_into(frame, &mut line);
    line
}

/// Append the line for `frame` to `out`. Returns `false` when it does not fit.
pub fn encode_frame_into<const CAP: usize>(frame: &CanFrame, out: &mut LineBuf<CAP>) -> bool {
    let (tag, id_digits) = match (frame.is_remote(), frame.is_extended()) {
        (false, false) => (b't', STD_ID_DIGITS),
        (true, false) => (b'r', STD_ID_DIGITS),
        (false, true) => (b'T', EXT_ID_DIGITS),
        (true, true) => (b'R', EXT_ID_DIGITS),
    };

    let mut writer = HexWriter::new(out);
    let mut ok = writer.put_raw(tag)
        && writer.put_digits(frame.raw_id(), id_digits)
        && writer.put_digits(frame.dlc() as u32, 1);
    for &byte in frame.data() {
        ok = ok && writer.put_byte(byte);
    }
    ok && writer.put_raw(LINE_TERMINATOR)
}

/// Serialize a command the way a host would send it, terminator included.
#[cfg(test)]
pub(crate) fn encode_command(command: &Command) -> LineBuf {
    let mut line = LineBuf::new();
    let mut writer = HexWriter::new(&mut line);
    match command {
        Command::Open => writer.put_raw(b'O'),
        Command::Close => writer.put_raw(b'C'),
        Command::ReportVersion => writer.put_raw(b'V'),
        Command::ReportErrorRegister => writer.put_raw(b'E'),
        Command::SetBitrate(rate) => {
            writer.put_raw(b'S') && writer.put_digits(rate.index() as u32, 1)
        }
        Command::SetMode(mode) => {
            writer.put_raw(b'M') && writer.put_digits((*mode == OperatingMode::Silent) as u32, 1)
        }
        Command::SetAutoRetransmit(enabled) => {
            writer.put_raw(b'A') && writer.put_digits(*enabled as u32, 1)
        }
        Command::Transmit(frame) => return encode_frame(frame),
    };
    line.push(LINE_TERMINATOR);
    line
}

/// `E` response: error bitmask in uppercase hex.
pub fn encode_error_register(bits: u32) -> LineBuf {
    let mut line = LineBuf::new();
    // 16 + 8 + 1 bytes always fit in SLCAN_MTU.
    let _ = write!(line, "{ERROR_REPORT_PREFIX}{bits:X}\r");
    line
}

/// `V` response: identity string plus terminator, `None` when it cannot fit
/// in one host packet.
pub fn encode_version(version: &str) -> Option<LineBuf<HOST_TX_BUF_SIZE>> {
    let mut line = LineBuf::new();
    (line.extend_from_slice(version.as_bytes()) && line.push(LINE_TERMINATOR)).then_some(line)
}
