//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (line decoding, frame
//! construction, queue capacity, host transmission, bus control).
use thiserror_no_std::Error;

//==================================================================================DECODE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Reasons a host line cannot be turned into a [`Command`](crate::protocol::slcan::Command).
pub enum DecodeError {
    /// Line holds no byte at all.
    #[error("Empty line")]
    Empty,
    /// Leading byte does not name any known command.
    #[error("Unknown command byte {0:#04x}")]
    UnknownCommand(u8),
    /// A numeric field holds a byte outside `[0-9a-fA-F]`.
    #[error("Invalid hex digit {byte:#04x} at position {position}")]
    InvalidHexDigit { byte: u8, position: usize },
    /// Line ends before every field was read.
    #[error("Truncated line: {asked} more bytes required, {available} available")]
    Truncated { asked: usize, available: usize },
    /// Bytes remain after the last field of the command.
    #[error("Unexpected trailing data at position {position}")]
    TrailingData { position: usize },
    /// Data length digit above the classic CAN maximum.
    #[error("Data length {0} exceeds 8")]
    LengthOutOfRange(u8),
    /// Identifier does not fit the 11-bit or 29-bit range.
    #[error("Identifier {0:#x} out of range")]
    IdOutOfRange(u32),
}

//==================================================================================FRAME_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while building a [`CanFrame`](crate::protocol::transport::can_frame::CanFrame).
pub enum FrameError {
    /// Requested data length above 8 bytes.
    #[error("Invalid data length {0}")]
    InvalidDlc(usize),
    /// Raw identifier outside the selected format range.
    #[error("Invalid identifier {0:#x}")]
    InvalidId(u32),
}

impl From<FrameError> for DecodeError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::InvalidDlc(dlc) => DecodeError::LengthOutOfRange(dlc as u8),
            FrameError::InvalidId(id) => DecodeError::IdOutOfRange(id),
        }
    }
}

//==================================================================================QUEUE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Capacity failures of the bounded rings.
pub enum QueueError {
    /// Every usable slot is taken; the newest unit of work was not stored.
    #[error("Queue overflow")]
    Overflow,
}

//==================================================================================HOST_TX_ERROR
#[derive(Error, Debug)]
/// Failures while sending a line back to the host.
pub enum HostTxError<E: core::fmt::Debug> {
    /// Previous transfer still in flight when the wait deadline passed.
    #[error("Host link busy")]
    Busy,
    /// Message larger than the transmit buffer; nothing was sent.
    #[error("Message too long: {len} bytes, capacity {capacity}")]
    TooLong { len: usize, capacity: usize },
    /// Link collaborator refused the transfer.
    #[error("Host link error: {0:?}")]
    Link(E),
}

//==================================================================================BUS_ERROR
#[derive(Error, Debug)]
/// Failures reported by the CAN driver while changing bus state.
pub enum BusError<E: core::fmt::Debug> {
    /// Driver rejected `init`, `start` or `reset`.
    #[error("CAN driver error: {0:?}")]
    Driver(E),
}
