//! Bridge transport layer: CAN frame model, identifier helpers, bus
//! configuration values, and the collaborator traits.
//!
//! ## Host link timing and sizing constants
//!
//! These constants size the USB side of the bridge. They follow the USB
//! full-speed CDC bulk endpoint used by common SLCAN adapters.

pub mod bus_config;
pub mod can_frame;
pub mod can_id;
pub mod traits;

/// Size of one USB full-speed bulk OUT packet, and of each receive slot.
pub const RX_BUF_SIZE: usize = 64;

/// Number of receive slots between the USB interrupt and the foreground loop.
///
/// One slot always stays reserved, so `NUM_RX_BUFS - 1` packets can wait.
pub const NUM_RX_BUFS: usize = 6;

/// Capacity of the single host-bound transmit buffer (one bulk IN packet).
pub const HOST_TX_BUF_SIZE: usize = 64;

/// Longest wait for the previous host transfer to complete (ms).
///
/// A full-speed bulk packet takes well under a millisecond when the host is
/// polling. Ten milliseconds means the host stopped reading; waiting longer
/// would stall the CAN side for nothing.
pub const HOST_TX_TIMEOUT_MS: u64 = 10;

/// Default Transmit Queue capacity (one slot reserved).
pub const TX_QUEUE_LEN: usize = 28;
