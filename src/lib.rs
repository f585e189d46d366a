//! `korri-slcan` library: the translation and queuing core of a USB-to-CAN
//! bridge in a `no_std` environment. Host ASCII lines (SLCAN) are decoded into
//! bus commands or CAN frames, received CAN frames are encoded back into
//! lines, and bounded queues decouple the USB interrupt, the CAN interrupt and
//! the cooperative foreground loop.
#![no_std]
//==================================================================================
/// Fixed-capacity line buffer and protocol-wide constants.
pub mod core;
/// Decoding, capacity, host-link and bus errors.
pub mod error;
/// Generic building blocks: hex nibble codec and ring index discipline.
pub mod infra;
/// SLCAN codec, frame model, collaborator traits and the bridge components.
pub mod protocol;
//==================================================================================
