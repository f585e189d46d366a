//! Protocol-agnostic building blocks reused by the SLCAN layer.
pub mod codec;
pub mod ring;
