//! Text codec primitives: ASCII hex nibbles in and out of line buffers.
pub mod hex;
