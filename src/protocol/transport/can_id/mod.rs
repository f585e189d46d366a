//! Conversions between raw identifier values and `embedded_can::Id`.
//! Standard identifiers are 11 bits, extended identifiers 29 bits.
use crate::error::FrameError;
use embedded_can::{ExtendedId, Id, StandardId};

/// Largest standard (11-bit) identifier.
pub const MAX_STANDARD_ID: u32 = 0x7FF;
/// Largest extended (29-bit) identifier.
pub const MAX_EXTENDED_ID: u32 = 0x1FFF_FFFF;

/// Build an identifier from its raw value and format flag.
pub fn id_from_raw(raw: u32, extended: bool) -> Result<Id, FrameError> {
    if extended {
        ExtendedId::new(raw)
            .map(Id::Extended)
            .ok_or(FrameError::InvalidId(raw))
    } else {
        u16::try_from(raw)
            .ok()
            .and_then(StandardId::new)
            .map(Id::Standard)
            .ok_or(FrameError::InvalidId(raw))
    }
}

/// Raw numeric value of an identifier, whatever its format.
pub fn raw_id(id: &Id) -> u32 {
    match id {
        Id::Standard(std) => std.as_raw() as u32,
        Id::Extended(ext) => ext.as_raw(),
    }
}

/// `true` for 29-bit identifiers.
#[inline]
pub fn is_extended(id: &Id) -> bool {
    matches!(id, Id::Extended(_))
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
