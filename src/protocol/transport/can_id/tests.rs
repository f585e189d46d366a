//! Unit tests for identifier conversions.
use super::*;

#[test]
/// Upper bounds of both formats are accepted.
fn test_range_limits() {
    assert!(id_from_raw(MAX_STANDARD_ID, false).is_ok());
    assert!(id_from_raw(MAX_EXTENDED_ID, true).is_ok());
}

#[test]
/// One past the bound is rejected with the offending value.
fn test_out_of_range() {
    assert_eq!(
        id_from_raw(0x800, false),
        Err(FrameError::InvalidId(0x800))
    );
    assert_eq!(
        id_from_raw(0x2000_0000, true),
        Err(FrameError::InvalidId(0x2000_0000))
    );
    // Wider than u16 must not be truncated into range.
    assert_eq!(
        id_from_raw(0x1_0123, false),
        Err(FrameError::InvalidId(0x1_0123))
    );
}

#[test]
/// Raw value and format survive the conversion.
fn test_raw_roundtrip() {
    let std = id_from_raw(0x123, false).unwrap();
    assert_eq!(raw_id(&std), 0x123);
    assert!(!is_extended(&std));

    let ext = id_from_raw(0x0ABC_DEF0, true).unwrap();
    assert_eq!(raw_id(&ext), 0x0ABC_DEF0);
    assert!(is_extended(&ext));
}
