//! Bitrate lookup table checks.
use super::*;

#[test]
/// Every selector maps back to its own index.
fn test_index_roundtrip() {
    for index in 0..=8u8 {
        assert_eq!(Bitrate::from_index(index).index(), index);
    }
}

#[test]
/// Out-of-table selectors fall back to the fastest rate.
fn test_out_of_range_selects_fastest() {
    assert_eq!(Bitrate::from_index(9), Bitrate::Rate1000k);
    assert_eq!(Bitrate::from_index(0xF), Bitrate::Rate1000k);
}

#[test]
/// Prescaler times quanta per bit always lands on 48 MHz.
fn test_prescaler_table_matches_clock() {
    for index in 0..=8u8 {
        let rate = Bitrate::from_index(index);
        let timing = rate.timing();
        let quanta = 1 + timing.bs1 as u32 + timing.bs2 as u32;
        assert_eq!(
            timing.prescaler as u32 * quanta * rate.kbps() as u32 * 1_000,
            48_000_000,
            "{rate:?}"
        );
    }
}

#[test]
/// Selector 1 is 20 kbit/s.
fn test_twenty_kbit() {
    assert_eq!(Bitrate::from_index(1).kbps(), 20);
    assert_eq!(Bitrate::from_index(1).prescaler(), 300);
}

#[test]
/// Power-on defaults.
fn test_default_config() {
    let config = BusConfig::default();
    assert_eq!(config.bitrate, Bitrate::Rate125k);
    assert_eq!(config.mode, OperatingMode::Normal);
    assert!(config.auto_retransmit);
    assert_eq!(config.timing().prescaler, 48);
    assert_eq!(BusState::default(), BusState::Down);
}
