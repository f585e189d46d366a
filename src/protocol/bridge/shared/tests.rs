use super::*;

#[test]
/// A lost packet is visible in the error register.
fn test_packet_overflow_reported() {
    let shared: BridgeShared<2> = BridgeShared::new();
    shared.on_packet_received(b"O\r");
    assert_eq!(shared.errors.bits(), 0);

    shared.on_packet_received(b"C\r");
    assert!(shared.errors.is_set(ErrorCode::UsbRxFull));
    assert_eq!(shared.host_rx.drain_one().unwrap().as_slice(), b"O\r");
}

#[test]
/// Completion and FIFO overrun callbacks reach their targets.
fn test_interrupt_callbacks() {
    let shared: BridgeShared = BridgeShared::new();
    shared.host_tx.mark_busy();
    shared.on_transmit_complete();
    assert!(!shared.host_tx.is_busy());

    shared.on_rx_fifo_overflow();
    assert_eq!(shared.errors.bits(), ErrorCode::CanRxFifoOverflow.mask());
}
