//! Outbound half of the USB serial channel.

/// Starts a bulk IN transfer towards the host.
///
/// Completion is reported asynchronously by the USB interrupt through
/// [`BridgeShared::on_transmit_complete`](crate::protocol::bridge::shared::BridgeShared::on_transmit_complete).
/// The bytes may be referenced until then; the host transmit path keeps
/// its buffer untouched while a transfer is in flight.
pub trait HostLink {
    type Error: core::fmt::Debug;

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}
