//! Status hooks, typically wired to the adapter LEDs.

/// Notified by the bridge on bus and traffic events. All hooks default to no-op.
pub trait ActivityIndicator {
    fn bus_opened(&mut self) {}
    fn bus_closed(&mut self) {}
    /// Bitrate, mode or retransmission setting accepted.
    fn config_changed(&mut self) {}
    /// Frames handed to transmit mailboxes during one poll.
    fn frame_transmitted(&mut self) {}
    /// Frame pulled from the receive FIFO.
    fn frame_received(&mut self) {}
}

/// No indicator attached.
impl ActivityIndicator for () {}
