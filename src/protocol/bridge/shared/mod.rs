//! State reachable from interrupt handlers.
//!
//! A single `BridgeShared` is typically placed in a `static` and handed to
//! both the USB/CAN interrupt handlers and the foreground [`Bridge`].
//!
//! [`Bridge`]: crate::protocol::bridge::scheduler::Bridge
use crate::protocol::bridge::diagnostics::{ErrorCode, ErrorRegister};
use crate::protocol::bridge::host_rx::HostRxBuffer;
use crate::protocol::bridge::host_tx::HostTxState;
use crate::protocol::transport::NUM_RX_BUFS;

pub struct BridgeShared<const N: usize = NUM_RX_BUFS> {
    pub host_rx: HostRxBuffer<N>,
    pub host_tx: HostTxState,
    pub errors: ErrorRegister,
}

impl<const N: usize> Default for BridgeShared<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BridgeShared<N> {
    pub const fn new() -> Self {
        Self {
            host_rx: HostRxBuffer::new(),
            host_tx: HostTxState::new(),
            errors: ErrorRegister::new(),
        }
    }

    /// USB OUT packet received. A full buffer loses the packet.
    pub fn on_packet_received(&self, bytes: &[u8]) {
        if self.host_rx.push(bytes).is_err() {
            self.errors.report(ErrorCode::UsbRxFull);
        }
    }

    /// USB IN transfer completed.
    #[inline]
    pub fn on_transmit_complete(&self) {
        self.host_tx.notify_complete();
    }

    /// CAN receive FIFO overrun signalled by the peripheral.
    #[inline]
    pub fn on_rx_fifo_overflow(&self) {
        self.errors.report(ErrorCode::CanRxFifoOverflow);
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
