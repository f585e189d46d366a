//! Host Transmit Path: one outbound buffer, at most one transfer in flight.
//!
//! The busy flag is set by the foreground right before a transfer starts and
//! cleared by the USB completion interrupt. A plain atomic load/store is
//! enough: each side only ever writes one value.
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_time::Duration;

use crate::error::HostTxError;
use crate::protocol::bridge::diagnostics::{ErrorCode, ErrorRegister};
use crate::protocol::transport::traits::clock::MonotonicClock;
use crate::protocol::transport::traits::host_link::HostLink;
use crate::protocol::transport::{HOST_TX_BUF_SIZE, HOST_TX_TIMEOUT_MS};

/// Busy flag shared with the USB completion interrupt.
#[derive(Debug, Default)]
pub struct HostTxState {
    busy: AtomicBool,
}

impl HostTxState {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    #[inline]
    pub fn mark_busy(&self) {
        self.busy.store(true, Ordering::Release);
    }

    /// Transfer finished. Called from the USB interrupt.
    #[inline]
    pub fn notify_complete(&self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Outbound buffer owned by the foreground.
#[derive(Debug)]
pub struct HostTransmitPath {
    buf: [u8; HOST_TX_BUF_SIZE],
    timeout: Duration,
}

impl Default for HostTransmitPath {
    fn default() -> Self {
        Self::new()
    }
}

impl HostTransmitPath {
    pub const fn new() -> Self {
        Self {
            buf: [0; HOST_TX_BUF_SIZE],
            timeout: Duration::from_millis(HOST_TX_TIMEOUT_MS),
        }
    }

    /// Same path with a custom busy-wait bound.
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            buf: [0; HOST_TX_BUF_SIZE],
            timeout,
        }
    }

    /// Send `bytes` to the host.
    ///
    /// Spins while the previous transfer is in flight, up to the timeout;
    /// past it the message is dropped and `UsbTxBusy` reported. Messages
    /// larger than the buffer are refused without touching the link.
    pub fn send<L: HostLink, K: MonotonicClock>(
        &mut self,
        link: &mut L,
        clock: &K,
        state: &HostTxState,
        errors: &ErrorRegister,
        bytes: &[u8],
    ) -> Result<(), HostTxError<L::Error>> {
        if state.is_busy() {
            let deadline = clock.now() + self.timeout;
            while state.is_busy() {
                if clock.now() >= deadline {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("host link still busy, {} bytes dropped", bytes.len());
                    errors.report(ErrorCode::UsbTxBusy);
                    return Err(HostTxError::Busy);
                }
                core::hint::spin_loop();
            }
        }

        if bytes.len() > self.buf.len() {
            return Err(HostTxError::TooLong {
                len: bytes.len(),
                capacity: self.buf.len(),
            });
        }

        let len = bytes.len();
        self.buf[..len].copy_from_slice(bytes);
        state.mark_busy();
        link.send(&self.buf[..len]).map_err(|err| {
            state.notify_complete();
            HostTxError::Link(err)
        })
    }
}
