//! Sticky error register read back by the `E` command.
//!
//! Each capacity or hardware failure sets one bit. Bits are never cleared
//! while powered, so the host sees every condition that happened since boot.
use core::cell::Cell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Diagnostic codes, one bit each in the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorCode {
    /// CAN peripheral refused `init`/`start`/`reset`.
    PeripheralInit = 0,
    /// Host transfer still busy after the wait deadline.
    UsbTxBusy = 1,
    /// Driver refused a frame taken from the Transmit Queue.
    CanTxFail = 2,
    /// Hardware receive FIFO overran.
    CanRxFifoOverflow = 3,
    /// Transmit Queue full, frame dropped.
    TxQueueFull = 4,
    /// Host Receive Buffer full, packet dropped.
    UsbRxFull = 5,
    /// Host line longer than the accumulator, line dropped.
    LineOverflow = 6,
}

impl ErrorCode {
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << self as u8
    }
}

/// Error bitmask shared between interrupt and foreground contexts.
pub struct ErrorRegister {
    bits: Mutex<CriticalSectionRawMutex, Cell<u32>>,
}

impl Default for ErrorRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorRegister {
    pub const fn new() -> Self {
        Self {
            bits: Mutex::new(Cell::new(0)),
        }
    }

    /// Record `code`. Safe from any context.
    pub fn report(&self, code: ErrorCode) {
        #[cfg(feature = "defmt")]
        defmt::warn!("error reported: {}", code);
        self.bits.lock(|bits| bits.set(bits.get() | code.mask()));
    }

    /// Current bitmask.
    pub fn bits(&self) -> u32 {
        self.bits.lock(|bits| bits.get())
    }

    pub fn is_set(&self, code: ErrorCode) -> bool {
        self.bits() & code.mask() != 0
    }
}
