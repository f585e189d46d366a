//! Queues, buffers and state machines between the USB link and the CAN bus.
//!
//! Three execution contexts meet here:
//!
//! * the USB interrupt, which pushes received packets and signals transmit
//!   completion through [`shared::BridgeShared`];
//! * the CAN interrupt, which only raises diagnostics (receive FIFO overrun);
//! * the foreground loop, which calls [`scheduler::Bridge::poll`] forever.
//!
//! Everything the interrupts touch lives in `BridgeShared`; every other
//! component is owned by the foreground `Bridge` and needs no locking.
pub mod bus;
pub mod diagnostics;
pub mod host_rx;
pub mod host_tx;
pub mod line;
pub mod scheduler;
pub mod shared;
pub mod tx_queue;
