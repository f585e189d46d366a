//! Minimal abstraction of a CAN peripheral driver. Register sequencing stays
//! in the implementation; the bridge only sees these request primitives.
use crate::protocol::transport::bus_config::{AcceptanceFilter, BusConfig};
use crate::protocol::transport::can_frame::CanFrame;

/// Contract between the bridge and a CAN controller driver.
pub trait CanDriver {
    type Error: core::fmt::Debug;

    /// Program a receive acceptance filter. Called once at start-up.
    fn configure_filter(&mut self, filter: &AcceptanceFilter) -> Result<(), Self::Error>;
    /// Apply timing, mode and retransmission policy. Peripheral stays stopped.
    fn init(&mut self, config: &BusConfig) -> Result<(), Self::Error>;
    /// Leave initialization mode and join the bus.
    fn start(&mut self) -> Result<(), Self::Error>;
    /// Reset the peripheral, dropping off the bus.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Hardware transmit mailboxes currently free.
    fn free_transmit_slots(&self) -> usize;
    /// Hand one frame to a free mailbox.
    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error>;

    /// `true` when the receive FIFO holds at least one frame.
    fn receive_pending(&self) -> bool;
    /// Pop the oldest frame from the receive FIFO.
    fn receive(&mut self) -> Result<CanFrame, Self::Error>;
}
