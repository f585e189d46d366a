//! Transmit Queue: bounded FIFO of frames waiting for a hardware mailbox.
//!
//! Producer and consumer are both the foreground loop, so no locking is
//! involved. Frames leave the queue exactly once: a driver refusal is
//! reported, never requeued, to keep bus order intact.
use crate::error::QueueError;
use crate::infra::ring::RingIndex;
use crate::protocol::bridge::diagnostics::{ErrorCode, ErrorRegister};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::can_driver::CanDriver;
use crate::protocol::transport::TX_QUEUE_LEN;

/// FIFO with `C` slots, `C - 1` usable.
#[derive(Debug, Clone)]
pub struct TransmitQueue<const C: usize = TX_QUEUE_LEN> {
    slots: [Option<CanFrame>; C],
    index: RingIndex<C>,
}

impl<const C: usize> Default for TransmitQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const C: usize> TransmitQueue<C> {
    pub const fn new() -> Self {
        Self {
            slots: [None; C],
            index: RingIndex::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.index.is_full()
    }

    /// Append `frame`. A full queue is left untouched.
    pub fn enqueue(&mut self, frame: CanFrame) -> Result<(), QueueError> {
        if self.index.is_full() {
            return Err(QueueError::Overflow);
        }
        self.slots[self.index.head()] = Some(frame);
        self.index.advance_head();
        Ok(())
    }

    /// Pop the oldest frame, but only when the hardware has room for it.
    pub fn dequeue_if_capacity(&mut self, has_capacity: bool) -> Option<CanFrame> {
        if !has_capacity || self.index.is_empty() {
            return None;
        }
        let frame = self.slots[self.index.tail()].take();
        self.index.advance_tail();
        frame
    }

    /// Drop every waiting frame.
    pub fn clear(&mut self) {
        while self.dequeue_if_capacity(true).is_some() {}
    }

    /// Hand frames to `driver` while it reports free mailboxes.
    ///
    /// Returns the number of frames taken off the queue, failed ones included.
    pub fn service<D: CanDriver>(&mut self, driver: &mut D, errors: &ErrorRegister) -> usize {
        let mut handed = 0;
        while let Some(frame) = self.dequeue_if_capacity(driver.free_transmit_slots() > 0) {
            handed += 1;
            if let Err(_err) = driver.transmit(&frame) {
                #[cfg(feature = "defmt")]
                defmt::error!(
                    "transmit of {} failed: {}",
                    frame,
                    defmt::Debug2Format(&_err)
                );
                errors.report(ErrorCode::CanTxFail);
            }
        }
        handed
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
