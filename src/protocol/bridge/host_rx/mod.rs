//! Host Receive Buffer: ring of USB packet slots between the USB receive
//! interrupt (producer) and the foreground loop (consumer).
//!
//! The slot at `head` is the one the USB peripheral is armed to receive
//! into. A completed packet is published by advancing `head`; when the ring
//! is full the next packet lands in the same, still unpublished, head slot
//! and is lost. Reception never stalls and published packets are never
//! touched.
//!
//! Both sides run inside a short critical section that covers one slot
//! copy plus one index move.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::core::LineBuf;
use crate::error::QueueError;
use crate::infra::ring::RingIndex;
use crate::protocol::transport::{NUM_RX_BUFS, RX_BUF_SIZE};

/// One packet copied out of the ring.
pub type RxPacket = LineBuf<RX_BUF_SIZE>;

struct RxRing<const N: usize> {
    slots: [[u8; RX_BUF_SIZE]; N],
    lens: [usize; N],
    index: RingIndex<N>,
}

/// `N` packet slots, `N - 1` usable.
pub struct HostRxBuffer<const N: usize = NUM_RX_BUFS> {
    ring: Mutex<CriticalSectionRawMutex, RefCell<RxRing<N>>>,
}

impl<const N: usize> Default for HostRxBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> HostRxBuffer<N> {
    pub const fn new() -> Self {
        Self {
            ring: Mutex::new(RefCell::new(RxRing {
                slots: [[0; RX_BUF_SIZE]; N],
                lens: [0; N],
                index: RingIndex::new(),
            })),
        }
    }

    /// Store a received packet. Called from the USB receive interrupt.
    ///
    /// Packets longer than a slot keep their first `RX_BUF_SIZE` bytes.
    /// On overflow the packet overwrites the armed head slot and is not
    /// published.
    pub fn push(&self, bytes: &[u8]) -> Result<(), QueueError> {
        self.ring.lock(|ring| {
            let mut ring = ring.borrow_mut();
            let head = ring.index.head();
            let len = bytes.len().min(RX_BUF_SIZE);
            ring.slots[head][..len].copy_from_slice(&bytes[..len]);
            ring.lens[head] = len;

            if ring.index.advance_head() {
                Ok(())
            } else {
                Err(QueueError::Overflow)
            }
        })
    }

    /// Copy out the oldest packet and release its slot. Foreground only.
    pub fn drain_one(&self) -> Option<RxPacket> {
        self.ring.lock(|ring| {
            let mut ring = ring.borrow_mut();
            if ring.index.is_empty() {
                return None;
            }
            let tail = ring.index.tail();
            let mut packet = RxPacket::new();
            packet.copy_from_slice(&ring.slots[tail][..ring.lens[tail]]);
            ring.index.advance_tail();
            Some(packet)
        })
    }

    /// Packets waiting for the foreground.
    pub fn len(&self) -> usize {
        self.ring.lock(|ring| ring.borrow().index.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(head, tail)` snapshot, head being the slot armed for reception.
    pub fn indices(&self) -> (usize, usize) {
        self.ring.lock(|ring| {
            let ring = ring.borrow();
            (ring.index.head(), ring.index.tail())
        })
    }
}
