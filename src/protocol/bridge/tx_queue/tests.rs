//! FIFO order, capacity and driver handoff of the Transmit Queue.
use super::*;
use crate::protocol::transport::bus_config::{AcceptanceFilter, BusConfig};
use embedded_can::StandardId;

fn frame(id: u16) -> CanFrame {
    CanFrame::data_frame(StandardId::new(id).unwrap(), &[id as u8]).unwrap()
}

/// Driver double with a fixed mailbox count that can refuse chosen frames.
struct Mailboxes {
    free: usize,
    sent: [u16; 16],
    sent_len: usize,
    refuse_id: Option<u32>,
}

impl Mailboxes {
    fn new(free: usize) -> Self {
        Self {
            free,
            sent: [0; 16],
            sent_len: 0,
            refuse_id: None,
        }
    }

    fn sent(&self) -> &[u16] {
        &self.sent[..self.sent_len]
    }
}

impl CanDriver for Mailboxes {
    type Error = ();

    fn configure_filter(&mut self, _filter: &AcceptanceFilter) -> Result<(), ()> {
        Ok(())
    }
    fn init(&mut self, _config: &BusConfig) -> Result<(), ()> {
        Ok(())
    }
    fn start(&mut self) -> Result<(), ()> {
        Ok(())
    }
    fn reset(&mut self) -> Result<(), ()> {
        Ok(())
    }
    fn free_transmit_slots(&self) -> usize {
        self.free
    }
    fn transmit(&mut self, frame: &CanFrame) -> Result<(), ()> {
        self.free -= 1;
        if self.refuse_id == Some(frame.raw_id()) {
            return Err(());
        }
        self.sent[self.sent_len] = frame.raw_id() as u16;
        self.sent_len += 1;
        Ok(())
    }
    fn receive_pending(&self) -> bool {
        false
    }
    fn receive(&mut self) -> Result<CanFrame, ()> {
        Err(())
    }
}

#[test]
/// Capacity 8 keeps one slot free: seven enqueues fit, the rest overflow.
fn test_capacity_eight_holds_seven() {
    let mut queue: TransmitQueue<8> = TransmitQueue::new();
    for attempt in 0..19u16 {
        let result = queue.enqueue(frame(attempt));
        if attempt < 7 {
            assert_eq!(result, Ok(()), "attempt {attempt}");
        } else {
            assert_eq!(result, Err(QueueError::Overflow), "attempt {attempt}");
        }
    }
    assert_eq!(queue.len(), 7);

    // Rejected frames left no trace: content is still 0..7 in order.
    for expected in 0..7u16 {
        assert_eq!(queue.dequeue_if_capacity(true), Some(frame(expected)));
    }
    assert!(queue.is_empty());
}

#[test]
/// One dequeue frees exactly one slot.
fn test_overflow_until_dequeue() {
    let mut queue: TransmitQueue<4> = TransmitQueue::new();
    for id in 0..3 {
        queue.enqueue(frame(id)).unwrap();
    }
    assert!(queue.is_full());
    assert_eq!(queue.enqueue(frame(9)), Err(QueueError::Overflow));
    assert_eq!(queue.dequeue_if_capacity(true), Some(frame(0)));
    assert_eq!(queue.enqueue(frame(9)), Ok(()));
    assert_eq!(queue.enqueue(frame(10)), Err(QueueError::Overflow));
}

#[test]
/// No capacity, no dequeue.
fn test_dequeue_requires_capacity() {
    let mut queue: TransmitQueue<4> = TransmitQueue::new();
    queue.enqueue(frame(1)).unwrap();
    assert_eq!(queue.dequeue_if_capacity(false), None);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.dequeue_if_capacity(true), Some(frame(1)));
    assert_eq!(queue.dequeue_if_capacity(true), None);
}

#[test]
/// Order survives interleaved pushes and pops across wraparound.
fn test_fifo_across_wraparound() {
    let mut queue: TransmitQueue<3> = TransmitQueue::new();
    let mut next_in = 0u16;
    let mut next_out = 0u16;
    for _ in 0..10 {
        queue.enqueue(frame(next_in)).unwrap();
        next_in += 1;
        queue.enqueue(frame(next_in)).unwrap();
        next_in += 1;
        for _ in 0..2 {
            assert_eq!(queue.dequeue_if_capacity(true), Some(frame(next_out)));
            next_out += 1;
        }
    }
}

#[test]
/// Service drains as many frames as there are free mailboxes.
fn test_service_respects_mailboxes() {
    let mut queue: TransmitQueue<8> = TransmitQueue::new();
    for id in 0..5 {
        queue.enqueue(frame(id)).unwrap();
    }
    let errors = ErrorRegister::new();
    let mut driver = Mailboxes::new(3);

    assert_eq!(queue.service(&mut driver, &errors), 3);
    assert_eq!(driver.sent(), &[0, 1, 2]);
    assert_eq!(queue.len(), 2);

    driver.free = 3;
    assert_eq!(queue.service(&mut driver, &errors), 2);
    assert_eq!(driver.sent(), &[0, 1, 2, 3, 4]);
    assert!(queue.is_empty());
    assert_eq!(errors.bits(), 0);
}

#[test]
/// A refused frame is reported and not retried.
fn test_service_failure_not_requeued() {
    let mut queue: TransmitQueue<8> = TransmitQueue::new();
    for id in 0..3 {
        queue.enqueue(frame(id)).unwrap();
    }
    let errors = ErrorRegister::new();
    let mut driver = Mailboxes::new(3);
    driver.refuse_id = Some(1);

    assert_eq!(queue.service(&mut driver, &errors), 3);
    assert_eq!(driver.sent(), &[0, 2]);
    assert!(queue.is_empty());
    assert!(errors.is_set(ErrorCode::CanTxFail));
}

#[test]
/// Clearing empties the queue and makes room again.
fn test_clear() {
    let mut queue: TransmitQueue<3> = TransmitQueue::new();
    queue.enqueue(frame(1)).unwrap();
    queue.enqueue(frame(2)).unwrap();
    queue.clear();
    assert!(queue.is_empty());
    queue.enqueue(frame(3)).unwrap();
    assert_eq!(queue.dequeue_if_capacity(true), Some(frame(3)));
}
