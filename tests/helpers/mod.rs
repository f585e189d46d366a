/// Test doubles standing in for the CAN peripheral, the USB link, the clock
/// and the status LEDs during integration tests.
use std::cell::Cell;
use std::collections::VecDeque;

use embassy_time::Instant;
use korri_slcan::protocol::bridge::host_tx::HostTxState;
use korri_slcan::protocol::transport::{
    bus_config::{AcceptanceFilter, BusConfig},
    can_frame::CanFrame,
    traits::{
        activity::ActivityIndicator, can_driver::CanDriver, clock::MonotonicClock,
        host_link::HostLink,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum DriverFault {
    Filter,
    Init,
    Start,
    Reset,
}

/// In-memory CAN controller. Mailboxes empty instantly, so the free slot
/// count only changes when a test sets it.
#[allow(dead_code)]
pub struct MockDriver {
    pub filters: Vec<AcceptanceFilter>,
    pub inits: Vec<BusConfig>,
    pub starts: usize,
    pub resets: usize,
    pub free_slots: usize,
    pub transmitted: Vec<CanFrame>,
    pub incoming: VecDeque<CanFrame>,
    pub fault: Option<DriverFault>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            inits: Vec::new(),
            starts: 0,
            resets: 0,
            free_slots: 3,
            transmitted: Vec::new(),
            incoming: VecDeque::new(),
            fault: None,
        }
    }
}

#[allow(dead_code)]
impl MockDriver {
    /// Lifecycle calls seen so far, filter excluded.
    pub fn lifecycle_calls(&self) -> usize {
        self.inits.len() + self.starts + self.resets
    }

    fn check(&self, step: DriverFault) -> Result<(), DriverFault> {
        if self.fault == Some(step) {
            Err(step)
        } else {
            Ok(())
        }
    }
}

impl CanDriver for MockDriver {
    type Error = DriverFault;

    fn configure_filter(&mut self, filter: &AcceptanceFilter) -> Result<(), Self::Error> {
        self.check(DriverFault::Filter)?;
        self.filters.push(*filter);
        Ok(())
    }

    fn init(&mut self, config: &BusConfig) -> Result<(), Self::Error> {
        self.inits.push(*config);
        self.check(DriverFault::Init)
    }

    fn start(&mut self) -> Result<(), Self::Error> {
        self.starts += 1;
        self.check(DriverFault::Start)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.resets += 1;
        self.check(DriverFault::Reset)
    }

    fn free_transmit_slots(&self) -> usize {
        self.free_slots
    }

    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error> {
        self.transmitted.push(*frame);
        Ok(())
    }

    fn receive_pending(&self) -> bool {
        !self.incoming.is_empty()
    }

    fn receive(&mut self) -> Result<CanFrame, Self::Error> {
        self.incoming.pop_front().ok_or(DriverFault::Start)
    }
}

/// USB link recording every transfer. With `completion` set the transfer
/// finishes immediately, as if the completion interrupt fired.
#[allow(dead_code)]
pub struct MockLink<'a> {
    pub sent: Vec<Vec<u8>>,
    pub completion: Option<&'a HostTxState>,
}

#[allow(dead_code)]
impl<'a> MockLink<'a> {
    pub fn auto_complete(state: &'a HostTxState) -> Self {
        Self {
            sent: Vec::new(),
            completion: Some(state),
        }
    }

    pub fn never_complete() -> Self {
        Self {
            sent: Vec::new(),
            completion: None,
        }
    }

    /// Transfers as text, for readable assertions.
    pub fn lines(&self) -> Vec<String> {
        self.sent
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }
}

impl HostLink for MockLink<'_> {
    type Error = ();

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.sent.push(bytes.to_vec());
        if let Some(state) = self.completion {
            state.notify_complete();
        }
        Ok(())
    }
}

/// Clock advancing one millisecond per read.
#[derive(Default)]
#[allow(dead_code)]
pub struct MockClock {
    pub ms: Cell<u64>,
}

impl MonotonicClock for MockClock {
    fn now(&self) -> Instant {
        let ms = self.ms.get();
        self.ms.set(ms + 1);
        Instant::from_millis(ms)
    }
}

/// Counts indicator hook calls.
#[derive(Debug, Default, PartialEq, Eq)]
#[allow(dead_code)]
pub struct RecordingIndicator {
    pub opened: usize,
    pub closed: usize,
    pub config_changes: usize,
    pub transmitted: usize,
    pub received: usize,
}

impl ActivityIndicator for RecordingIndicator {
    fn bus_opened(&mut self) {
        self.opened += 1;
    }
    fn bus_closed(&mut self) {
        self.closed += 1;
    }
    fn config_changed(&mut self) {
        self.config_changes += 1;
    }
    fn frame_transmitted(&mut self) {
        self.transmitted += 1;
    }
    fn frame_received(&mut self) {
        self.received += 1;
    }
}
