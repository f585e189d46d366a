//! Foreground Scheduler: the never-failing loop tying the host link, the
//! codec, the bus controller and the CAN driver together.
//!
//! One [`Bridge::poll`] performs, in order:
//!
//! 1. drain one host packet, reassemble its lines, decode and dispatch them;
//! 2. hand queued frames to free transmit mailboxes (bus up only);
//! 3. forward one received frame to the host (bus up only).
//!
//! Nothing here blocks except the bounded wait of the host transmit path.
//! Every error is handled where it is detected: reported to the error
//! register, logged, or both.
use crate::error::DecodeError;
use crate::protocol::bridge::bus::BusController;
use crate::protocol::bridge::diagnostics::ErrorCode;
use crate::protocol::bridge::host_tx::HostTransmitPath;
use crate::protocol::bridge::line::{LineEvent, LineReassembler};
use crate::protocol::bridge::shared::BridgeShared;
use crate::protocol::bridge::tx_queue::TransmitQueue;
use crate::protocol::slcan::{
    decode_line, encode_error_register, encode_frame, encode_version, Command, FIRMWARE_VERSION,
};
use crate::protocol::transport::bus_config::{BusConfig, BusState};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{
    activity::ActivityIndicator,
    can_driver::CanDriver,
    clock::{MonotonicClock, SystemClock},
    host_link::HostLink,
};
use crate::protocol::transport::{NUM_RX_BUFS, TX_QUEUE_LEN};

/// Bridge on the global `embassy-time` clock, without status indicator.
pub type DefaultBridge<'a, D, U> = Bridge<'a, D, U, SystemClock, ()>;

pub struct Bridge<
    'a,
    D: CanDriver,
    U: HostLink,
    K: MonotonicClock,
    I: ActivityIndicator = (),
    const TX_CAP: usize = TX_QUEUE_LEN,
    const RX_SLOTS: usize = NUM_RX_BUFS,
> {
    driver: D,
    link: U,
    clock: K,
    indicator: I,
    shared: &'a BridgeShared<RX_SLOTS>,
    bus: BusController,
    tx_queue: TransmitQueue<TX_CAP>,
    reassembler: LineReassembler,
    host_tx: HostTransmitPath,
    version: &'a str,
}

impl<'a, D, U, K, I, const TX_CAP: usize, const RX_SLOTS: usize>
    Bridge<'a, D, U, K, I, TX_CAP, RX_SLOTS>
where
    D: CanDriver,
    U: HostLink,
    K: MonotonicClock,
    I: ActivityIndicator,
{
    /// Build the bridge and install the receive filter.
    ///
    /// A refused filter is reported as `PeripheralInit`; the bridge is
    /// still returned so the host can query the error register.
    pub fn new(
        mut driver: D,
        link: U,
        clock: K,
        indicator: I,
        shared: &'a BridgeShared<RX_SLOTS>,
    ) -> Self {
        let bus = BusController::default();
        if let Err(_err) = bus.install_filter(&mut driver) {
            #[cfg(feature = "defmt")]
            defmt::error!("filter setup failed: {}", defmt::Debug2Format(&_err));
            shared.errors.report(ErrorCode::PeripheralInit);
        }

        Self {
            driver,
            link,
            clock,
            indicator,
            shared,
            bus,
            tx_queue: TransmitQueue::new(),
            reassembler: LineReassembler::new(),
            host_tx: HostTransmitPath::new(),
            version: FIRMWARE_VERSION,
        }
    }

    /// Identity reported by the `V` command.
    pub fn with_version(mut self, version: &'a str) -> Self {
        self.version = version;
        self
    }

    /// Power-on bus configuration, used until the host changes it.
    pub fn with_config(mut self, config: BusConfig) -> Self {
        self.bus = BusController::new(config);
        self
    }

    /// Custom host transmit path, e.g. with a different busy-wait bound.
    pub fn with_host_transmit_path(mut self, host_tx: HostTransmitPath) -> Self {
        self.host_tx = host_tx;
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn link(&self) -> &U {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut U {
        &mut self.link
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn shared(&self) -> &'a BridgeShared<RX_SLOTS> {
        self.shared
    }

    pub fn bus_state(&self) -> BusState {
        self.bus.state()
    }

    pub fn config(&self) -> &BusConfig {
        self.bus.config()
    }

    /// Frames waiting for a transmit mailbox.
    pub fn tx_queue_len(&self) -> usize {
        self.tx_queue.len()
    }

    /// Run forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// One scheduler iteration.
    pub fn poll(&mut self) {
        self.process_host_packet();

        if self.bus.is_up() {
            self.service_transmit_queue();
            self.forward_received_frame();
        }
    }

    //==================================================================================HOST_INPUT
    fn process_host_packet(&mut self) {
        // Critical section covers the copy only; dispatch may wait on the
        // USB completion interrupt.
        let Some(packet) = self.shared.host_rx.drain_one() else {
            return;
        };

        for &byte in packet.as_slice() {
            match self.reassembler.push_byte(byte) {
                LineEvent::Pending => {}
                LineEvent::Complete(line) => self.handle_line(line.as_slice()),
                LineEvent::Overflow => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("host line too long, dropped");
                    self.shared.errors.report(ErrorCode::LineOverflow);
                }
            }
        }
    }

    fn handle_line(&mut self, line: &[u8]) {
        match decode_line(line) {
            Ok(command) => self.dispatch(command),
            Err(DecodeError::Empty) => {}
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("line {=[u8]:a} rejected: {}", line, _err);
            }
        }
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::Open => self.open_bus(),
            Command::Close => self.close_bus(),
            Command::SetBitrate(bitrate) => {
                let applied = self.bus.set_bitrate(bitrate);
                self.config_applied(applied);
            }
            Command::SetMode(mode) => {
                let applied = self.bus.set_mode(mode);
                self.config_applied(applied);
            }
            Command::SetAutoRetransmit(enabled) => {
                let applied = self.bus.set_autoretransmit(enabled);
                self.config_applied(applied);
            }
            Command::ReportVersion => match encode_version(self.version) {
                Some(line) => self.respond(line.as_slice()),
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("version string does not fit a host packet");
                }
            },
            Command::ReportErrorRegister => {
                let line = encode_error_register(self.shared.errors.bits());
                self.respond(line.as_slice());
            }
            Command::Transmit(frame) => self.enqueue(frame),
        }
    }

    fn open_bus(&mut self) {
        if self.bus.is_up() {
            return;
        }
        match self.bus.open(&mut self.driver) {
            Ok(()) => self.indicator.bus_opened(),
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::error!("bus open failed: {}", defmt::Debug2Format(&_err));
                self.shared.errors.report(ErrorCode::PeripheralInit);
            }
        }
    }

    fn close_bus(&mut self) {
        if !self.bus.is_up() {
            return;
        }
        if let Err(_err) = self.bus.close(&mut self.driver) {
            #[cfg(feature = "defmt")]
            defmt::error!("bus reset failed: {}", defmt::Debug2Format(&_err));
            self.shared.errors.report(ErrorCode::PeripheralInit);
        }
        self.tx_queue.clear();
        self.indicator.bus_closed();
    }

    fn config_applied(&mut self, applied: bool) {
        if applied {
            self.indicator.config_changed();
        }
    }

    fn enqueue(&mut self, frame: CanFrame) {
        if !self.bus.is_up() {
            #[cfg(feature = "defmt")]
            defmt::debug!("bus down, {} dropped", frame);
            return;
        }
        if self.tx_queue.enqueue(frame).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("transmit queue full, {} dropped", frame);
            self.shared.errors.report(ErrorCode::TxQueueFull);
        }
    }

    //==================================================================================CAN_SIDE
    fn service_transmit_queue(&mut self) {
        if self.tx_queue.service(&mut self.driver, &self.shared.errors) > 0 {
            self.indicator.frame_transmitted();
        }
    }

    fn forward_received_frame(&mut self) {
        if !self.driver.receive_pending() {
            return;
        }
        match self.driver.receive() {
            Ok(frame) => {
                self.indicator.frame_received();
                let line = encode_frame(&frame);
                self.respond(line.as_slice());
            }
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("receive failed: {}", defmt::Debug2Format(&_err));
            }
        }
    }

    //==================================================================================HOST_OUTPUT
    fn respond(&mut self, bytes: &[u8]) {
        if let Err(_err) = self.host_tx.send(
            &mut self.link,
            &self.clock,
            &self.shared.host_tx,
            &self.shared.errors,
            bytes,
        ) {
            #[cfg(feature = "defmt")]
            defmt::warn!("host send failed: {}", defmt::Debug2Format(&_err));
        }
    }
}
