//! Bus Controller: the Down/Up state machine in front of the CAN driver.
//!
//! Configuration can only change while the bus is down; requests made while
//! it is up are ignored. Transitions happen only on explicit commands.
use crate::error::BusError;
use crate::protocol::transport::bus_config::{
    AcceptanceFilter, Bitrate, BusConfig, BusState, OperatingMode,
};
use crate::protocol::transport::traits::can_driver::CanDriver;

#[derive(Debug, Clone, Default)]
pub struct BusController {
    config: BusConfig,
    state: BusState,
}

impl BusController {
    pub fn new(config: BusConfig) -> Self {
        Self {
            config,
            state: BusState::Down,
        }
    }

    #[inline]
    pub fn state(&self) -> BusState {
        self.state
    }

    #[inline]
    pub fn is_up(&self) -> bool {
        self.state == BusState::Up
    }

    #[inline]
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Program the accept-all filter. Done once at start-up, never again.
    pub fn install_filter<D: CanDriver>(&self, driver: &mut D) -> Result<(), BusError<D::Error>> {
        driver
            .configure_filter(&AcceptanceFilter::ACCEPT_ALL)
            .map_err(BusError::Driver)
    }

    /// Returns `true` when the setting was applied.
    pub fn set_bitrate(&mut self, bitrate: Bitrate) -> bool {
        self.update(|config| config.bitrate = bitrate)
    }

    pub fn set_mode(&mut self, mode: OperatingMode) -> bool {
        self.update(|config| config.mode = mode)
    }

    pub fn set_autoretransmit(&mut self, enabled: bool) -> bool {
        self.update(|config| config.auto_retransmit = enabled)
    }

    fn update(&mut self, apply: impl FnOnce(&mut BusConfig)) -> bool {
        if self.is_up() {
            #[cfg(feature = "defmt")]
            defmt::debug!("bus is up, configuration change ignored");
            return false;
        }
        apply(&mut self.config);
        true
    }

    /// Apply the configuration and join the bus. No-op when already up.
    ///
    /// On failure the state stays `Down`.
    pub fn open<D: CanDriver>(&mut self, driver: &mut D) -> Result<(), BusError<D::Error>> {
        if self.is_up() {
            return Ok(());
        }
        driver.init(&self.config).map_err(BusError::Driver)?;
        driver.start().map_err(BusError::Driver)?;
        self.state = BusState::Up;
        #[cfg(feature = "defmt")]
        defmt::info!("bus up at {} kbit/s", self.config.bitrate.kbps());
        Ok(())
    }

    /// Reset the peripheral and leave the bus. No-op when already down.
    ///
    /// The state becomes `Down` even if the reset itself is refused.
    pub fn close<D: CanDriver>(&mut self, driver: &mut D) -> Result<(), BusError<D::Error>> {
        if !self.is_up() {
            return Ok(());
        }
        self.state = BusState::Down;
        #[cfg(feature = "defmt")]
        defmt::info!("bus down");
        driver.reset().map_err(BusError::Driver)
    }
}
