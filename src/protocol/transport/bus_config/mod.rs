//! Bus configuration values owned by the bus controller and handed to the
//! CAN driver when the bus is opened.

/// Discrete bitrates selectable with the `S` command, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bitrate {
    Rate10k,
    Rate20k,
    Rate50k,
    Rate100k,
    Rate125k,
    Rate250k,
    Rate500k,
    Rate750k,
    Rate1000k,
}

impl Bitrate {
    /// Selector to bitrate. Anything past the table selects the fastest entry.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Bitrate::Rate10k,
            1 => Bitrate::Rate20k,
            2 => Bitrate::Rate50k,
            3 => Bitrate::Rate100k,
            4 => Bitrate::Rate125k,
            5 => Bitrate::Rate250k,
            6 => Bitrate::Rate500k,
            7 => Bitrate::Rate750k,
            _ => Bitrate::Rate1000k,
        }
    }

    /// Selector digit as sent by the host.
    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn kbps(&self) -> u16 {
        match self {
            Bitrate::Rate10k => 10,
            Bitrate::Rate20k => 20,
            Bitrate::Rate50k => 50,
            Bitrate::Rate100k => 100,
            Bitrate::Rate125k => 125,
            Bitrate::Rate250k => 250,
            Bitrate::Rate500k => 500,
            Bitrate::Rate750k => 750,
            Bitrate::Rate1000k => 1_000,
        }
    }

    /// Prescaler for a 48 MHz kernel clock and 8 time quanta per bit.
    pub fn prescaler(&self) -> u16 {
        match self {
            Bitrate::Rate10k => 600,
            Bitrate::Rate20k => 300,
            Bitrate::Rate50k => 120,
            Bitrate::Rate100k => 60,
            Bitrate::Rate125k => 48,
            Bitrate::Rate250k => 24,
            Bitrate::Rate500k => 12,
            Bitrate::Rate750k => 8,
            Bitrate::Rate1000k => 6,
        }
    }

    /// Full bit timing for this rate (segments are fixed).
    pub fn timing(&self) -> BitTiming {
        BitTiming {
            prescaler: self.prescaler(),
            sjw: 1,
            bs1: 4,
            bs2: 3,
        }
    }
}

/// Bit timing register values. 1 + `bs1` + `bs2` quanta per bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    pub prescaler: u16,
    pub sjw: u8,
    pub bs1: u8,
    pub bs2: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    #[default]
    Normal,
    /// Listen only: no ACK, no transmission.
    Silent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    pub bitrate: Bitrate,
    pub mode: OperatingMode,
    pub auto_retransmit: bool,
}

impl Default for BusConfig {
    /// Power-on configuration: 125 kbit/s, normal mode, retransmission on.
    fn default() -> Self {
        Self {
            bitrate: Bitrate::Rate125k,
            mode: OperatingMode::Normal,
            auto_retransmit: true,
        }
    }
}

impl BusConfig {
    #[inline]
    pub fn timing(&self) -> BitTiming {
        self.bitrate.timing()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusState {
    #[default]
    Down,
    Up,
}

/// Receive acceptance filter installed once at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcceptanceFilter {
    pub bank: u8,
    pub id: u32,
    pub mask: u32,
    pub fifo: u8,
}

impl AcceptanceFilter {
    /// Single 32-bit mask bank with an empty mask, routed to FIFO 0.
    pub const ACCEPT_ALL: Self = Self {
        bank: 0,
        id: 0,
        mask: 0,
        fifo: 0,
    };
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
