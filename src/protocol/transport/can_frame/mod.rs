//! In-memory representation of a classic CAN frame as it crosses the bridge.
use crate::error::FrameError;
use crate::protocol::transport::can_id::{id_from_raw, raw_id};
use embedded_can::Id;

/// Classic CAN payload limit.
pub const MAX_DATA_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Value-type CAN frame. Only the first `dlc` data bytes are meaningful and
/// the rest are kept at zero so that equality compares what is on the wire.
pub struct CanFrame {
    /// Standard or extended identifier.
    id: Id,
    /// Remote transmission request (no payload, DLC only).
    remote: bool,
    /// Data Length Code, 0 to 8.
    dlc: u8,
    /// Payload buffer.
    data: [u8; MAX_DATA_LEN],
}

impl CanFrame {
    /// Data frame carrying `data` (at most eight bytes).
    pub fn data_frame(id: impl Into<Id>, data: &[u8]) -> Result<Self, FrameError> {
        if data.len() > MAX_DATA_LEN {
            return Err(FrameError::InvalidDlc(data.len()));
        }
        let mut payload = [0u8; MAX_DATA_LEN];
        payload[..data.len()].copy_from_slice(data);
        Ok(Self {
            id: id.into(),
            remote: false,
            dlc: data.len() as u8,
            data: payload,
        })
    }

    /// Remote request frame announcing `dlc` bytes.
    pub fn remote_frame(id: impl Into<Id>, dlc: usize) -> Result<Self, FrameError> {
        if dlc > MAX_DATA_LEN {
            return Err(FrameError::InvalidDlc(dlc));
        }
        Ok(Self {
            id: id.into(),
            remote: true,
            dlc: dlc as u8,
            data: [0; MAX_DATA_LEN],
        })
    }

    /// Build from raw parts, as the codec does after parsing a line.
    pub fn from_raw(
        raw_id: u32,
        extended: bool,
        remote: bool,
        data: &[u8],
        dlc: usize,
    ) -> Result<Self, FrameError> {
        let id = id_from_raw(raw_id, extended)?;
        if remote {
            Self::remote_frame(id, dlc)
        } else {
            Self::data_frame(id, data)
        }
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Numeric identifier without the format tag.
    #[inline]
    pub fn raw_id(&self) -> u32 {
        raw_id(&self.id)
    }

    #[inline]
    pub fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    #[inline]
    pub fn is_remote(&self) -> bool {
        self.remote
    }

    #[inline]
    pub fn dlc(&self) -> usize {
        self.dlc as usize
    }

    /// Meaningful payload bytes (empty for remote frames).
    #[inline]
    pub fn data(&self) -> &[u8] {
        if self.remote {
            &[]
        } else {
            &self.data[..self.dlc as usize]
        }
    }
}

impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        Self::data_frame(id, data).ok()
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        Self::remote_frame(id, dlc).ok()
    }

    fn is_extended(&self) -> bool {
        CanFrame::is_extended(self)
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc as usize
    }

    fn data(&self) -> &[u8] {
        CanFrame::data(self)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CanFrame {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "CanFrame {{ id: {=u32:#x}, ext: {=bool}, rtr: {=bool}, data: {=[u8]:02x} }}",
            self.raw_id(),
            self.is_extended(),
            self.remote,
            self.data()
        )
    }
}
