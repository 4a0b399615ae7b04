// Channel references and the frequency bands that resolve them to Hz

use super::{check_width, IdentifierKind, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 16-bit channel field: 4-bit frequency band id followed by a 12-bit channel number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel {
    band: u8,
    number: u16,
}

impl Channel {
    pub const BITS: u32 = 16;

    pub fn new(band: u8, number: u16) -> Result<Self> {
        check_width(IdentifierKind::Channel, band as u32, 4)?;
        check_width(IdentifierKind::Channel, number as u32, 12)?;
        Ok(Self { band, number })
    }

    pub fn try_create(raw: u32) -> Result<Self> {
        let raw = check_width(IdentifierKind::Channel, raw, Self::BITS)?;
        Ok(Self {
            band: (raw >> 12) as u8,
            number: (raw & 0x0FFF) as u16,
        })
    }

    /// Out-of-range input keeps only the low 16 bits
    pub fn create(raw: u32) -> Self {
        Self::try_create(raw).unwrap_or_else(|err| {
            tracing::warn!("{}, truncating to 16 bits", err);
            Self {
                band: ((raw >> 12) & 0x0F) as u8,
                number: (raw & 0x0FFF) as u16,
            }
        })
    }

    /// Frequency band (identifier update) this channel refers to
    pub fn band(&self) -> u8 {
        self.band
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    /// Downlink frequency in Hz, `None` if `band` describes a different band id
    pub fn downlink_frequency(&self, band: &FrequencyBand) -> Option<u64> {
        (band.id() == self.band).then(|| band.downlink(self.number))
    }

    /// Uplink frequency in Hz, `None` if `band` describes a different band id
    pub fn uplink_frequency(&self, band: &FrequencyBand) -> Option<u64> {
        (band.id() == self.band).then(|| band.uplink(self.number))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.band, self.number)
    }
}

/// Channel plan announced by an identifier update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyBand {
    id: u8,
    base_frequency: u64,
    channel_spacing: u32,
    transmit_offset: i64,
    bandwidth: u32,
}

impl FrequencyBand {
    /// Base frequency field unit
    pub const BASE_UNIT_HZ: u64 = 5;
    /// Channel spacing and bandwidth field unit
    pub const SPACING_UNIT_HZ: u32 = 125;
    /// Transmit offset magnitude unit
    pub const OFFSET_UNIT_HZ: i64 = 250_000;

    pub fn new(
        id: u8,
        base_frequency: u64,
        channel_spacing: u32,
        transmit_offset: i64,
        bandwidth: u32,
    ) -> Self {
        Self {
            id,
            base_frequency,
            channel_spacing,
            transmit_offset,
            bandwidth,
        }
    }

    /// Build from the raw identifier update fields
    pub fn from_fields(
        id: u32,
        bandwidth: u32,
        offset_positive: bool,
        offset: u32,
        spacing: u32,
        base: u32,
    ) -> Self {
        let magnitude = offset as i64 * Self::OFFSET_UNIT_HZ;
        Self {
            id: (id & 0x0F) as u8,
            base_frequency: base as u64 * Self::BASE_UNIT_HZ,
            channel_spacing: spacing * Self::SPACING_UNIT_HZ,
            transmit_offset: if offset_positive { magnitude } else { -magnitude },
            bandwidth: bandwidth * Self::SPACING_UNIT_HZ,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn base_frequency(&self) -> u64 {
        self.base_frequency
    }

    pub fn channel_spacing(&self) -> u32 {
        self.channel_spacing
    }

    pub fn transmit_offset(&self) -> i64 {
        self.transmit_offset
    }

    pub fn bandwidth(&self) -> u32 {
        self.bandwidth
    }

    pub fn downlink(&self, number: u16) -> u64 {
        self.base_frequency + self.channel_spacing as u64 * number as u64
    }

    pub fn uplink(&self, number: u16) -> u64 {
        (self.downlink(number) as i64 + self.transmit_offset).max(0) as u64
    }
}
