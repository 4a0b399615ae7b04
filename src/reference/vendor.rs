// Manufacturer id (MFID) carried in every TSBK header

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    Standard,
    Motorola,
    Harris,
    Other(u8),
}

impl Vendor {
    pub fn from_value(value: u32) -> Self {
        match value {
            0x00 | 0x01 => Vendor::Standard,
            0x90 => Vendor::Motorola,
            0xA4 => Vendor::Harris,
            other => Vendor::Other((other & 0xFF) as u8),
        }
    }

    /// Standard messages share one opcode space; vendor messages reuse opcodes freely
    pub fn is_standard(&self) -> bool {
        matches!(self, Vendor::Standard)
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vendor::Standard => f.write_str("STANDARD"),
            Vendor::Motorola => f.write_str("MOTOROLA"),
            Vendor::Harris => f.write_str("HARRIS"),
            Vendor::Other(v) => write!(f, "MFID-{:02X}", v),
        }
    }
}
