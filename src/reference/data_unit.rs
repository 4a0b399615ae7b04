// Phase 1 data unit identifiers (4-bit DUID carried in the network identifier word)

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataUnitId {
    HeaderDataUnit,
    TerminatorDataUnit,
    LogicalLinkDataUnit1,
    TrunkingSignalingBlock,
    LogicalLinkDataUnit2,
    PacketDataUnit,
    TerminatorLinkControl,
    Unknown(u8),
}

impl DataUnitId {
    pub fn from_value(value: u8) -> Self {
        match value {
            0x0 => DataUnitId::HeaderDataUnit,
            0x3 => DataUnitId::TerminatorDataUnit,
            0x5 => DataUnitId::LogicalLinkDataUnit1,
            0x7 => DataUnitId::TrunkingSignalingBlock,
            0xA => DataUnitId::LogicalLinkDataUnit2,
            0xC => DataUnitId::PacketDataUnit,
            0xF => DataUnitId::TerminatorLinkControl,
            other => DataUnitId::Unknown(other),
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            DataUnitId::HeaderDataUnit => 0x0,
            DataUnitId::TerminatorDataUnit => 0x3,
            DataUnitId::LogicalLinkDataUnit1 => 0x5,
            DataUnitId::TrunkingSignalingBlock => 0x7,
            DataUnitId::LogicalLinkDataUnit2 => 0xA,
            DataUnitId::PacketDataUnit => 0xC,
            DataUnitId::TerminatorLinkControl => 0xF,
            DataUnitId::Unknown(v) => *v,
        }
    }

    /// Short label used at the start of every rendered message
    pub fn label(&self) -> &'static str {
        match self {
            DataUnitId::HeaderDataUnit => "HDU",
            DataUnitId::TerminatorDataUnit => "TDU",
            DataUnitId::LogicalLinkDataUnit1 => "LDU1",
            DataUnitId::TrunkingSignalingBlock => "TSBK",
            DataUnitId::LogicalLinkDataUnit2 => "LDU2",
            DataUnitId::PacketDataUnit => "PDU",
            DataUnitId::TerminatorLinkControl => "TDULC",
            DataUnitId::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for DataUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataUnitId::Unknown(v) => write!(f, "DUID-{:X}", v),
            _ => f.write_str(self.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duid_values() {
        for value in 0..16u8 {
            assert_eq!(DataUnitId::from_value(value).value(), value);
        }
        assert_eq!(DataUnitId::from_value(7), DataUnitId::TrunkingSignalingBlock);
        assert_eq!(DataUnitId::from_value(7).to_string(), "TSBK");
        assert_eq!(DataUnitId::from_value(9).to_string(), "DUID-9");
    }
}
