// Service options octet carried by voice and data grants

use serde::{Deserialize, Serialize};
use std::fmt;

const EMERGENCY: u8 = 0x80;
const ENCRYPTED: u8 = 0x40;
const DUPLEX: u8 = 0x20;
const PACKET: u8 = 0x10;
const PRIORITY: u8 = 0x07;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ServiceOptions(u8);

impl ServiceOptions {
    pub fn from_value(value: u32) -> Self {
        Self((value & 0xFF) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_emergency(&self) -> bool {
        self.0 & EMERGENCY != 0
    }

    pub fn is_encrypted(&self) -> bool {
        self.0 & ENCRYPTED != 0
    }

    /// Full duplex when set, half duplex otherwise
    pub fn is_full_duplex(&self) -> bool {
        self.0 & DUPLEX != 0
    }

    /// Packet mode when set, circuit mode otherwise
    pub fn is_packet_mode(&self) -> bool {
        self.0 & PACKET != 0
    }

    /// Priority 1 (lowest) to 7; 0 is reserved
    pub fn priority(&self) -> u8 {
        self.0 & PRIORITY
    }
}

impl fmt::Display for ServiceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_emergency() {
            f.write_str("EMERGENCY ")?;
        }
        if self.is_encrypted() {
            f.write_str("ENCRYPTED ")?;
        }
        write!(f, "PRI{}", self.priority())
    }
}

/// System service class octet advertised by status broadcasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ServiceClass(u8);

const SERVICE_CLASS_LABELS: [(u8, &str); 7] = [
    (0x80, "COMPOSITE"),
    (0x40, "UPDATE ONLY"),
    (0x20, "BACKUP"),
    (0x08, "DATA"),
    (0x04, "VOICE"),
    (0x02, "REGISTRATION"),
    (0x01, "AUTHENTICATION"),
];

impl ServiceClass {
    pub fn from_value(value: u32) -> Self {
        Self((value & 0xFF) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn has_voice(&self) -> bool {
        self.0 & 0x04 != 0
    }

    pub fn has_data(&self) -> bool {
        self.0 & 0x08 != 0
    }

    pub fn has_registration(&self) -> bool {
        self.0 & 0x02 != 0
    }
}

impl fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = SERVICE_CLASS_LABELS
            .iter()
            .filter(|(mask, _)| self.0 & mask != 0)
            .map(|(_, label)| *label)
            .collect();
        if labels.is_empty() {
            write!(f, "{:02X}", self.0)
        } else {
            f.write_str(&labels.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_options() {
        let options = ServiceOptions::from_value(0xC4);
        assert!(options.is_emergency());
        assert!(options.is_encrypted());
        assert!(!options.is_full_duplex());
        assert!(!options.is_packet_mode());
        assert_eq!(options.priority(), 4);
        assert_eq!(options.to_string(), "EMERGENCY ENCRYPTED PRI4");
        assert_eq!(ServiceOptions::from_value(0x03).to_string(), "PRI3");
    }

    #[test]
    fn test_service_class() {
        let class = ServiceClass::from_value(0x76);
        assert!(class.has_voice());
        assert!(class.has_registration());
        assert!(!class.has_data());
        assert_eq!(class.to_string(), "UPDATE ONLY/BACKUP/VOICE/REGISTRATION");
        assert_eq!(ServiceClass::from_value(0x10).to_string(), "10");
    }
}
