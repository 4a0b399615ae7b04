// Vocoder packet framing
//
// 0x61 <length u16 BE> <type> <field id> [field data]... 0x2F <parity>
//
// The length counts every byte after the type byte, parity field included.
// Parity is the XOR of all bytes after the start byte up to and including 0x2F.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const START_BYTE: u8 = 0x61;
pub const PARITY_FIELD: u8 = 0x2F;

/// Start byte, length and type
pub const HEADER_LEN: usize = 4;

/// Largest frame the device produces; used to bound resynchronisation
pub const MAX_PACKET_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketType {
    Control,
    Channel,
    Speech,
    Unknown(u8),
}

impl PacketType {
    pub fn from_value(value: u8) -> Self {
        match value {
            0x00 => PacketType::Control,
            0x01 => PacketType::Channel,
            0x02 => PacketType::Speech,
            other => PacketType::Unknown(other),
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            PacketType::Control => 0x00,
            PacketType::Channel => 0x01,
            PacketType::Speech => 0x02,
            PacketType::Unknown(v) => *v,
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketType::Control => f.write_str("CONTROL"),
            PacketType::Channel => f.write_str("CHANNEL"),
            PacketType::Speech => f.write_str("SPEECH"),
            PacketType::Unknown(v) => write!(f, "TYPE-{:02X}", v),
        }
    }
}

macro_rules! packet_fields {
    ($($variant:ident = $value:literal => $label:literal),* $(,)?) => {
        /// Field identifiers used in control, channel and speech packets
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum PacketField {
            $($variant,)*
            Unknown(u8),
        }

        impl PacketField {
            pub fn from_value(value: u8) -> Self {
                match value {
                    $($value => PacketField::$variant,)*
                    other => PacketField::Unknown(other),
                }
            }

            pub fn value(&self) -> u8 {
                match self {
                    $(PacketField::$variant => $value,)*
                    PacketField::Unknown(v) => *v,
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $(PacketField::$variant => $label,)*
                    PacketField::Unknown(_) => "UNKNOWN",
                }
            }
        }
    };
}

packet_fields! {
    SpeechData = 0x00 => "SPEECH DATA",
    ChannelData = 0x01 => "CHANNEL DATA",
    EncoderMode = 0x05 => "SET ENCODER MODE",
    DecoderMode = 0x06 => "SET DECODER MODE",
    RateIndex = 0x09 => "SET VOCODER RATE INDEX",
    RateParameters = 0x0A => "SET VOCODER RATE",
    Initialize = 0x0B => "INITIALIZE",
    Parity = 0x2F => "PARITY",
    ProductId = 0x30 => "PRODUCT ID",
    Version = 0x31 => "VERSION",
    Compand = 0x32 => "SET COMPANDING",
    Reset = 0x33 => "RESET",
    Ready = 0x39 => "READY",
}

impl fmt::Display for PacketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketField::Unknown(v) => write!(f, "FIELD-{:02X}", v),
            _ => f.write_str(self.label()),
        }
    }
}

/// XOR of `bytes`
pub fn parity(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

/// Frame `fields` as a packet of the given type, appending the parity field
pub fn encode(packet_type: PacketType, fields: &[u8]) -> Vec<u8> {
    let length = (fields.len() + 2) as u16;

    let mut frame = Vec::with_capacity(HEADER_LEN + fields.len() + 2);
    frame.push(START_BYTE);
    frame.extend_from_slice(&length.to_be_bytes());
    frame.push(packet_type.value());
    frame.extend_from_slice(fields);
    frame.push(PARITY_FIELD);
    frame.push(parity(&frame[1..]));
    frame
}

/// True when `frame` ends in a parity field matching its contents
pub fn parity_ok(frame: &[u8]) -> bool {
    match frame {
        [START_BYTE, body @ .., PARITY_FIELD, check] if !body.is_empty() => {
            parity(body) ^ PARITY_FIELD == *check
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reset() {
        let frame = encode(PacketType::Control, &[0x33]);
        assert_eq!(frame, vec![0x61, 0x00, 0x03, 0x00, 0x33, 0x2F, 0x1F]);
        assert!(parity_ok(&frame));
    }

    #[test]
    fn test_parity_detects_corruption() {
        let mut frame = encode(PacketType::Control, &[0x09, 0x21]);
        assert!(parity_ok(&frame));
        frame[5] ^= 0x01;
        assert!(!parity_ok(&frame));
        assert!(!parity_ok(&[0x61]));
    }

    #[test]
    fn test_field_table() {
        assert_eq!(PacketField::from_value(0x0A), PacketField::RateParameters);
        assert_eq!(PacketField::RateParameters.label(), "SET VOCODER RATE");
        assert_eq!(PacketField::from_value(0x7E).to_string(), "FIELD-7E");
        assert_eq!(PacketType::from_value(2), PacketType::Speech);
    }
}
