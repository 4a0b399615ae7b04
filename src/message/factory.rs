// Selects and constructs the concrete message for an inbound buffer

use super::registry;
use super::tsbk::{OPCODE, VENDOR};
use super::unknown::UnknownMessage;
use super::{Message, MessageContext, MessageError, Result};
use crate::bits::{tsbk_crc_ok, CorrectedBitBuffer};
use crate::reference::{DataUnitId, Vendor};

/// Decoder behaviour switches
#[derive(Debug, Clone)]
pub struct FactoryConfig {
    /// Verify the TSBK CRC; when disabled every message is treated as valid
    pub check_crc: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self { check_crc: true }
    }
}

impl FactoryConfig {
    pub fn without_crc_check(mut self) -> Self {
        self.check_crc = false;
        self
    }
}

/// Stateless message factory; safe to share between decoding threads
#[derive(Debug, Clone, Default)]
pub struct MessageFactory {
    config: FactoryConfig,
}

impl MessageFactory {
    pub fn new(config: FactoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Decode one buffer.
    ///
    /// An unregistered (data unit, opcode) pair, or a TSBK from a non-standard
    /// vendor, yields an [`UnknownMessage`]. Only a buffer too short for the
    /// selected decoder's field tables is an error.
    pub fn decode(
        &self,
        data_unit: DataUnitId,
        opcode: u8,
        bits: CorrectedBitBuffer,
        nac: u16,
        timestamp: u64,
    ) -> Result<Box<dyn Message>> {
        let context = MessageContext::new(data_unit, nac, timestamp);
        let valid = self.integrity_ok(data_unit, &bits);
        if !valid {
            tracing::debug!("NAC:{:03X} {} failed CRC check", nac, data_unit);
        }

        if let Some(vendor) = vendor_of(data_unit, &bits) {
            if !vendor.is_standard() {
                tracing::debug!("{} opcode {:#04x} from vendor {}", data_unit, opcode, vendor);
                return Ok(Box::new(UnknownMessage::new(context, opcode, bits, valid)));
            }
        }

        match registry::lookup(data_unit, opcode) {
            Ok(entry) => {
                if let Err(err) = bits.require_len(entry.min_bits) {
                    tracing::warn!("Dropping {} message: {}", entry.label, err);
                    return Err(MessageError::FieldOutOfRange(err));
                }
                (entry.build)(context, bits, valid)
            }
            Err(err) => {
                tracing::debug!("{}", err);
                Ok(Box::new(UnknownMessage::new(context, opcode, bits, valid)))
            }
        }
    }

    /// Decode a TSBK, taking the opcode from bits 2..8 of the buffer
    pub fn decode_tsbk(
        &self,
        bits: CorrectedBitBuffer,
        nac: u16,
        timestamp: u64,
    ) -> Result<Box<dyn Message>> {
        let opcode = bits.get_int(&OPCODE)? as u8;
        self.decode(
            DataUnitId::TrunkingSignalingBlock,
            opcode,
            bits,
            nac,
            timestamp,
        )
    }

    fn integrity_ok(&self, data_unit: DataUnitId, bits: &CorrectedBitBuffer) -> bool {
        if !self.config.check_crc {
            return true;
        }
        match data_unit {
            DataUnitId::TrunkingSignalingBlock => tsbk_crc_ok(bits),
            _ => true,
        }
    }
}

fn vendor_of(data_unit: DataUnitId, bits: &CorrectedBitBuffer) -> Option<Vendor> {
    if data_unit != DataUnitId::TrunkingSignalingBlock {
        return None;
    }
    bits.get_int(&VENDOR).ok().map(Vendor::from_value)
}

/// Decode with the default configuration
pub fn decode(
    data_unit: DataUnitId,
    opcode: u8,
    bits: CorrectedBitBuffer,
    nac: u16,
    timestamp: u64,
) -> Result<Box<dyn Message>> {
    MessageFactory::default().decode(data_unit, opcode, bits, nac, timestamp)
}

/// Decode a TSBK with the default configuration
pub fn decode_tsbk(bits: CorrectedBitBuffer, nac: u16, timestamp: u64) -> Result<Box<dyn Message>> {
    MessageFactory::default().decode_tsbk(bits, nac, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitError;
    use crate::message::tsbk::test_support::{sealed_tsbk, unsealed_tsbk};
    use crate::reference::Opcode;
    use std::sync::Arc;

    fn location_registration() -> CorrectedBitBuffer {
        sealed_tsbk(
            Opcode::LocationRegistrationResponse,
            &[(22..24, 0), (24..40, 0xFFFF), (40..48, 3), (48..56, 7), (56..80, 1234)],
        )
    }

    #[test]
    fn test_location_registration_scenario() {
        let message = decode_tsbk(location_registration(), 0x293, 0).unwrap();
        let text = message.to_string();

        assert_eq!(message.label(), "LOC_REG_RSP");
        assert!(message.is_valid());
        assert_eq!(
            text,
            "NAC:293 TSBK LOC_REG_RSP TO:1234 GROUP:ANY RFSS:3 SITE:7 RESPONSE:ACCEPT"
        );
        assert!(!text.contains("65535"));

        let positions: Vec<usize> = ["TO:1234", "GROUP:ANY", "RFSS:3", "SITE:7", "RESPONSE:ACCEPT"]
            .iter()
            .map(|token| text.find(token).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let first = decode_tsbk(location_registration(), 0x293, 0).unwrap();
        let second = decode_tsbk(location_registration(), 0x293, 0).unwrap();

        assert_eq!(first.identifiers(), second.identifiers());
        assert_eq!(first.identifiers(), first.identifiers());
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_unknown_opcode_falls_back() {
        let buffer = sealed_tsbk(Opcode::AdjacentStatusBroadcast, &[(16..24, 0xA5)]);
        let message = decode_tsbk(buffer, 0x293, 0).unwrap();

        assert_eq!(message.opcode(), 0x3C);
        assert_eq!(message.label(), "UNKNOWN");
        assert!(message.identifiers().is_empty());
        assert!(message.to_string().contains("ADJ_STS_BCST"));
    }

    #[test]
    fn test_every_opcode_decodes() {
        for opcode in 0..64u8 {
            let buffer = unsealed_tsbk(Opcode::from_value(opcode), &[]);
            let message = decode_tsbk(buffer, 1, 0).unwrap();
            assert_eq!(message.opcode(), opcode);
        }
    }

    #[test]
    fn test_unregistered_data_unit() {
        let message = decode(
            DataUnitId::PacketDataUnit,
            0x2B,
            CorrectedBitBuffer::from_bytes(vec![0xDE, 0xAD]),
            0x293,
            0,
        )
        .unwrap();
        assert_eq!(message.data_unit(), DataUnitId::PacketDataUnit);
        assert!(message.to_string().contains("DE AD"));
    }

    #[test]
    fn test_vendor_message_is_unknown() {
        let buffer = sealed_tsbk(Opcode::LocationRegistrationResponse, &[(8..16, 0x90)]);
        let message = decode_tsbk(buffer, 0x293, 0).unwrap();
        assert_eq!(message.label(), "UNKNOWN");
        assert!(message.to_string().contains("MOTOROLA"));
    }

    #[test]
    fn test_short_buffer_is_field_out_of_range() {
        let err = decode(
            DataUnitId::TrunkingSignalingBlock,
            0x2B,
            CorrectedBitBuffer::zeroed(80),
            0x293,
            0,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MessageError::FieldOutOfRange(BitError::FieldOutOfRange { index: 95, length: 80 })
        ));
    }

    #[test]
    fn test_crc_failure_marks_invalid() {
        let buffer = unsealed_tsbk(Opcode::LocationRegistrationResponse, &[(56..80, 1234)]);
        let message = decode_tsbk(buffer.clone(), 0x293, 0).unwrap();
        assert!(!message.is_valid());
        assert!(message.to_string().starts_with("**CRC-FAIL** NAC:293"));

        let lenient = MessageFactory::new(FactoryConfig::default().without_crc_check());
        let message = lenient.decode_tsbk(buffer, 0x293, 0).unwrap();
        assert!(message.is_valid());
    }

    #[test]
    fn test_concurrent_first_access() {
        let message: Arc<Box<dyn Message>> =
            Arc::new(decode_tsbk(location_registration(), 0x293, 0).unwrap());

        let rendered: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let message = Arc::clone(&message);
                    scope.spawn(move || {
                        assert_eq!(message.identifiers().len(), 4);
                        message.to_string()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(rendered.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
