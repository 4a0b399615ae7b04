// Decoder registry keyed by (data unit, opcode)
//
// Message types submit a `DecoderEntry` with `register_decoder!`. The lookup
// table is built from those submissions on first use and never changes after.

use super::tsbk::{TsbkBlock, TsbkDecode, TSBK_BITS};
use super::{Message, MessageContext, MessageError, Result};
use crate::bits::CorrectedBitBuffer;
use crate::reference::DataUnitId;
use std::collections::HashMap;
use std::fmt;

/// Constructor stored for each registered message type
pub type BuildFn =
    fn(MessageContext, CorrectedBitBuffer, bool) -> Result<Box<dyn Message>>;

/// One registered decoder
pub struct DecoderEntry {
    pub data_unit: DataUnitId,
    pub opcode: u8,
    pub label: &'static str,
    /// Shortest buffer the decoder's field tables can read from
    pub min_bits: usize,
    pub build: BuildFn,
}

impl DecoderEntry {
    /// Entry for a trunking signaling block message type
    pub const fn tsbk<T: TsbkDecode>() -> Self {
        Self {
            data_unit: DataUnitId::TrunkingSignalingBlock,
            opcode: T::OPCODE.value(),
            label: T::OPCODE.label(),
            min_bits: TSBK_BITS,
            build: build_tsbk::<T>,
        }
    }

    pub fn key(&self) -> (DataUnitId, u8) {
        (self.data_unit, self.opcode)
    }
}

impl fmt::Debug for DecoderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderEntry")
            .field("data_unit", &self.data_unit)
            .field("opcode", &self.opcode)
            .field("label", &self.label)
            .field("min_bits", &self.min_bits)
            .finish()
    }
}

fn build_tsbk<T: TsbkDecode>(
    context: MessageContext,
    bits: CorrectedBitBuffer,
    valid: bool,
) -> Result<Box<dyn Message>> {
    let block = TsbkBlock::new(context, bits, valid)?;
    Ok(Box::new(T::from_block(block)))
}

inventory::collect!(DecoderEntry);

/// Register a TSBK message type with the dispatcher
#[macro_export]
macro_rules! register_decoder {
    ($message:ty) => {
        inventory::submit! {
            $crate::message::registry::DecoderEntry::tsbk::<$message>()
        }
    };
}

lazy_static::lazy_static! {
    static ref DECODER_REGISTRY: HashMap<(DataUnitId, u8), &'static DecoderEntry> = build_registry();
}

fn build_registry() -> HashMap<(DataUnitId, u8), &'static DecoderEntry> {
    let mut registry = HashMap::new();

    for entry in inventory::iter::<DecoderEntry> {
        if let Some(existing) = registry.insert(entry.key(), entry) {
            tracing::warn!(
                "Decoder {} replaces {} for {} opcode {:#04x}",
                entry.label,
                existing.label,
                entry.data_unit,
                entry.opcode
            );
        }
    }

    tracing::debug!("Registered {} message decoders", registry.len());
    registry
}

/// Find the decoder registered for a data unit and opcode
pub fn lookup(data_unit: DataUnitId, opcode: u8) -> Result<&'static DecoderEntry> {
    DECODER_REGISTRY
        .get(&(data_unit, opcode))
        .copied()
        .ok_or(MessageError::UnknownOpcode { data_unit, opcode })
}

/// List all registered decoders ordered by data unit then opcode
pub fn registered_decoders() -> Vec<&'static DecoderEntry> {
    let mut entries: Vec<_> = DECODER_REGISTRY.values().copied().collect();
    entries.sort_by_key(|entry| entry.key());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Opcode;

    #[test]
    fn test_registry_populated() {
        let entries = registered_decoders();
        assert_eq!(entries.len(), 9, "entries: {:?}", entries);

        let labels: Vec<&str> = entries.iter().map(|e| e.label).collect();
        assert!(labels.contains(&"LOC_REG_RSP"));
        assert!(labels.contains(&"IDEN_UP"));
        assert!(entries.iter().all(|e| e.min_bits == TSBK_BITS));
    }

    #[test]
    fn test_lookup() {
        let entry = lookup(
            DataUnitId::TrunkingSignalingBlock,
            Opcode::LocationRegistrationResponse.value(),
        )
        .unwrap();
        assert_eq!(entry.label, "LOC_REG_RSP");
        assert_eq!(entry.opcode, 0x2B);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup(DataUnitId::TrunkingSignalingBlock, 0x3C).unwrap_err();
        assert!(matches!(
            err,
            MessageError::UnknownOpcode {
                data_unit: DataUnitId::TrunkingSignalingBlock,
                opcode: 0x3C
            }
        ));

        // Same opcode under a different data unit has no decoder
        assert!(lookup(DataUnitId::PacketDataUnit, 0x2B).is_err());
    }

    #[test]
    fn test_sorted_listing() {
        let keys: Vec<_> = registered_decoders().iter().map(|e| e.key()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
