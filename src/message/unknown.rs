// Pass-through message for (data unit, opcode) pairs without a registered decoder

use super::tsbk::VENDOR;
use super::{write_stub, Message, MessageContext};
use crate::bits::{to_hex, CorrectedBitBuffer};
use crate::identifier::Identifier;
use crate::reference::{DataUnitId, Opcode, Vendor};
use std::fmt;

#[derive(Debug, Clone)]
pub struct UnknownMessage {
    context: MessageContext,
    opcode: u8,
    bits: CorrectedBitBuffer,
    valid: bool,
}

impl UnknownMessage {
    pub fn new(context: MessageContext, opcode: u8, bits: CorrectedBitBuffer, valid: bool) -> Self {
        Self {
            context,
            opcode,
            bits,
            valid,
        }
    }

    /// Raw buffer as received
    pub fn bits(&self) -> &CorrectedBitBuffer {
        &self.bits
    }

    /// Manufacturer id, for TSBKs long enough to carry one
    pub fn vendor(&self) -> Option<Vendor> {
        if self.context.data_unit != DataUnitId::TrunkingSignalingBlock {
            return None;
        }
        self.bits.get_int(&VENDOR).ok().map(Vendor::from_value)
    }
}

impl Message for UnknownMessage {
    fn context(&self) -> &MessageContext {
        &self.context
    }

    fn opcode(&self) -> u8 {
        self.opcode
    }

    fn label(&self) -> &'static str {
        "UNKNOWN"
    }

    fn identifiers(&self) -> &[Identifier] {
        &[]
    }

    fn is_valid(&self) -> bool {
        self.valid
    }
}

impl fmt::Display for UnknownMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stub(f, &self.context, self.valid, self.label())?;
        match self.context.data_unit {
            DataUnitId::TrunkingSignalingBlock => {
                write!(f, " OPCODE:{}", Opcode::from_value(self.opcode))?
            }
            _ => write!(f, " OPCODE:{:02X}", self.opcode)?,
        }
        if let Some(vendor) = self.vendor() {
            write!(f, " VENDOR:{}", vendor)?;
        }
        write!(f, " MSG:{}", to_hex(self.bits.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::tsbk::test_support::{context, sealed_tsbk};

    #[test]
    fn test_unknown_rendering() {
        let bits = sealed_tsbk(Opcode::from_value(0x1E), &[(8..16, 0x33)]);
        let message = UnknownMessage::new(context(), 0x1E, bits, true);
        let text = message.to_string();

        assert!(text.starts_with("NAC:293 TSBK UNKNOWN OPCODE:OPCODE-1E VENDOR:MFID-33 MSG:1E 33"));
        assert_eq!(message.vendor(), Some(Vendor::Other(0x33)));
    }

    #[test]
    fn test_unknown_short_buffer() {
        let message = UnknownMessage::new(context(), 0x05, CorrectedBitBuffer::from_bytes(vec![0x14]), false);
        assert_eq!(message.vendor(), None);
        assert_eq!(
            message.to_string(),
            "**CRC-FAIL** NAC:293 TSBK UNKNOWN OPCODE:UU_ANS_REQ MSG:14"
        );
    }
}
