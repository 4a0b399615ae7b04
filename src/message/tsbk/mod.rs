// Trunking signaling block (TSBK) messages
//
// A TSBK is 96 bits: an 80-bit body followed by a 16-bit CRC.
//
// Bit layout of the header:
// 0: last block flag
// 1: protected flag
// 2-7: opcode
// 8-15: manufacturer id
// 16-79: opcode-specific arguments
// 80-95: CRC-CCITT

pub mod deny_response;
pub mod group_affiliation;
pub mod group_voice_grant;
pub mod identifier_update;
pub mod location_registration;
pub mod status_broadcast;
pub mod unit_registration;

pub use deny_response::DenyResponse;
pub use group_affiliation::GroupAffiliationResponse;
pub use group_voice_grant::{GroupVoiceChannelGrant, GroupVoiceChannelGrantUpdate};
pub use identifier_update::IdentifierUpdate;
pub use location_registration::LocationRegistrationResponse;
pub use status_broadcast::{NetworkStatusBroadcast, RfssStatusBroadcast};
pub use unit_registration::UnitRegistrationResponse;

use super::{write_stub, Message, MessageContext, Result};
use crate::bits::{field, CorrectedBitBuffer};
use crate::reference::{Opcode, Vendor};
use std::fmt;

pub use crate::bits::crc::TSBK_BITS;

pub const LAST_BLOCK: usize = 0;
pub const PROTECTED: usize = 1;
pub const OPCODE: [usize; 6] = field(2);
pub const VENDOR: [usize; 8] = field(8);

/// Length-checked TSBK buffer plus its context, shared by every concrete TSBK message
#[derive(Debug, Clone)]
pub struct TsbkBlock {
    context: MessageContext,
    bits: CorrectedBitBuffer,
    valid: bool,
}

impl TsbkBlock {
    /// Fails with `FieldOutOfRange` if the buffer is shorter than a TSBK
    pub fn new(context: MessageContext, bits: CorrectedBitBuffer, valid: bool) -> Result<Self> {
        bits.require_len(TSBK_BITS)?;
        Ok(Self {
            context,
            bits,
            valid,
        })
    }

    pub fn context(&self) -> &MessageContext {
        &self.context
    }

    pub fn bits(&self) -> &CorrectedBitBuffer {
        &self.bits
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_last_block(&self) -> bool {
        self.bits.flag(LAST_BLOCK)
    }

    pub fn is_protected(&self) -> bool {
        self.bits.flag(PROTECTED)
    }

    pub fn opcode(&self) -> u8 {
        self.bits.int(&OPCODE) as u8
    }

    pub fn vendor(&self) -> Vendor {
        Vendor::from_value(self.bits.int(&VENDOR))
    }

    /// Read a field of this block; every table is checked against `TSBK_BITS` at compile time
    pub(crate) fn int(&self, positions: &[usize]) -> u32 {
        self.bits.int(positions)
    }

    pub(crate) fn flag(&self, index: usize) -> bool {
        self.bits.flag(index)
    }

    pub(crate) fn write_stub(&self, f: &mut fmt::Formatter<'_>, label: &str) -> fmt::Result {
        write_stub(f, &self.context, self.valid, label)
    }
}

/// A concrete TSBK message type that can be registered with the dispatcher
pub trait TsbkDecode: Message + Sized + 'static {
    const OPCODE: Opcode;

    fn from_block(block: TsbkBlock) -> Self;
}

/// Compile-time check that a field table fits inside a TSBK
macro_rules! check_fields {
    ($($table:expr),* $(,)?) => {
        $(
            const _: () = assert!($crate::bits::max_index(&$table) < $crate::message::tsbk::TSBK_BITS);
        )*
    };
}
pub(crate) use check_fields;
