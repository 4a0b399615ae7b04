// Decoded protocol messages
//
// A message owns the corrected bit buffer handed over by the link layer plus
// the metadata that came with it. Field values are decoded on first access and
// cached for the lifetime of the message.

pub mod factory;
pub mod record;
pub mod registry;
pub mod tsbk;
pub mod unknown;

pub use factory::{decode, decode_tsbk, FactoryConfig, MessageFactory};
pub use record::MessageRecord;
pub use registry::{registered_decoders, DecoderEntry};
pub use unknown::UnknownMessage;

use crate::bits::BitError;
use crate::identifier::Identifier;
use crate::reference::DataUnitId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Field out of range: {0}")]
    FieldOutOfRange(#[from] BitError),

    #[error("No decoder registered for {data_unit} opcode {opcode:#04x}")]
    UnknownOpcode { data_unit: DataUnitId, opcode: u8 },

    #[error("Record serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MessageError>;

/// Metadata the link layer supplies alongside each buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContext {
    pub data_unit: DataUnitId,
    /// Network access code
    pub nac: u16,
    /// Capture time, milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl MessageContext {
    pub fn new(data_unit: DataUnitId, nac: u16, timestamp: u64) -> Self {
        Self {
            data_unit,
            nac,
            timestamp,
        }
    }
}

/// Common interface of every decoded message.
///
/// `Display` is the canonical diagnostic rendering:
/// `NAC:<nac> <DUID> <LABEL>` followed by ` FIELD:value` pairs.
pub trait Message: fmt::Display + fmt::Debug + Send + Sync {
    fn context(&self) -> &MessageContext;

    /// Raw opcode used to select the decoder
    fn opcode(&self) -> u8;

    /// Short semantic name, e.g. `LOC_REG_RSP`
    fn label(&self) -> &'static str;

    /// Every identifier the message carries, in a stable order
    fn identifiers(&self) -> &[Identifier];

    /// False when the message failed its integrity check
    fn is_valid(&self) -> bool;

    fn nac(&self) -> u16 {
        self.context().nac
    }

    fn timestamp(&self) -> u64 {
        self.context().timestamp
    }

    fn data_unit(&self) -> DataUnitId {
        self.context().data_unit
    }

    /// Serializable snapshot for event logs
    fn record(&self) -> MessageRecord {
        MessageRecord::from_message(self)
    }
}

/// Prefix shared by every rendered message
pub(crate) fn write_stub(
    f: &mut fmt::Formatter<'_>,
    context: &MessageContext,
    valid: bool,
    label: &str,
) -> fmt::Result {
    if !valid {
        f.write_str("**CRC-FAIL** ")?;
    }
    write!(f, "NAC:{:03X} {} {}", context.nac, context.data_unit, label)
}
